mod mass;
mod shape_box;
mod shape_capsule;
mod shape_cone;
mod shape_convex;
mod shape_cylinder;
mod shape_ellipsoid;
mod shape_height_field;
mod shape_mesh;
mod shape_octree;
mod shape_plane;
mod shape_sphere;
mod shape_triangle;

use crate::bounds::Aabb;
use crate::math::{Mat3, Real, Vec3};
use std::any::Any;
use std::fmt;

pub use shape_box::ShapeBox;
pub use shape_capsule::ShapeCapsule;
pub use shape_cone::ShapeCone;
pub use shape_convex::ShapeConvex;
pub use shape_cylinder::ShapeCylinder;
pub use shape_ellipsoid::ShapeEllipsoid;
pub use shape_height_field::{HeightFieldBv, ShapeHeightField};
pub use shape_mesh::{BvKind, ShapeMesh};
pub use shape_octree::ShapeOctree;
pub use shape_plane::{ShapeHalfspace, ShapePlane};
pub use shape_sphere::ShapeSphere;
pub use shape_triangle::ShapeTriangle;

/// Coarse category of a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Unknown,
    Bvh,
    Geom,
    Octree,
    HeightField,
}

/// Fine node kind. The discriminants are dense and index the dispatch table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Unknown,
    BvAabb,
    BvObb,
    BvRss,
    BvKios,
    BvObbRss,
    BvKdop16,
    BvKdop18,
    BvKdop24,
    Box,
    Sphere,
    Capsule,
    Cone,
    Cylinder,
    Convex,
    Plane,
    Halfspace,
    Triangle,
    Octree,
    Ellipsoid,
    HfAabb,
    HfObbRss,
}

impl ShapeKind {
    pub const COUNT: usize = 22;

    pub const ALL: [ShapeKind; Self::COUNT] = [
        ShapeKind::Unknown,
        ShapeKind::BvAabb,
        ShapeKind::BvObb,
        ShapeKind::BvRss,
        ShapeKind::BvKios,
        ShapeKind::BvObbRss,
        ShapeKind::BvKdop16,
        ShapeKind::BvKdop18,
        ShapeKind::BvKdop24,
        ShapeKind::Box,
        ShapeKind::Sphere,
        ShapeKind::Capsule,
        ShapeKind::Cone,
        ShapeKind::Cylinder,
        ShapeKind::Convex,
        ShapeKind::Plane,
        ShapeKind::Halfspace,
        ShapeKind::Triangle,
        ShapeKind::Octree,
        ShapeKind::Ellipsoid,
        ShapeKind::HfAabb,
        ShapeKind::HfObbRss,
    ];

    /// Kinds with a support mapping, handled by the GJK solver.
    pub const CONVEX: [ShapeKind; 8] = [
        ShapeKind::Box,
        ShapeKind::Sphere,
        ShapeKind::Capsule,
        ShapeKind::Cone,
        ShapeKind::Cylinder,
        ShapeKind::Convex,
        ShapeKind::Triangle,
        ShapeKind::Ellipsoid,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn object_type(self) -> ObjectType {
        match self {
            ShapeKind::Unknown => ObjectType::Unknown,
            ShapeKind::BvAabb
            | ShapeKind::BvObb
            | ShapeKind::BvRss
            | ShapeKind::BvKios
            | ShapeKind::BvObbRss
            | ShapeKind::BvKdop16
            | ShapeKind::BvKdop18
            | ShapeKind::BvKdop24 => ObjectType::Bvh,
            ShapeKind::Octree => ObjectType::Octree,
            ShapeKind::HfAabb | ShapeKind::HfObbRss => ObjectType::HeightField,
            _ => ObjectType::Geom,
        }
    }
}

/// Capabilities every shape provides. Implement it (together with [`CustomShape`]) to plug
/// a user-defined shape into [`Shape::Custom`].
///
/// Physical properties assume unit density. `None` means the property is not defined for
/// the shape, which callers must check before using the value.
pub trait ShapeTrait: fmt::Debug + Send + Sync {
    fn kind(&self) -> ShapeKind;

    /// Tight box in the shape's local frame.
    fn local_aabb(&self) -> Aabb;

    fn volume(&self) -> Option<Real> {
        None
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        None
    }

    /// Inertia tensor about the local origin.
    fn inertia_about_origin(&self) -> Option<Mat3> {
        None
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        None
    }
}

/// Support mapping of a convex shape in its local frame.
pub trait SupportMap {
    /// Point of the shape furthest along `dir`. `dir` need not be normalized.
    fn local_support(&self, dir: Vec3) -> Vec3;
}

/// Object-safe cloning and comparison for user-defined shapes.
pub trait CustomShape: ShapeTrait {
    fn clone_box(&self) -> Box<dyn CustomShape>;
    fn as_any(&self) -> &dyn Any;
    fn eq_dyn(&self, other: &dyn CustomShape) -> bool;
}

impl Clone for Box<dyn CustomShape> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for Box<dyn CustomShape> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other.as_ref())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Box(ShapeBox),
    Sphere(ShapeSphere),
    Capsule(ShapeCapsule),
    Cone(ShapeCone),
    Cylinder(ShapeCylinder),
    Convex(ShapeConvex),
    Plane(ShapePlane),
    Halfspace(ShapeHalfspace),
    Triangle(ShapeTriangle),
    Ellipsoid(ShapeEllipsoid),
    Octree(ShapeOctree),
    Mesh(ShapeMesh),
    HeightField(ShapeHeightField),
    Custom(Box<dyn CustomShape>),
}

impl Shape {
    pub fn make_sphere(radius: Real) -> Self {
        Shape::Sphere(ShapeSphere::new(radius))
    }

    pub fn make_box(half_extents: Vec3) -> Self {
        Shape::Box(ShapeBox::new(half_extents))
    }

    pub fn make_custom<S: CustomShape + 'static>(shape: S) -> Self {
        Shape::Custom(Box::new(shape))
    }

    pub fn shape_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Box(data) => data,
            Shape::Sphere(data) => data,
            Shape::Capsule(data) => data,
            Shape::Cone(data) => data,
            Shape::Cylinder(data) => data,
            Shape::Convex(data) => data,
            Shape::Plane(data) => data,
            Shape::Halfspace(data) => data,
            Shape::Triangle(data) => data,
            Shape::Ellipsoid(data) => data,
            Shape::Octree(data) => data,
            Shape::Mesh(data) => data,
            Shape::HeightField(data) => data,
            Shape::Custom(data) => data.as_ref(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape_trait().kind()
    }

    pub fn local_aabb(&self) -> Aabb {
        self.shape_trait().local_aabb()
    }

    pub fn volume(&self) -> Option<Real> {
        self.shape_trait().volume()
    }

    pub fn center_of_mass(&self) -> Option<Vec3> {
        self.shape_trait().center_of_mass()
    }

    pub fn inertia_about_origin(&self) -> Option<Mat3> {
        self.shape_trait().inertia_about_origin()
    }

    pub fn support_map(&self) -> Option<&dyn SupportMap> {
        self.shape_trait().support_map()
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(data: $ty) -> Self {
                    Shape::$variant(data)
                }
            }
        )*
    };
}

impl_from_shape! {
    Box => ShapeBox,
    Sphere => ShapeSphere,
    Capsule => ShapeCapsule,
    Cone => ShapeCone,
    Cylinder => ShapeCylinder,
    Convex => ShapeConvex,
    Plane => ShapePlane,
    Halfspace => ShapeHalfspace,
    Triangle => ShapeTriangle,
    Ellipsoid => ShapeEllipsoid,
    Octree => ShapeOctree,
    Mesh => ShapeMesh,
    HeightField => ShapeHeightField,
}

/// Vertex furthest along `dir`. `pts` must not be empty.
pub(crate) fn find_support_point(pts: &[Vec3], dir: Vec3) -> Vec3 {
    let mut max_pt = pts[0];
    let mut max_dist = dir.dot(max_pt);
    for &pt in &pts[1..] {
        let dist = dir.dot(pt);
        if dist > max_dist {
            max_dist = dist;
            max_pt = pt;
        }
    }
    max_pt
}

/// `sign(x) * magnitude`, treating zero as positive.
#[inline]
pub(crate) fn signed(x: Real, magnitude: Real) -> Real {
    if x < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}
