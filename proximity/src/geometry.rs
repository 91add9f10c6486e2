use crate::bounds::Aabb;
use crate::math::glam_ext::Vec3Ext;
use crate::math::{Mat3, Real, Vec3};
use crate::shapes::{ObjectType, Shape, ShapeKind, SupportMap};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque caller data attached to a geometry or an object.
pub type UserData = Arc<dyn Any + Send + Sync>;

/// Local-frame bounds of a shape: a tight box and the sphere around its center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalBound {
    pub aabb: Aabb,
    pub center: Vec3,
    /// Half diagonal of `aabb`. Infinite for unbounded shapes.
    pub radius: Real,
}

impl LocalBound {
    /// Reported by [`Geometry::cached_local_bound`] before the bound has been computed.
    pub const UNCOMPUTED: LocalBound = LocalBound {
        aabb: Aabb {
            min: Vec3::splat(Real::MAX),
            max: Vec3::splat(-Real::MAX),
        },
        center: Vec3::splat(Real::MAX),
        radius: -1.0,
    };

    fn from_aabb(aabb: Aabb) -> Self {
        if aabb.is_empty() {
            return LocalBound {
                aabb: Aabb::from_corners(Vec3::ZERO, Vec3::ZERO),
                center: Vec3::ZERO,
                radius: 0.0,
            };
        }
        LocalBound {
            aabb,
            center: aabb.center(),
            radius: aabb.circumradius(),
        }
    }
}

/// A shape with its lazily computed local bound and occupancy attributes.
///
/// Shared between objects through `Arc<Geometry>`.
#[derive(Clone)]
pub struct Geometry {
    shape: Shape,
    local_bound: OnceCell<LocalBound>,
    pub cost_density: Real,
    pub threshold_occupied: Real,
    pub threshold_free: Real,
    user_data: Option<UserData>,
}

impl Geometry {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Geometry {
            shape: shape.into(),
            local_bound: OnceCell::new(),
            cost_density: 1.0,
            threshold_occupied: 1.0,
            threshold_free: 0.0,
            user_data: None,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Mutable access to the intrinsic parameters. Invalidates the local bound.
    pub fn shape_mut(&mut self) -> &mut Shape {
        self.local_bound.take();
        &mut self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn object_type(&self) -> ObjectType {
        self.kind().object_type()
    }

    /// Computes the local bound if needed and returns it.
    pub fn compute_local_bound(&self) -> &LocalBound {
        self.local_bound
            .get_or_init(|| LocalBound::from_aabb(self.shape.local_aabb()))
    }

    pub fn is_local_bound_computed(&self) -> bool {
        self.local_bound.get().is_some()
    }

    /// The local bound without computing it. Before the first computation this is
    /// [`LocalBound::UNCOMPUTED`].
    pub fn cached_local_bound(&self) -> LocalBound {
        self.local_bound
            .get()
            .copied()
            .unwrap_or(LocalBound::UNCOMPUTED)
    }

    pub fn local_aabb(&self) -> Aabb {
        self.compute_local_bound().aabb
    }

    pub fn local_center(&self) -> Vec3 {
        self.compute_local_bound().center
    }

    pub fn local_radius(&self) -> Real {
        self.compute_local_bound().radius
    }

    pub fn is_occupied(&self) -> bool {
        self.cost_density >= self.threshold_occupied
    }

    pub fn is_free(&self) -> bool {
        self.cost_density <= self.threshold_free
    }

    pub fn is_uncertain(&self) -> bool {
        !self.is_occupied() && !self.is_free()
    }

    pub fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    pub fn set_user_data(&mut self, data: Option<UserData>) {
        self.user_data = data;
    }

    pub fn volume(&self) -> Option<Real> {
        self.shape.volume()
    }

    pub fn center_of_mass(&self) -> Option<Vec3> {
        self.shape.center_of_mass()
    }

    pub fn inertia_about_origin(&self) -> Option<Mat3> {
        self.shape.inertia_about_origin()
    }

    /// Inertia tensor about the center of mass (parallel axis theorem).
    pub fn inertia_about_com(&self) -> Option<Mat3> {
        let inertia = self.inertia_about_origin()?;
        let volume = self.volume()?;
        let com = self.center_of_mass()?;
        let shift = Mat3::from_diagonal(Vec3::splat(com.length_squared())) - com.outer(com);
        Some(inertia - shift * volume)
    }

    pub fn support_map(&self) -> Option<&dyn SupportMap> {
        self.shape.support_map()
    }
}

impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.cost_density == other.cost_density
            && self.threshold_occupied == other.threshold_occupied
            && self.threshold_free == other.threshold_free
            && self.compute_local_bound() == other.compute_local_bound()
    }
}

impl fmt::Debug for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Geometry")
            .field("shape", &self.shape)
            .field("local_bound", &self.local_bound.get())
            .field("cost_density", &self.cost_density)
            .field("threshold_occupied", &self.threshold_occupied)
            .field("threshold_free", &self.threshold_free)
            .field("user_data", &self.user_data.is_some())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shapes::{ShapeBox, ShapeHalfspace, ShapeTriangle};
    use approx::assert_relative_eq;

    #[test]
    fn test_local_bound_is_lazy() {
        let geom = Geometry::new(ShapeBox::new(Vec3::new(1.0, 2.0, 2.0)));
        assert!(!geom.is_local_bound_computed());
        let raw = geom.cached_local_bound();
        assert!(raw.radius < 0.0);
        assert_eq!(raw.center, Vec3::splat(Real::MAX));

        assert_relative_eq!(geom.local_radius(), 3.0);
        assert!(geom.is_local_bound_computed());
        assert_eq!(geom.cached_local_bound().center, Vec3::ZERO);
    }

    #[test]
    fn test_mutation_invalidates_bound() {
        let mut geom = Geometry::new(Shape::make_sphere(1.0));
        assert_relative_eq!(geom.local_aabb().max.x, 1.0);
        *geom.shape_mut() = Shape::make_sphere(2.0);
        assert!(!geom.is_local_bound_computed());
        assert_relative_eq!(geom.local_aabb().max.x, 2.0);
    }

    #[test]
    fn test_unbounded_and_flat_shapes_never_nan() {
        let halfspace = Geometry::new(ShapeHalfspace::new(Vec3::new(1.0, 1.0, 0.0), 2.0));
        assert!(!halfspace.local_center().is_nan());
        assert_eq!(halfspace.local_radius(), Real::INFINITY);

        let tri = Geometry::new(ShapeTriangle::new(Vec3::ZERO, Vec3::X, Vec3::Y));
        assert!(!tri.local_center().is_nan());
        assert_eq!(tri.local_aabb().width().z, 0.0);
        assert!(tri.volume().is_none());
        assert!(tri.inertia_about_com().is_none());
    }

    #[test]
    fn test_inertia_about_com_of_centered_box() {
        let mut geom = Geometry::new(ShapeBox::new(Vec3::splat(0.5)));
        let centered = geom.inertia_about_com().unwrap();
        assert!(centered.abs_diff_eq(geom.inertia_about_origin().unwrap(), 1e-12));
        assert_relative_eq!(centered.x_axis.x, 1.0 / 6.0, epsilon = 1e-12);

        // equality ignores attached data
        let other = geom.clone();
        geom.set_user_data(Some(Arc::new(7_u32)));
        assert_eq!(geom, other);
    }
}
