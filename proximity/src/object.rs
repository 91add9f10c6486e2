use crate::bounds::Aabb;
use crate::geometry::{Geometry, UserData};
use crate::math::{Quat, Transform, Vec3};
use crate::shapes::{ObjectType, ShapeKind};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// World bound together with the pose version it was computed for.
#[derive(Copy, Clone, Debug, PartialEq)]
struct BoundCache {
    aabb: Aabb,
    version: u64,
}

/// A shared geometry placed in the world by a rigid transform.
///
/// The world bound is cached and only refreshed by [`CollisionObject::compute_aabb`]. Pose
/// setters leave it stale so a caller can batch several updates.
#[derive(Clone)]
pub struct CollisionObject {
    geometry: Arc<Geometry>,
    transform: Transform,
    pose_version: u64,
    bound: BoundCache,
    user_data: Option<UserData>,
}

impl CollisionObject {
    pub fn new(geometry: Arc<Geometry>) -> Self {
        Self::with_transform(geometry, Transform::IDENTITY)
    }

    /// Places `geometry` at `transform` and computes the world bound.
    pub fn with_transform(geometry: Arc<Geometry>, transform: Transform) -> Self {
        geometry.compute_local_bound();
        let mut object = CollisionObject {
            geometry,
            transform,
            pose_version: 0,
            bound: BoundCache {
                aabb: Aabb::new(),
                version: 0,
            },
            user_data: None,
        };
        object.compute_aabb();
        object
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    /// Mutable access to the geometry, cloning it first if it is shared. Marks the world
    /// bound stale.
    pub fn geometry_mut(&mut self) -> &mut Geometry {
        self.pose_version += 1;
        Arc::make_mut(&mut self.geometry)
    }

    /// Replaces the geometry unless `geometry` is the one already attached. Returns whether
    /// a replacement happened. On replacement the world bound is recomputed once, after the
    /// local bound when `compute_local_bound` is set.
    pub fn set_geometry(&mut self, geometry: Arc<Geometry>, compute_local_bound: bool) -> bool {
        if Arc::ptr_eq(&self.geometry, &geometry) {
            return false;
        }
        if compute_local_bound {
            geometry.compute_local_bound();
        }
        self.geometry = geometry;
        self.pose_version += 1;
        self.compute_aabb();
        true
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn object_type(&self) -> ObjectType {
        self.geometry.object_type()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.translation()
    }

    pub fn rotation(&self) -> Quat {
        self.transform.rotation()
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.pose_version += 1;
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.transform.set_translation(translation);
        self.pose_version += 1;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.set_rotation(rotation);
        self.pose_version += 1;
    }

    pub fn set_identity_transform(&mut self) {
        self.transform.set_identity();
        self.pose_version += 1;
    }

    pub fn is_identity_transform(&self) -> bool {
        self.transform.is_identity()
    }

    /// Refreshes the world bound from the current pose.
    ///
    /// An exactly unrotated pose translates the tight local box. Any other rotation falls
    /// back to a cube around the transformed local center with the local radius as
    /// half-extent, which encloses the shape for every rotation.
    pub fn compute_aabb(&mut self) {
        let local = self.geometry.compute_local_bound();
        let aabb = if self.transform.is_identity_rotation() {
            local.aabb.translate(self.transform.translation())
        } else {
            Aabb::from_center_radius(self.transform.transform_point(local.center), local.radius)
        };
        self.bound = BoundCache {
            aabb,
            version: self.pose_version,
        };
    }

    /// The world bound as of the last [`CollisionObject::compute_aabb`].
    pub fn aabb(&self) -> &Aabb {
        if cfg!(debug_assertions) && self.is_aabb_stale() {
            warn!(
                kind = ?self.kind(),
                "reading a world bound that predates the last pose or geometry change"
            );
        }
        &self.bound.aabb
    }

    pub fn is_aabb_stale(&self) -> bool {
        self.bound.version != self.pose_version
    }

    pub fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    pub fn set_user_data(&mut self, data: Option<UserData>) {
        self.user_data = data;
    }
}

impl fmt::Debug for CollisionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionObject")
            .field("geometry", &self.geometry)
            .field("transform", &self.transform)
            .field("aabb", &self.bound.aabb)
            .field("stale", &self.is_aabb_stale())
            .finish()
    }
}
