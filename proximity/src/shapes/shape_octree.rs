use super::{ShapeKind, ShapeTrait};
use crate::bounds::Aabb;
use crate::math::{Real, Vec3};

/// Occupancy octree described by its leaf resolution and depth. The root cell is a cube
/// centered on the local origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeOctree {
    pub resolution: Real,
    pub depth: u32,
}

impl ShapeOctree {
    pub fn new(resolution: Real, depth: u32) -> Self {
        ShapeOctree {
            resolution: resolution.abs(),
            depth,
        }
    }

    pub fn root_size(&self) -> Real {
        self.resolution * (2.0 as Real).powi(self.depth as i32)
    }
}

impl ShapeTrait for ShapeOctree {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Octree
    }

    fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Vec3::splat(0.5 * self.root_size()))
    }
}
