use super::{find_support_point, ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::math::Vec3;

/// A single triangle. Has no volume.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeTriangle {
    pub points: [Vec3; 3],
}

impl ShapeTriangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        ShapeTriangle { points: [a, b, c] }
    }
}

impl ShapeTrait for ShapeTriangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn local_aabb(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeTriangle {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        find_support_point(&self.points, dir)
    }
}
