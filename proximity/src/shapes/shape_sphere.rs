use super::{ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::math::{Mat3, Real, Vec3};
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeSphere {
    pub radius: Real,
}

impl ShapeSphere {
    pub fn new(radius: Real) -> Self {
        ShapeSphere {
            radius: radius.abs(),
        }
    }
}

impl ShapeTrait for ShapeSphere {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn local_aabb(&self) -> Aabb {
        Aabb::from_center_radius(Vec3::ZERO, self.radius)
    }

    fn volume(&self) -> Option<Real> {
        Some(4.0 / 3.0 * PI * self.radius * self.radius * self.radius)
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(Vec3::ZERO)
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        let i = 0.4 * self.volume()? * self.radius * self.radius;
        Some(Mat3::from_diagonal(Vec3::splat(i)))
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeSphere {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        dir.normalize_or_zero() * self.radius
    }
}
