use super::{signed, ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::math::{Mat3, Real, Vec3};
use std::f64::consts::PI;

/// Cylinder along local z.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeCylinder {
    pub radius: Real,
    pub half_length: Real,
}

impl ShapeCylinder {
    pub fn new(radius: Real, half_length: Real) -> Self {
        ShapeCylinder {
            radius: radius.abs(),
            half_length: half_length.abs(),
        }
    }
}

impl ShapeTrait for ShapeCylinder {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cylinder
    }

    fn local_aabb(&self) -> Aabb {
        let r = self.radius;
        Aabb::from_half_extents(Vec3::new(r, r, self.half_length))
    }

    fn volume(&self) -> Option<Real> {
        Some(PI * self.radius * self.radius * 2.0 * self.half_length)
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(Vec3::ZERO)
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        let v = self.volume()?;
        let r2 = self.radius * self.radius;
        let h2 = self.half_length * self.half_length;
        let ix = v * (3.0 * r2 + 4.0 * h2) / 12.0;
        let iz = v * r2 / 2.0;
        Some(Mat3::from_diagonal(Vec3::new(ix, ix, iz)))
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeCylinder {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        let radial = Vec3::new(dir.x, dir.y, 0.0).normalize_or_zero() * self.radius;
        radial + Vec3::new(0.0, 0.0, signed(dir.z, self.half_length))
    }
}
