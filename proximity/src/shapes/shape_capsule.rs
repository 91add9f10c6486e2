use super::{signed, ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::math::{Mat3, Real, Vec3};
use std::f64::consts::PI;

/// Segment of length `2 * half_length` along local z, swept by a sphere of `radius`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeCapsule {
    pub radius: Real,
    pub half_length: Real,
}

impl ShapeCapsule {
    pub fn new(radius: Real, half_length: Real) -> Self {
        ShapeCapsule {
            radius: radius.abs(),
            half_length: half_length.abs(),
        }
    }
}

impl ShapeTrait for ShapeCapsule {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Capsule
    }

    fn local_aabb(&self) -> Aabb {
        let r = self.radius;
        Aabb::from_half_extents(Vec3::new(r, r, self.half_length + r))
    }

    fn volume(&self) -> Option<Real> {
        let r = self.radius;
        Some(PI * r * r * (2.0 * self.half_length + 4.0 / 3.0 * r))
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(Vec3::ZERO)
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        let r = self.radius;
        let h = self.half_length;
        let r2 = r * r;
        let h2 = h * h;
        let v_cyl = PI * r2 * 2.0 * h;
        let v_sph = 4.0 / 3.0 * PI * r2 * r;

        // the hemispherical caps are offset from the origin along z
        let ix = v_cyl * (h2 / 3.0 + r2 / 4.0) + v_sph * (0.4 * r2 + h2 + 0.75 * r * h);
        let iz = (0.5 * v_cyl + 0.4 * v_sph) * r2;
        Some(Mat3::from_diagonal(Vec3::new(ix, ix, iz)))
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeCapsule {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        let tip = Vec3::new(0.0, 0.0, signed(dir.z, self.half_length));
        tip + dir.normalize_or_zero() * self.radius
    }
}
