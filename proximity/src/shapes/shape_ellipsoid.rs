use super::{ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::math::{Mat3, Real, Vec3};
use std::f64::consts::PI;

/// Axis-aligned ellipsoid with semi-axes `radii`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeEllipsoid {
    pub radii: Vec3,
}

impl ShapeEllipsoid {
    pub fn new(radii: Vec3) -> Self {
        ShapeEllipsoid {
            radii: radii.abs(),
        }
    }
}

impl ShapeTrait for ShapeEllipsoid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipsoid
    }

    fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.radii)
    }

    fn volume(&self) -> Option<Real> {
        let r = self.radii;
        Some(4.0 / 3.0 * PI * r.x * r.y * r.z)
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(Vec3::ZERO)
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        let v = self.volume()?;
        let rr = self.radii * self.radii;
        let diagonal = Vec3::new(rr.y + rr.z, rr.x + rr.z, rr.x + rr.y) * (v / 5.0);
        Some(Mat3::from_diagonal(diagonal))
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeEllipsoid {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        let scaled = self.radii * self.radii * dir;
        let denom = scaled.dot(dir).sqrt();
        if denom > 0.0 {
            scaled / denom
        } else {
            Vec3::ZERO
        }
    }
}
