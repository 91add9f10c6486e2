use super::{ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::math::{Mat3, Real, Vec3};
use std::f64::consts::PI;

/// Cone along local z: apex at `+half_length`, base disc of `radius` at `-half_length`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeCone {
    pub radius: Real,
    pub half_length: Real,
}

impl ShapeCone {
    pub fn new(radius: Real, half_length: Real) -> Self {
        ShapeCone {
            radius: radius.abs(),
            half_length: half_length.abs(),
        }
    }
}

impl ShapeTrait for ShapeCone {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cone
    }

    fn local_aabb(&self) -> Aabb {
        let r = self.radius;
        Aabb::from_half_extents(Vec3::new(r, r, self.half_length))
    }

    fn volume(&self) -> Option<Real> {
        Some(PI * self.radius * self.radius * 2.0 * self.half_length / 3.0)
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(Vec3::new(0.0, 0.0, -0.5 * self.half_length))
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        let v = self.volume()?;
        let r2 = self.radius * self.radius;
        let ix = v * (0.4 * self.half_length * self.half_length + 3.0 * r2 / 20.0);
        let iz = 0.3 * v * r2;
        Some(Mat3::from_diagonal(Vec3::new(ix, ix, iz)))
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeCone {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        let apex = Vec3::new(0.0, 0.0, self.half_length);
        let radial = Vec3::new(dir.x, dir.y, 0.0).normalize_or_zero();
        let rim = radial * self.radius - Vec3::new(0.0, 0.0, self.half_length);
        if dir.dot(apex) >= dir.dot(rim) {
            apex
        } else {
            rim
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cone_support() {
        let cone = ShapeCone::new(1.0, 2.0);
        assert_eq!(cone.local_support(Vec3::Z), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(cone.local_support(-Vec3::Z + Vec3::X * 0.1), Vec3::new(1.0, 0.0, -2.0));
    }
}
