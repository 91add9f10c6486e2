use super::{signed, ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::math::{Mat3, Real, Vec3};

/// Box centered on the local origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeBox {
    pub half_extents: Vec3,
}

impl ShapeBox {
    pub fn new(half_extents: Vec3) -> Self {
        ShapeBox {
            half_extents: half_extents.abs(),
        }
    }

    /// Box with full side lengths `x`, `y`, `z`.
    pub fn from_sides(x: Real, y: Real, z: Real) -> Self {
        Self::new(Vec3::new(x, y, z) * 0.5)
    }

    /// Smallest box centered on the origin containing all `points`.
    pub fn enclosing(points: &[Vec3]) -> Self {
        let half_extents = points
            .iter()
            .fold(Vec3::ZERO, |acc, pt| acc.max(pt.abs()));
        ShapeBox { half_extents }
    }
}

impl ShapeTrait for ShapeBox {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Box
    }

    fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.half_extents)
    }

    fn volume(&self) -> Option<Real> {
        let h = self.half_extents;
        Some(8.0 * h.x * h.y * h.z)
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(Vec3::ZERO)
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        // (V / 12) * (b^2 + c^2) with full sides, i.e. (V / 3) * half-sides squared
        let hh = self.half_extents * self.half_extents;
        let v = self.volume()?;
        let diagonal = Vec3::new(hh.y + hh.z, hh.x + hh.z, hh.x + hh.y) * (v / 3.0);
        Some(Mat3::from_diagonal(diagonal))
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeBox {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        let h = self.half_extents;
        Vec3::new(signed(dir.x, h.x), signed(dir.y, h.y), signed(dir.z, h.z))
    }
}
