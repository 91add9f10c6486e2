use super::{ShapeKind, ShapeTrait};
use crate::bounds::Aabb;
use crate::math::{Real, Vec3};

/// Scales `(normal, offset)` so the normal has unit length. A zero normal falls back to
/// the x axis through the origin.
fn unit_normal(normal: Vec3, offset: Real) -> (Vec3, Real) {
    let len = normal.length();
    if len > 0.0 && len.is_finite() {
        (normal / len, offset / len)
    } else {
        (Vec3::X, 0.0)
    }
}

/// Returns `(axis, sign)` if `normal` is exactly `sign * e_axis`.
fn axis_aligned(normal: Vec3) -> Option<(usize, Real)> {
    (0..3).find_map(|axis| {
        let others_zero = (0..3).all(|i| i == axis || normal[i] == 0.0);
        if !others_zero {
            None
        } else if normal[axis] == 1.0 {
            Some((axis, 1.0))
        } else if normal[axis] == -1.0 {
            Some((axis, -1.0))
        } else {
            None
        }
    })
}

fn unbounded() -> Aabb {
    Aabb {
        min: Vec3::splat(Real::NEG_INFINITY),
        max: Vec3::splat(Real::INFINITY),
    }
}

/// Infinite plane `normal . x = offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapePlane {
    pub normal: Vec3,
    pub offset: Real,
}

impl ShapePlane {
    pub fn new(normal: Vec3, offset: Real) -> Self {
        let (normal, offset) = unit_normal(normal, offset);
        ShapePlane { normal, offset }
    }

    pub fn signed_distance(&self, pt: Vec3) -> Real {
        self.normal.dot(pt) - self.offset
    }
}

impl ShapeTrait for ShapePlane {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Plane
    }

    fn local_aabb(&self) -> Aabb {
        let mut aabb = unbounded();
        if let Some((axis, sign)) = axis_aligned(self.normal) {
            aabb.min[axis] = sign * self.offset;
            aabb.max[axis] = sign * self.offset;
        }
        aabb
    }
}

/// Infinite halfspace `normal . x <= offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeHalfspace {
    pub normal: Vec3,
    pub offset: Real,
}

impl ShapeHalfspace {
    pub fn new(normal: Vec3, offset: Real) -> Self {
        let (normal, offset) = unit_normal(normal, offset);
        ShapeHalfspace { normal, offset }
    }

    pub fn signed_distance(&self, pt: Vec3) -> Real {
        self.normal.dot(pt) - self.offset
    }
}

impl ShapeTrait for ShapeHalfspace {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Halfspace
    }

    fn local_aabb(&self) -> Aabb {
        let mut aabb = unbounded();
        match axis_aligned(self.normal) {
            Some((axis, sign)) if sign > 0.0 => aabb.max[axis] = self.offset,
            Some((axis, _)) => aabb.min[axis] = -self.offset,
            None => {}
        }
        aabb
    }
}
