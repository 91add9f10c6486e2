use crate::math::{Real, Vec3};
use std::ops::{Add, AddAssign};

/// Axis-aligned bounding box stored as its two corners.
///
/// Corners may be infinite for unbounded shapes (planes and halfspaces).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box (`min > max`) that grows to fit the first point added.
    pub fn new() -> Aabb {
        Aabb {
            min: Vec3::splat(Real::MAX),
            max: Vec3::splat(-Real::MAX),
        }
    }

    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of half-extent `radius` along every axis around `center`.
    pub fn from_center_radius(center: Vec3, radius: Real) -> Self {
        let delta = Vec3::splat(radius);
        Aabb {
            min: center - delta,
            max: center + delta,
        }
    }

    pub fn from_half_extents(half_extents: Vec3) -> Self {
        Aabb {
            min: -half_extents,
            max: half_extents,
        }
    }

    pub fn from_points(pts: &[Vec3]) -> Self {
        pts.iter().fold(Aabb::new(), |acc, pt| acc + *pt)
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    pub fn expand_by_point(&mut self, pt: Vec3) {
        self.add_assign(pt);
    }

    pub fn expand_by_aabb(&mut self, rhs: &Self) {
        self.expand_by_point(rhs.min);
        self.expand_by_point(rhs.max);
    }

    #[must_use]
    pub fn translate(&self, v: Vec3) -> Self {
        Aabb {
            min: self.min + v,
            max: self.max + v,
        }
    }

    pub fn width(&self) -> Vec3 {
        self.max - self.min
    }

    /// Per-axis midpoint. Axes with an infinite corner report 0 so the result is never NaN.
    pub fn center(&self) -> Vec3 {
        let mid = |lo: Real, hi: Real| {
            if lo.is_finite() && hi.is_finite() {
                (lo + hi) * 0.5
            } else {
                0.0
            }
        };
        Vec3::new(
            mid(self.min.x, self.max.x),
            mid(self.min.y, self.max.y),
            mid(self.min.z, self.max.z),
        )
    }

    /// Radius of the sphere about [`Aabb::center`] that circumscribes the box.
    pub fn circumradius(&self) -> Real {
        if self.is_finite() {
            (self.min - self.center()).length()
        } else {
            Real::INFINITY
        }
    }

    pub fn contains_point(&self, pt: Vec3) -> bool {
        pt.cmpge(self.min).all() && pt.cmple(self.max).all()
    }

    pub fn contains(&self, rhs: &Self) -> bool {
        self.contains_point(rhs.min) && self.contains_point(rhs.max)
    }

    /// Inclusive on faces.
    pub fn overlaps(&self, rhs: &Self) -> bool {
        !(self.max.cmplt(rhs.min).any() || rhs.max.cmplt(self.min).any())
    }
}

impl Default for Aabb {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Add<Vec3> for Aabb {
    type Output = Self;
    fn add(self, pt: Vec3) -> Self::Output {
        Aabb {
            min: Vec3::select(pt.cmplt(self.min), pt, self.min),
            max: Vec3::select(pt.cmpgt(self.max), pt, self.max),
        }
    }
}

impl AddAssign<Vec3> for Aabb {
    fn add_assign(&mut self, pt: Vec3) {
        self.min = Vec3::select(pt.cmplt(self.min), pt, self.min);
        self.max = Vec3::select(pt.cmpgt(self.max), pt, self.max);
    }
}
