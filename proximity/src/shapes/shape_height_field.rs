use super::{ShapeKind, ShapeTrait};
use crate::bounds::Aabb;
use crate::error::ShapeError;
use crate::math::{Real, Vec3};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeightFieldBv {
    #[default]
    Aabb,
    ObbRss,
}

/// Regular grid of heights over `[-x_dim/2, x_dim/2] x [-y_dim/2, y_dim/2]`, stored row major.
///
/// The solid extends down to `min_height`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeHeightField {
    x_dim: Real,
    y_dim: Real,
    heights: Vec<Real>,
    rows: usize,
    cols: usize,
    min_height: Real,
    bv: HeightFieldBv,
}

impl ShapeHeightField {
    pub fn new(
        x_dim: Real,
        y_dim: Real,
        rows: usize,
        cols: usize,
        heights: Vec<Real>,
        min_height: Real,
        bv: HeightFieldBv,
    ) -> Result<Self, ShapeError> {
        let expected = rows * cols;
        if expected == 0 || heights.len() != expected {
            return Err(ShapeError::HeightSampleCount {
                rows,
                cols,
                expected,
                found: heights.len(),
            });
        }
        Ok(ShapeHeightField {
            x_dim: x_dim.abs(),
            y_dim: y_dim.abs(),
            heights,
            rows,
            cols,
            min_height,
            bv,
        })
    }

    pub fn dims(&self) -> (Real, Real) {
        (self.x_dim, self.y_dim)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn height(&self, row: usize, col: usize) -> Option<Real> {
        if row < self.rows && col < self.cols {
            self.heights.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn min_height(&self) -> Real {
        self.min_height
    }

    pub fn bv(&self) -> HeightFieldBv {
        self.bv
    }
}

impl ShapeTrait for ShapeHeightField {
    fn kind(&self) -> ShapeKind {
        match self.bv {
            HeightFieldBv::Aabb => ShapeKind::HfAabb,
            HeightFieldBv::ObbRss => ShapeKind::HfObbRss,
        }
    }

    fn local_aabb(&self) -> Aabb {
        let (lo, hi) = self
            .heights
            .iter()
            .fold((Real::MAX, Real::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        Aabb::from_corners(
            Vec3::new(-0.5 * self.x_dim, -0.5 * self.y_dim, lo.min(self.min_height)),
            Vec3::new(0.5 * self.x_dim, 0.5 * self.y_dim, hi),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_height_field_bounds() {
        let hf = ShapeHeightField::new(
            4.0,
            2.0,
            2,
            3,
            vec![0.0, 1.0, 2.0, 0.5, 0.5, 3.0],
            -1.0,
            HeightFieldBv::ObbRss,
        )
        .unwrap();
        assert_eq!(hf.kind(), ShapeKind::HfObbRss);
        assert_eq!(hf.height(1, 2), Some(3.0));
        assert_eq!(hf.height(2, 0), None);

        let aabb = hf.local_aabb();
        assert_eq!(aabb.min, Vec3::new(-2.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_height_field_sample_count() {
        let err = ShapeHeightField::new(1.0, 1.0, 2, 2, vec![0.0; 3], 0.0, HeightFieldBv::Aabb);
        assert_eq!(
            err,
            Err(ShapeError::HeightSampleCount {
                rows: 2,
                cols: 2,
                expected: 4,
                found: 3
            })
        );
    }
}
