use super::{Mat3, Mat4, Real, Vec3};

pub trait Mat4Ext {
    fn minor(&self, i: usize, j: usize) -> Mat3;
    fn cofactor(&self, i: usize, j: usize) -> Real;
}

impl Mat4Ext for Mat4 {
    fn minor(&self, i: usize, j: usize) -> Mat3 {
        let mut minor = Mat3::ZERO;
        let mut yy = 0;
        for y in 0..4 {
            if y == j {
                continue;
            }

            let mut xx = 0;
            for x in 0..4 {
                if x == i {
                    continue;
                }

                minor.col_mut(xx)[yy] = self.col(x)[y];
                xx += 1;
            }

            yy += 1;
        }
        minor
    }

    fn cofactor(&self, i: usize, j: usize) -> Real {
        let minor = self.minor(i, j);
        let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
        sign * minor.determinant()
    }
}

pub trait Vec3Ext {
    /// Outer product `self * rhs^T`.
    fn outer(self, rhs: Vec3) -> Mat3;
}

impl Vec3Ext for Vec3 {
    fn outer(self, rhs: Vec3) -> Mat3 {
        Mat3::from_cols(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}

#[test]
fn test_outer_product() {
    let m = Vec3::new(1.0, 2.0, 3.0).outer(Vec3::new(4.0, 5.0, 6.0));
    // column j holds lhs * rhs[j], so row i / column j is lhs[i] * rhs[j]
    assert_eq!(m.col(0), Vec3::new(4.0, 8.0, 12.0));
    assert_eq!(m.col(2), Vec3::new(6.0, 12.0, 18.0));
    assert_eq!(m.col(1)[2], 15.0);
}

#[test]
fn test_cofactor_of_identity() {
    let m = Mat4::IDENTITY;
    for i in 0..4 {
        assert_eq!(m.cofactor(i, i), 1.0);
    }
    assert_eq!(m.cofactor(0, 1), 0.0);
}
