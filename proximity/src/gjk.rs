use crate::math::glam_ext::Mat4Ext;
use crate::math::{Mat4, Real, Transform, Vec2, Vec3, Vec4};
use crate::shapes::SupportMap;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

fn signed_volume_1d(s1: Vec3, s2: Vec3) -> Vec2 {
    let ab = s2 - s1; // ray from a to b
    let ab_len_sq = ab.length_squared();
    if ab_len_sq <= Real::MIN_POSITIVE {
        return Vec2::X;
    }
    let ap = Vec3::ZERO - s1; // ray from a to origin
    let p0 = s1 + ab * ab.dot(ap) / ab_len_sq; // projection of the origin onto the line

    // Choose the axis with the greatest difference/length
    let mut idx = 0;
    let mut mu_max = 0.0;
    for i in 0..3 {
        let mu = s2[i] - s1[i];
        if mu * mu > mu_max * mu_max {
            mu_max = mu;
            idx = i;
        }
    }

    // Project the simplex points and projected origin onto the axis with the greatest length
    let a = s1[idx];
    let b = s2[idx];
    let p = p0[idx];

    // Get the signed distance from a to p and from p to b
    let c1 = p - a;
    let c2 = b - p;

    if (p > a && p < b) || (p > b && p < a) {
        // p is between [a,b]
        Vec2::new(c2 / mu_max, c1 / mu_max)
    } else if (a <= b && p <= a) || (a >= b && p >= a) {
        // p is on the far side of a
        Vec2::X
    } else {
        // p must be on the far side of b
        Vec2::Y
    }
}

fn compare_signs(a: Real, b: Real) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

/// Closest point to the origin on the edges of the triangle.
fn closest_on_edges(pts: [Vec3; 3]) -> Vec3 {
    let mut dist = Real::MAX;
    let mut lambdas = Vec3::X;
    for i in 0..3 {
        let k = (i + 1) % 3;
        let l = (i + 2) % 3;

        let lambda_edge = signed_volume_1d(pts[k], pts[l]);
        let pt = pts[k] * lambda_edge[0] + pts[l] * lambda_edge[1];
        if pt.length_squared() < dist {
            dist = pt.length_squared();
            lambdas[i] = 0.0;
            lambdas[k] = lambda_edge[0];
            lambdas[l] = lambda_edge[1];
        }
    }
    lambdas
}

fn signed_volume_2d(s1: Vec3, s2: Vec3, s3: Vec3) -> Vec3 {
    let normal = (s2 - s1).cross(s3 - s1);
    let normal_len_sq = normal.length_squared();
    if normal_len_sq <= Real::MIN_POSITIVE {
        return closest_on_edges([s1, s2, s3]);
    }
    let p0 = normal * s1.dot(normal) / normal_len_sq;

    // find the axis with the greatest projected area
    let mut idx = 0;
    let mut area_max = 0.0;
    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;

        let a = Vec2::new(s1[j], s1[k]);
        let b = Vec2::new(s2[j], s2[k]);
        let c = Vec2::new(s3[j], s3[k]);
        let ab = b - a;
        let ac = c - a;
        let area = ab.x * ac.y - ab.y * ac.x;
        if area * area > area_max * area_max {
            idx = i;
            area_max = area;
        }
    }

    // Project onto the appropriate axis
    let x = (idx + 1) % 3;
    let y = (idx + 2) % 3;
    let s = [
        Vec2::new(s1[x], s1[y]),
        Vec2::new(s2[x], s2[y]),
        Vec2::new(s3[x], s3[y]),
    ];
    let p = Vec2::new(p0[x], p0[y]);

    // sub-areas of the triangles formed from the projected origin and the edges
    let mut areas = Vec3::ZERO;
    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;

        let ab = s[j] - p;
        let ac = s[k] - p;

        areas[i] = ab.x * ac.y - ab.y * ac.x;
    }

    if (0..3).all(|i| compare_signs(area_max, areas[i])) {
        // projected origin is inside the triangle
        areas / area_max
    } else {
        closest_on_edges([s1, s2, s3])
    }
}

fn signed_volume_3d(s1: Vec3, s2: Vec3, s3: Vec3, s4: Vec3) -> Vec4 {
    let m = Mat4::from_cols(
        Vec4::new(s1.x, s2.x, s3.x, s4.x),
        Vec4::new(s1.y, s2.y, s3.y, s4.y),
        Vec4::new(s1.z, s2.z, s3.z, s4.z),
        Vec4::ONE,
    );

    let c4 = Vec4::new(
        m.cofactor(3, 0),
        m.cofactor(3, 1),
        m.cofactor(3, 2),
        m.cofactor(3, 3),
    );

    let det_m = c4[0] + c4[1] + c4[2] + c4[3];

    if (0..4).all(|i| compare_signs(det_m, c4[i])) {
        // origin is inside the simplex
        return c4 * det_m.recip();
    }

    // project the origin onto the faces and keep the closest one
    let face_pts = [s1, s2, s3, s4];
    let mut lambdas = Vec4::ZERO;
    let mut dist = Real::MAX;
    for i in 0..4 {
        let j = (i + 1) % 4;
        let k = (i + 2) % 4;

        let lambdas_face = signed_volume_2d(face_pts[i], face_pts[j], face_pts[k]);
        let pt = face_pts[i] * lambdas_face[0]
            + face_pts[j] * lambdas_face[1]
            + face_pts[k] * lambdas_face[2];
        if pt.length_squared() < dist {
            dist = pt.length_squared();
            let l = (i + 3) % 4;
            lambdas[i] = lambdas_face[0];
            lambdas[j] = lambdas_face[1];
            lambdas[k] = lambdas_face[2];
            lambdas[l] = 0.0;
        }
    }
    lambdas
}

/// Point of the Minkowski difference `A - B` together with the support points that formed it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct SimplexVertex {
    w: Vec3,
    a: Vec3,
    b: Vec3,
}

#[derive(Copy, Clone, Debug, Default)]
struct Simplex {
    verts: [SimplexVertex; 4],
    lambdas: [Real; 4],
    len: usize,
}

impl Simplex {
    fn single(vert: SimplexVertex) -> Self {
        let mut simplex = Simplex::default();
        simplex.verts[0] = vert;
        simplex.lambdas[0] = 1.0;
        simplex.len = 1;
        simplex
    }

    fn contains(&self, w: Vec3, tolerance_sq: Real) -> bool {
        self.verts[..self.len]
            .iter()
            .any(|vert| vert.w.distance_squared(w) <= tolerance_sq)
    }

    fn push(&mut self, vert: SimplexVertex) {
        self.verts[self.len] = vert;
        self.len += 1;
    }

    /// Finds the point of the simplex closest to the origin and drops the vertices that do
    /// not contribute to it.
    fn reduce(&mut self) {
        let v = &self.verts;
        let lambdas: [Real; 4] = match self.len {
            1 => [1.0, 0.0, 0.0, 0.0],
            2 => {
                let l = signed_volume_1d(v[0].w, v[1].w);
                [l.x, l.y, 0.0, 0.0]
            }
            3 => {
                let l = signed_volume_2d(v[0].w, v[1].w, v[2].w);
                [l.x, l.y, l.z, 0.0]
            }
            _ => signed_volume_3d(v[0].w, v[1].w, v[2].w, v[3].w).to_array(),
        };

        let mut reduced = Simplex::default();
        for i in 0..self.len {
            if lambdas[i] > 0.0 {
                reduced.verts[reduced.len] = self.verts[i];
                reduced.lambdas[reduced.len] = lambdas[i];
                reduced.len += 1;
            }
        }
        if reduced.len == 0 {
            reduced = Simplex::single(self.verts[0]);
        }
        *self = reduced;
    }

    fn closest(&self) -> SimplexVertex {
        self.verts[..self.len]
            .iter()
            .zip(&self.lambdas)
            .fold(SimplexVertex::default(), |acc, (vert, &l)| SimplexVertex {
                w: acc.w + vert.w * l,
                a: acc.a + vert.a * l,
                b: acc.b + vert.b * l,
            })
    }
}

/// Result of one GJK run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GjkOutcome {
    /// Separation distance, 0 when the shapes touch or overlap.
    pub distance: Real,
    pub witness_a: Vec3,
    pub witness_b: Vec3,
    /// `witness_a - witness_b`. Seeds the next run when warm starting.
    pub separation: Vec3,
    pub iterations: u32,
    pub converged: bool,
    pub overlap: bool,
}

/// Gilbert-Johnson-Keerthi distance solver for pairs of support-mapped shapes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GjkSolver {
    pub max_iterations: u32,
    /// Relative convergence tolerance on the squared separation.
    pub tolerance: Real,
}

impl Default for GjkSolver {
    fn default() -> Self {
        GjkSolver {
            max_iterations: 128,
            tolerance: 1.0e-8,
        }
    }
}

impl GjkSolver {
    pub fn new(max_iterations: u32, tolerance: Real) -> Self {
        GjkSolver {
            max_iterations,
            tolerance,
        }
    }

    /// Computes the distance between `a` placed at `tf_a` and `b` placed at `tf_b`.
    ///
    /// `guess` approximates `witness_a - witness_b`; a zero guess starts along the x axis.
    pub fn distance(
        &self,
        a: &dyn SupportMap,
        tf_a: &Transform,
        b: &dyn SupportMap,
        tf_b: &Transform,
        guess: Vec3,
    ) -> GjkOutcome {
        let support = |dir: Vec3| {
            let pa = tf_a.transform_point(a.local_support(tf_a.inverse_rotate(dir)));
            let pb = tf_b.transform_point(b.local_support(tf_b.inverse_rotate(-dir)));
            SimplexVertex {
                w: pa - pb,
                a: pa,
                b: pb,
            }
        };

        let tolerance_sq = self.tolerance * self.tolerance;
        let start = if guess.length_squared() > 0.0 && guess.is_finite() {
            guess
        } else {
            Vec3::X
        };

        let mut simplex = Simplex::single(support(-start));
        let mut closest = simplex.closest();
        let mut overlap = false;
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            let v = closest.w;
            let vv = v.length_squared();
            if vv <= tolerance_sq {
                overlap = true;
                converged = true;
                break;
            }

            let w = support(-v);
            if vv - v.dot(w.w) <= self.tolerance * vv || simplex.contains(w.w, tolerance_sq) {
                converged = true;
                break;
            }

            let previous = simplex;
            simplex.push(w);
            simplex.reduce();

            if simplex.len == 4 {
                overlap = true;
                converged = true;
                closest = simplex.closest();
                break;
            }

            let next = simplex.closest();
            if next.w.length_squared() >= vv {
                // no progress; the previous simplex is as close as this one gets
                simplex = previous;
                converged = true;
                break;
            }
            closest = next;
        }

        if !converged {
            warn!(
                iterations,
                distance = closest.w.length(),
                "GJK stopped at the iteration limit"
            );
        }

        let distance = if overlap { 0.0 } else { closest.w.length() };
        trace!(iterations, distance, overlap, simplex = simplex.len, "GJK finished");

        GjkOutcome {
            distance,
            witness_a: closest.a,
            witness_b: closest.b,
            separation: closest.w,
            iterations,
            converged,
            overlap,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Quat;
    use crate::shapes::{ShapeBox, ShapeCapsule, ShapeSphere};
    use approx::assert_relative_eq;

    #[test]
    fn test_signed_volume_projection() {
        let org_pts = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];

        let test_pts = |pts: [Vec3; 4], expected_lambdas: Vec4, expected_v: Vec3| {
            let lambdas = signed_volume_3d(pts[0], pts[1], pts[2], pts[3]);

            let mut v = Vec3::ZERO;
            for i in 0..4 {
                v += pts[i] * lambdas[i];
            }
            assert!(expected_lambdas.abs_diff_eq(lambdas, 1e-3), "{}", lambdas);
            assert!(expected_v.abs_diff_eq(v, 1e-3), "{}", v);
        };

        let mut pts = [Vec3::ZERO; 4];
        for i in 0..4 {
            pts[i] = org_pts[i] + Vec3::ONE;
        }
        test_pts(pts, Vec4::X, Vec3::ONE);

        for i in 0..4 {
            pts[i] = org_pts[i] - Vec3::ONE * 0.25;
        }
        test_pts(pts, Vec4::splat(0.25), Vec3::ZERO);

        for i in 0..4 {
            pts[i] = org_pts[i] - Vec3::ONE;
        }
        test_pts(
            pts,
            Vec4::new(0.0, 0.333, 0.333, 0.333),
            Vec3::splat(-0.667),
        );

        for i in 0..4 {
            pts[i] = org_pts[i] + Vec3::new(1.0, 1.0, -0.5);
        }
        test_pts(pts, Vec4::new(0.5, 0.0, 0.0, 0.5), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_degenerate_simplices() {
        assert_eq!(signed_volume_1d(Vec3::X, Vec3::X), Vec2::X);
        // collinear triangle falls back to the closest edge
        let (p, q) = (Vec3::new(1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let l = signed_volume_2d(p, Vec3::X, q);
        let pt = p * l.x + Vec3::X * l.y + q * l.z;
        assert!(pt.abs_diff_eq(Vec3::X, 1e-12));
    }

    #[test]
    fn test_separated_boxes() {
        let a = ShapeBox::new(Vec3::ONE);
        let b = ShapeBox::new(Vec3::ONE);
        let tf_b = Transform::from_translation(Vec3::new(3.5, 0.5, 0.0));
        let out = GjkSolver::default().distance(&a, &Transform::IDENTITY, &b, &tf_b, Vec3::ZERO);
        assert!(!out.overlap);
        assert!(out.converged);
        assert_relative_eq!(out.distance, 1.5, epsilon = 1e-6);
        assert_relative_eq!(out.witness_a.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(out.witness_b.x, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_overlapping_shapes() {
        let a = ShapeSphere::new(1.0);
        let b = ShapeBox::new(Vec3::splat(0.5));
        let tf_b = Transform::new(Quat::from_rotation_z(0.3), Vec3::new(0.8, 0.1, 0.0));
        let out = GjkSolver::default().distance(&a, &Transform::IDENTITY, &b, &tf_b, Vec3::ZERO);
        assert!(out.overlap);
        assert_eq!(out.distance, 0.0);
    }

    #[test]
    fn test_rotated_capsules() {
        let a = ShapeCapsule::new(0.5, 1.0);
        let tf_a = Transform::from_rotation(Quat::from_rotation_y(std::f64::consts::FRAC_PI_2));
        let tf_b = Transform::from_translation(Vec3::new(0.0, 3.0, 0.0));
        let out = GjkSolver::default().distance(&a, &tf_a, &a, &tf_b, Vec3::ZERO);
        assert_relative_eq!(out.distance, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_warm_start_agrees_with_cold_start() {
        let a = ShapeSphere::new(1.0);
        let b = ShapeBox::new(Vec3::new(0.5, 2.0, 0.25));
        let tf_b = Transform::new(Quat::from_rotation_x(0.4), Vec3::new(-2.0, 3.0, 1.0));
        let solver = GjkSolver::default();

        let cold = solver.distance(&a, &Transform::IDENTITY, &b, &tf_b, Vec3::ZERO);
        let warm = solver.distance(&a, &Transform::IDENTITY, &b, &tf_b, cold.separation);
        assert_relative_eq!(cold.distance, warm.distance, epsilon = 1e-6);
        assert!(warm.converged);
    }

    #[test]
    fn test_iteration_limit_returns_estimate() {
        let a = ShapeSphere::new(1.0);
        let tf_b = Transform::from_translation(Vec3::new(2.0, 3.0, 6.0));
        let out = GjkSolver::new(1, 1e-12).distance(&a, &Transform::IDENTITY, &a, &tf_b, Vec3::X);
        assert_eq!(out.iterations, 1);
        assert!(out.distance.is_finite());
        assert!(out.distance >= 5.0 - 1e-9);
    }
}
