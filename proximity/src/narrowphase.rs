//! Narrow-phase distance routines registered in the default dispatch table.
//!
//! Every routine receives the pair in table order, writes witness points only when the
//! request enables them and returns the separation distance, clamped to 0 on contact.

use crate::error::QueryError;
use crate::geometry::Geometry;
use crate::gjk::GjkSolver;
use crate::math::{Real, Transform, Vec3};
use crate::query::{DistanceRequest, DistanceResult, GjkInitialGuess};
use crate::shapes::{Shape, SupportMap};

/// Signature shared by all distance routines.
pub type DistanceFn = fn(
    &Geometry,
    &Transform,
    &Geometry,
    &Transform,
    &GjkSolver,
    &DistanceRequest,
    &mut DistanceResult,
) -> Result<Real, QueryError>;

fn support_map<'g>(
    geom: &'g Geometry,
    routine: &'static str,
) -> Result<&'g dyn SupportMap, QueryError> {
    geom.support_map().ok_or(QueryError::ShapeMismatch {
        routine,
        found: geom.kind(),
    })
}

/// Plane `normal . x = offset` of `b`'s local frame expressed in world space.
fn world_plane(normal: Vec3, offset: Real, tf: &Transform) -> (Vec3, Real) {
    let n = tf.rotate(normal);
    (n, offset + n.dot(tf.translation()))
}

pub fn sphere_sphere(
    a: &Geometry,
    tf_a: &Transform,
    b: &Geometry,
    tf_b: &Transform,
    _solver: &GjkSolver,
    request: &DistanceRequest,
    result: &mut DistanceResult,
) -> Result<Real, QueryError> {
    let radius = |geom: &Geometry| match geom.shape() {
        Shape::Sphere(sphere) => Ok(sphere.radius),
        _ => Err(QueryError::ShapeMismatch {
            routine: "sphere-sphere",
            found: geom.kind(),
        }),
    };
    let (ra, rb) = (radius(a)?, radius(b)?);

    let ca = tf_a.translation();
    let cb = tf_b.translation();
    let normal = (cb - ca).normalize_or_zero();
    let distance = (ca.distance(cb) - ra - rb).max(0.0);

    if request.enable_nearest_points {
        result.nearest_points = [ca + normal * ra, cb - normal * rb];
    }
    result.normal = normal;
    result.iterations = None;
    result.cached_gjk_guess = ca - cb;
    Ok(distance)
}

/// GJK between any two support-mapped shapes.
pub fn convex_convex(
    a: &Geometry,
    tf_a: &Transform,
    b: &Geometry,
    tf_b: &Transform,
    solver: &GjkSolver,
    request: &DistanceRequest,
    result: &mut DistanceResult,
) -> Result<Real, QueryError> {
    let sa = support_map(a, "gjk")?;
    let sb = support_map(b, "gjk")?;

    let guess = match request.gjk_initial_guess {
        GjkInitialGuess::DefaultGuess => Vec3::X,
        GjkInitialGuess::CachedGuess => request.cached_gjk_guess,
        GjkInitialGuess::BoundingVolumeGuess => {
            tf_a.transform_point(a.local_center()) - tf_b.transform_point(b.local_center())
        }
    };

    let outcome = solver.distance(sa, tf_a, sb, tf_b, guess);

    if request.enable_nearest_points {
        result.nearest_points = [outcome.witness_a, outcome.witness_b];
    }
    result.normal = if outcome.overlap {
        Vec3::ZERO
    } else {
        (-outcome.separation).normalize_or_zero()
    };
    result.iterations = Some(outcome.iterations);
    result.cached_gjk_guess = outcome.separation;
    Ok(outcome.distance)
}

/// Convex shape `a` against halfspace `b`.
pub fn convex_halfspace(
    a: &Geometry,
    tf_a: &Transform,
    b: &Geometry,
    tf_b: &Transform,
    _solver: &GjkSolver,
    request: &DistanceRequest,
    result: &mut DistanceResult,
) -> Result<Real, QueryError> {
    let sa = support_map(a, "halfspace")?;
    let Shape::Halfspace(halfspace) = b.shape() else {
        return Err(QueryError::ShapeMismatch {
            routine: "halfspace",
            found: b.kind(),
        });
    };
    let (n, d) = world_plane(halfspace.normal, halfspace.offset, tf_b);

    // deepest point of `a` into the halfspace
    let p = tf_a.transform_point(sa.local_support(tf_a.inverse_rotate(-n)));
    let depth = n.dot(p) - d;

    if request.enable_nearest_points {
        result.nearest_points = [p, p - n * depth];
    }
    result.normal = -n;
    result.iterations = None;
    result.cached_gjk_guess = n * depth;
    Ok(depth.max(0.0))
}

/// Convex shape `a` against the two-sided plane `b`.
pub fn convex_plane(
    a: &Geometry,
    tf_a: &Transform,
    b: &Geometry,
    tf_b: &Transform,
    _solver: &GjkSolver,
    request: &DistanceRequest,
    result: &mut DistanceResult,
) -> Result<Real, QueryError> {
    let sa = support_map(a, "plane")?;
    let Shape::Plane(plane) = b.shape() else {
        return Err(QueryError::ShapeMismatch {
            routine: "plane",
            found: b.kind(),
        });
    };
    let (n, d) = world_plane(plane.normal, plane.offset, tf_b);

    let support = |dir: Vec3| tf_a.transform_point(sa.local_support(tf_a.inverse_rotate(dir)));
    let p_neg = support(-n);
    let p_pos = support(n);
    let s_neg = n.dot(p_neg) - d;
    let s_pos = n.dot(p_pos) - d;

    let (p, signed_dist, normal) = if s_neg > 0.0 {
        (p_neg, s_neg, -n)
    } else if s_pos < 0.0 {
        (p_pos, s_pos, n)
    } else if -s_neg < s_pos {
        // straddling; report the side that reaches less far through the plane
        (p_neg, s_neg, -n)
    } else {
        (p_pos, s_pos, n)
    };

    let distance = if s_neg > 0.0 || s_pos < 0.0 {
        signed_dist.abs()
    } else {
        0.0
    };

    if request.enable_nearest_points {
        result.nearest_points = [p, p - n * signed_dist];
    }
    result.normal = normal;
    result.iterations = None;
    result.cached_gjk_guess = n * signed_dist;
    Ok(distance)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Quat;
    use crate::shapes::{ShapeBox, ShapeHalfspace, ShapePlane};
    use approx::assert_relative_eq;

    fn run(
        routine: DistanceFn,
        a: &Geometry,
        tf_a: &Transform,
        b: &Geometry,
        tf_b: &Transform,
    ) -> (Real, DistanceResult) {
        let request = DistanceRequest::default().with_nearest_points(true);
        let mut result = DistanceResult::default();
        let solver = GjkSolver::default();
        let dist = routine(a, tf_a, b, tf_b, &solver, &request, &mut result).unwrap();
        (dist, result)
    }

    #[test]
    fn test_sphere_sphere() {
        let a = Geometry::new(Shape::make_sphere(1.0));
        let b = Geometry::new(Shape::make_sphere(0.5));
        let tf_b = Transform::from_translation(Vec3::new(0.0, 4.0, 0.0));
        let (dist, result) = run(sphere_sphere, &a, &Transform::IDENTITY, &b, &tf_b);
        assert_relative_eq!(dist, 2.5);
        assert_eq!(result.normal, Vec3::Y);
        assert_eq!(result.nearest_points, [Vec3::Y, Vec3::new(0.0, 3.5, 0.0)]);

        let tf_b = Transform::from_translation(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(run(sphere_sphere, &a, &Transform::IDENTITY, &b, &tf_b).0, 0.0);
    }

    #[test]
    fn test_box_above_halfspace() {
        let a = Geometry::new(ShapeBox::new(Vec3::splat(0.5)));
        let b = Geometry::new(ShapeHalfspace::new(Vec3::Z, 0.0));
        let tf_a = Transform::from_translation(Vec3::new(0.0, 0.0, 3.0));
        let tf_b = Transform::new(Quat::IDENTITY, Vec3::new(0.0, 0.0, 1.0));
        let (dist, result) = run(convex_halfspace, &a, &tf_a, &b, &tf_b);
        assert_relative_eq!(dist, 1.5);
        assert_eq!(result.normal, -Vec3::Z);
        assert_relative_eq!(result.nearest_points[1].z, 1.0);

        let tf_a = Transform::from_translation(Vec3::new(0.0, 0.0, 1.2));
        assert_eq!(run(convex_halfspace, &a, &tf_a, &b, &tf_b).0, 0.0);
    }

    #[test]
    fn test_plane_from_below_and_straddling() {
        let a = Geometry::new(Shape::make_sphere(1.0));
        let b = Geometry::new(ShapePlane::new(Vec3::X, 2.0));
        let (dist, result) = run(convex_plane, &a, &Transform::IDENTITY, &b, &Transform::IDENTITY);
        assert_relative_eq!(dist, 1.0);
        assert_eq!(result.normal, Vec3::X);
        assert_relative_eq!(result.nearest_points[1].x, 2.0);

        let tf_a = Transform::from_translation(Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(run(convex_plane, &a, &tf_a, &b, &Transform::IDENTITY).0, 0.0);
    }

    #[test]
    fn test_wrong_shape_is_reported() {
        let a = Geometry::new(Shape::make_sphere(1.0));
        let b = Geometry::new(ShapeBox::new(Vec3::ONE));
        let mut result = DistanceResult::default();
        let err = sphere_sphere(
            &a,
            &Transform::IDENTITY,
            &b,
            &Transform::IDENTITY,
            &GjkSolver::default(),
            &DistanceRequest::default(),
            &mut result,
        );
        assert!(matches!(err, Err(QueryError::ShapeMismatch { .. })));
    }
}
