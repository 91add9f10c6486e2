use approx::assert_relative_eq;
use proximity::math::{Quat, Transform, Vec3};
use proximity::narrowphase;
use proximity::shapes::{
    BvKind, ShapeCapsule, ShapeConvex, ShapeHalfspace, ShapeMesh, ShapeOctree, ShapePlane,
};
use proximity::{
    distance, distance_geometry, distance_geometry_with_guess, distance_with_guess,
    CollisionObject, DispatchTable, DistanceCache, DistanceRequest, Geometry, GjkInitialGuess,
    GjkSolver, QueryError, Shape, ShapeKind,
};
use std::sync::Arc;

fn octahedron() -> Geometry {
    let verts = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z];
    Geometry::new(ShapeConvex::from_points(&verts).unwrap())
}

#[test]
fn swapped_pair_reports_points_in_caller_order() {
    let floor = Arc::new(Geometry::new(ShapeHalfspace::new(Vec3::Y, -1.0)));
    let ball = Arc::new(Geometry::new(Shape::make_sphere(0.5)));
    let floor_obj = CollisionObject::new(floor);
    let ball_obj = CollisionObject::with_transform(
        ball,
        Transform::from_translation(Vec3::new(3.0, 2.0, -1.0)),
    );
    let request = DistanceRequest::default().with_nearest_points(true);

    let direct = distance(&ball_obj, &floor_obj, &request).unwrap();
    let swapped = distance(&floor_obj, &ball_obj, &request).unwrap();

    assert_relative_eq!(direct.min_distance, 2.5);
    assert_relative_eq!(swapped.min_distance, 2.5);
    assert_eq!(direct.nearest_points[0], swapped.nearest_points[1]);
    assert_eq!(direct.nearest_points[1], swapped.nearest_points[0]);
    assert_eq!(direct.normal, -swapped.normal);

    // the point on the floor really is on the floor
    assert_relative_eq!(swapped.nearest_points[0].y, -1.0);
    assert_relative_eq!(swapped.nearest_points[1].y, 1.5);
}

#[test]
fn unsupported_pairs_fail_at_construction() {
    let mesh = Geometry::new(
        ShapeMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]], BvKind::Obb)
            .unwrap(),
    );
    let octree = Geometry::new(ShapeOctree::new(0.1, 5));
    let halfspace = Geometry::new(ShapeHalfspace::new(Vec3::Z, 0.0));
    let plane = Geometry::new(ShapePlane::new(Vec3::Z, 0.0));
    let ball = Geometry::new(Shape::make_sphere(1.0));

    for (a, b) in [
        (&mesh, &ball),
        (&ball, &octree),
        (&octree, &mesh),
        (&halfspace, &halfspace),
        (&plane, &halfspace),
    ] {
        let err = DistanceCache::new(a, b).unwrap_err();
        assert_eq!(
            err,
            QueryError::UnsupportedPair {
                first: a.kind(),
                second: b.kind()
            }
        );
        let one_shot = distance_geometry(
            a,
            &Transform::IDENTITY,
            b,
            &Transform::IDENTITY,
            &DistanceRequest::default(),
        );
        assert_eq!(one_shot.unwrap_err(), err);
    }
}

#[test]
fn cache_equality_tracks_identity_and_binding() {
    let a = octahedron();
    let b = Geometry::new(ShapeCapsule::new(0.5, 1.0));
    let twin = Geometry::new(ShapeCapsule::new(0.5, 1.0));

    let first = DistanceCache::new(&a, &b).unwrap();
    let second = DistanceCache::new(&a, &b).unwrap();
    assert_eq!(first, second);

    let other_shape = DistanceCache::new(&a, &twin).unwrap();
    assert_ne!(first, other_shape);

    let other_solver = DistanceCache::with_solver(&a, &b, GjkSolver::new(8, 1e-6)).unwrap();
    assert_ne!(first, other_solver);

    let reversed = DistanceCache::new(&b, &a).unwrap();
    assert_ne!(first, reversed);

    other_shape.rebind_shapes(&a, &b);
    assert_eq!(first, other_shape);
}

#[test]
fn warm_start_agrees_with_cold_start() {
    let a = octahedron();
    let b = Geometry::new(ShapeCapsule::new(0.3, 0.8));
    let tf_a = Transform::from_rotation(Quat::from_rotation_z(0.2));
    let cache = DistanceCache::new(&a, &b).unwrap();

    let cold = DistanceRequest::default().with_nearest_points(true);
    let mut warm = DistanceRequest {
        gjk_initial_guess: GjkInitialGuess::CachedGuess,
        ..cold
    };

    for step in 0..40 {
        let t = step as f64 * 0.1;
        let tf_b = Transform::new(
            Quat::from_rotation_x(t),
            Vec3::new(2.5 + t.sin(), 1.0 - 0.5 * t, 0.25 * t),
        );
        let reference = cache.compute(&tf_a, &tf_b, &cold).unwrap();
        let seeded = cache.compute_with_guess(&tf_a, &tf_b, &mut warm).unwrap();

        assert_relative_eq!(reference.min_distance, seeded.min_distance, epsilon = 1e-6);
        assert_eq!(warm.cached_gjk_guess, seeded.cached_gjk_guess);
    }
}

#[test]
fn read_only_entry_points_leave_guess_alone() {
    let a = Arc::new(octahedron());
    let b = Arc::new(Geometry::new(Shape::make_box(Vec3::splat(0.5))));
    let obj_a = CollisionObject::new(a.clone());
    let tf_b = Transform::from_translation(Vec3::new(0.0, 4.0, 0.0));
    let obj_b = CollisionObject::with_transform(b.clone(), tf_b);

    let request = DistanceRequest::default().with_cached_guess(Vec3::Z);
    let result = distance(&obj_a, &obj_b, &request).unwrap();
    assert_relative_eq!(result.min_distance, 2.5, epsilon = 1e-6);
    assert_eq!(request.cached_gjk_guess, Vec3::Z);

    let mut request = DistanceRequest::default().with_cached_guess(Vec3::Z);
    let result = distance_with_guess(&obj_a, &obj_b, &mut request).unwrap();
    assert_eq!(request.cached_gjk_guess, result.cached_gjk_guess);
    assert!(request.cached_gjk_guess.y < 0.0);

    let mut request = DistanceRequest::default().with_cached_guess(Vec3::Z);
    let result =
        distance_geometry_with_guess(&a, &Transform::IDENTITY, &b, &tf_b, &mut request).unwrap();
    assert_relative_eq!(result.min_distance, 2.5, epsilon = 1e-6);
    assert_eq!(request.cached_gjk_guess, result.cached_gjk_guess);
}

#[test]
fn swapped_warm_start_is_flipped_for_the_routine() {
    let floor = Geometry::new(ShapePlane::new(Vec3::Z, 0.0));
    let hull = octahedron();
    let tf_hull = Transform::from_translation(Vec3::new(0.0, 0.0, 3.0));
    let cache = DistanceCache::new(&floor, &hull).unwrap();
    assert!(cache.is_swapped());

    let mut request = DistanceRequest::default().with_cached_guess(Vec3::X);
    let result = cache
        .compute_with_guess(&Transform::IDENTITY, &tf_hull, &mut request)
        .unwrap();
    assert_relative_eq!(result.min_distance, 2.0);
    assert_eq!(result.normal, Vec3::Z);
    // separation is reported as floor minus hull
    assert!(request.cached_gjk_guess.z < 0.0);
}

#[test]
fn custom_table_extends_dispatch() {
    let mut table = DispatchTable::empty();
    let a = Geometry::new(Shape::make_sphere(1.0));
    let b = octahedron();
    assert!(DistanceCache::with_table(&table, &a, &b, GjkSolver::default()).is_err());

    table.register(ShapeKind::Convex, ShapeKind::Sphere, narrowphase::convex_convex);
    let cache = DistanceCache::with_table(&table, &a, &b, GjkSolver::default()).unwrap();
    assert!(cache.is_swapped());

    let tf_b = Transform::from_translation(Vec3::new(0.0, 0.0, -5.0));
    let result = cache
        .compute(&Transform::IDENTITY, &tf_b, &DistanceRequest::default())
        .unwrap();
    assert_relative_eq!(result.min_distance, 3.0, epsilon = 1e-6);
    assert!(result.iterations.is_some());
}

#[test]
fn bounding_volume_guess_converges() {
    let a = octahedron();
    let b = Geometry::new(ShapeCapsule::new(0.25, 0.5));
    let request = DistanceRequest {
        gjk_initial_guess: GjkInitialGuess::BoundingVolumeGuess,
        ..Default::default()
    };
    let tf_b = Transform::from_translation(Vec3::new(-3.0, 0.0, 0.0));
    let result = distance_geometry(&a, &Transform::IDENTITY, &b, &tf_b, &request).unwrap();
    assert_relative_eq!(result.min_distance, 1.75, epsilon = 1e-6);
}
