use crate::dispatch::DispatchTable;
use crate::error::QueryError;
use crate::geometry::Geometry;
use crate::gjk::GjkSolver;
use crate::math::Transform;
use crate::narrowphase::DistanceFn;
use crate::object::CollisionObject;
use crate::query::{DistanceRequest, DistanceResult};
use std::cell::Cell;
use std::fmt;
use tracing::{debug, instrument, trace};

/// Distance query bound to one pair of shapes.
///
/// The routine is looked up once at construction, so repeated queries between the same two
/// shapes only pay for the routine itself as their poses change.
pub struct DistanceCache<'a> {
    shape_a: Cell<&'a Geometry>,
    shape_b: Cell<&'a Geometry>,
    swap: bool,
    solver: GjkSolver,
    routine: DistanceFn,
}

impl<'a> DistanceCache<'a> {
    pub fn new(a: &'a Geometry, b: &'a Geometry) -> Result<Self, QueryError> {
        Self::with_solver(a, b, GjkSolver::default())
    }

    pub fn with_solver(
        a: &'a Geometry,
        b: &'a Geometry,
        solver: GjkSolver,
    ) -> Result<Self, QueryError> {
        Self::with_table(DispatchTable::global(), a, b, solver)
    }

    /// Resolves the pair against `table`. Fails with [`QueryError::UnsupportedPair`] when
    /// neither ordering of the two kinds has a routine.
    #[instrument(level = "debug", skip_all, fields(a = ?a.kind(), b = ?b.kind()))]
    pub fn with_table(
        table: &DispatchTable,
        a: &'a Geometry,
        b: &'a Geometry,
        solver: GjkSolver,
    ) -> Result<Self, QueryError> {
        let (routine, swap) = table.resolve(a.kind(), b.kind())?;
        debug!(swap, "resolved distance routine");
        Ok(DistanceCache {
            shape_a: Cell::new(a),
            shape_b: Cell::new(b),
            swap,
            solver,
            routine,
        })
    }

    pub fn shape_a(&self) -> &'a Geometry {
        self.shape_a.get()
    }

    pub fn shape_b(&self) -> &'a Geometry {
        self.shape_b.get()
    }

    pub fn is_swapped(&self) -> bool {
        self.swap
    }

    pub fn solver(&self) -> &GjkSolver {
        &self.solver
    }

    /// Points the cache at different shapes without resolving again. The new shapes must
    /// have the same kinds as the ones the cache was built for.
    pub fn rebind_shapes(&self, a: &'a Geometry, b: &'a Geometry) {
        debug_assert_eq!(a.kind(), self.shape_a.get().kind());
        debug_assert_eq!(b.kind(), self.shape_b.get().kind());
        self.shape_a.set(a);
        self.shape_b.set(b);
    }

    pub fn compute(
        &self,
        tf_a: &Transform,
        tf_b: &Transform,
        request: &DistanceRequest,
    ) -> Result<DistanceResult, QueryError> {
        run_routine(
            self.routine,
            self.swap,
            &self.solver,
            self.shape_a.get(),
            tf_a,
            self.shape_b.get(),
            tf_b,
            request,
        )
    }

    /// Like [`DistanceCache::compute`], then stores the solver state in `request` for the
    /// next query.
    pub fn compute_with_guess(
        &self,
        tf_a: &Transform,
        tf_b: &Transform,
        request: &mut DistanceRequest,
    ) -> Result<DistanceResult, QueryError> {
        let result = self.compute(tf_a, tf_b, request)?;
        request.update_guess(&result);
        Ok(result)
    }
}

impl PartialEq for DistanceCache<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.shape_a.get(), other.shape_a.get())
            && std::ptr::eq(self.shape_b.get(), other.shape_b.get())
            && self.swap == other.swap
            && self.solver == other.solver
            && self.routine as usize == other.routine as usize
    }
}

impl fmt::Debug for DistanceCache<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistanceCache")
            .field("a", &self.shape_a.get().kind())
            .field("b", &self.shape_b.get().kind())
            .field("swap", &self.swap)
            .field("solver", &self.solver)
            .finish()
    }
}

#[allow(clippy::too_many_arguments)]
fn run_routine(
    routine: DistanceFn,
    swap: bool,
    solver: &GjkSolver,
    a: &Geometry,
    tf_a: &Transform,
    b: &Geometry,
    tf_b: &Transform,
    request: &DistanceRequest,
) -> Result<DistanceResult, QueryError> {
    let mut result = DistanceResult::default();
    let min_distance = if swap {
        // the routine sees (b, a), so its warm start points the other way
        let mut swapped = *request;
        swapped.cached_gjk_guess = -request.cached_gjk_guess;
        let dist = routine(b, tf_b, a, tf_a, solver, &swapped, &mut result)?;
        result.swap_roles();
        dist
    } else {
        routine(a, tf_a, b, tf_b, solver, request, &mut result)?
    };
    result.min_distance = min_distance;
    trace!(
        distance = result.min_distance,
        iterations = ?result.iterations,
        swap,
        "distance query"
    );
    Ok(result)
}

/// Distance between two placed objects.
pub fn distance(
    o1: &CollisionObject,
    o2: &CollisionObject,
    request: &DistanceRequest,
) -> Result<DistanceResult, QueryError> {
    distance_geometry(o1.geometry(), o1.transform(), o2.geometry(), o2.transform(), request)
}

/// Like [`distance`], then stores the solver state in `request` for the next query.
pub fn distance_with_guess(
    o1: &CollisionObject,
    o2: &CollisionObject,
    request: &mut DistanceRequest,
) -> Result<DistanceResult, QueryError> {
    distance_geometry_with_guess(
        o1.geometry(),
        o1.transform(),
        o2.geometry(),
        o2.transform(),
        request,
    )
}

/// Distance between two geometries at the given poses, using the default table and solver.
pub fn distance_geometry(
    g1: &Geometry,
    tf1: &Transform,
    g2: &Geometry,
    tf2: &Transform,
    request: &DistanceRequest,
) -> Result<DistanceResult, QueryError> {
    DistanceCache::new(g1, g2)?.compute(tf1, tf2, request)
}

pub fn distance_geometry_with_guess(
    g1: &Geometry,
    tf1: &Transform,
    g2: &Geometry,
    tf2: &Transform,
    request: &mut DistanceRequest,
) -> Result<DistanceResult, QueryError> {
    DistanceCache::new(g1, g2)?.compute_with_guess(tf1, tf2, request)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Vec3;
    use crate::shapes::{Shape, ShapeBox, ShapeHalfspace};
    use approx::assert_relative_eq;

    #[test]
    fn test_swapped_pair_maps_back_to_caller_order() {
        let plane = Geometry::new(ShapeHalfspace::new(Vec3::Z, 0.0));
        let ball = Geometry::new(Shape::make_sphere(1.0));
        let tf_ball = Transform::from_translation(Vec3::new(0.0, 0.0, 3.0));
        let request = DistanceRequest::default().with_nearest_points(true);

        let cache = DistanceCache::new(&plane, &ball).unwrap();
        assert!(cache.is_swapped());
        let result = cache.compute(&Transform::IDENTITY, &tf_ball, &request).unwrap();

        assert_relative_eq!(result.min_distance, 2.0);
        assert!(result.nearest_points[0].abs_diff_eq(Vec3::ZERO, 1e-12));
        assert!(result.nearest_points[1].abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-12));
        assert_eq!(result.normal, Vec3::Z);
    }

    #[test]
    fn test_rebind_keeps_resolution() {
        let a = Geometry::new(ShapeBox::new(Vec3::ONE));
        let b = Geometry::new(ShapeBox::new(Vec3::ONE));
        let c = Geometry::new(ShapeBox::new(Vec3::splat(2.0)));
        let tf_b = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0));

        let cache = DistanceCache::new(&a, &b).unwrap();
        let request = DistanceRequest::default();
        let before = cache.compute(&Transform::IDENTITY, &tf_b, &request).unwrap();
        assert_relative_eq!(before.min_distance, 3.0, epsilon = 1e-6);

        cache.rebind_shapes(&a, &c);
        assert!(std::ptr::eq(cache.shape_b(), &c));
        let after = cache.compute(&Transform::IDENTITY, &tf_b, &request).unwrap();
        assert_relative_eq!(after.min_distance, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_nearest_points_untouched_when_disabled() {
        let a = Geometry::new(Shape::make_sphere(1.0));
        let tf_b = Transform::from_translation(Vec3::new(4.0, 0.0, 0.0));
        let request = DistanceRequest::default();
        let result = distance_geometry(&a, &Transform::IDENTITY, &a, &tf_b, &request).unwrap();
        assert_relative_eq!(result.min_distance, 2.0);
        assert_eq!(result.nearest_points, [Vec3::ZERO; 2]);
    }
}
