use crate::math::{Real, Vec3};
use serde::{Deserialize, Serialize};

/// Where the GJK solver takes its first search direction from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GjkInitialGuess {
    /// A fixed axis.
    #[default]
    DefaultGuess,
    /// [`DistanceRequest::cached_gjk_guess`], typically fed back from the previous result.
    CachedGuess,
    /// The offset between the centers of the two shapes' local bounds.
    BoundingVolumeGuess,
}

/// Per-call parameters of a distance query.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceRequest {
    pub enable_nearest_points: bool,
    /// Relative error bound for approximate routines. The built-in routines ignore it.
    pub rel_err: Real,
    /// Absolute error bound for approximate routines. The built-in routines ignore it.
    pub abs_err: Real,
    pub gjk_initial_guess: GjkInitialGuess,
    pub cached_gjk_guess: Vec3,
}

impl Default for DistanceRequest {
    fn default() -> Self {
        DistanceRequest {
            enable_nearest_points: false,
            rel_err: 0.0,
            abs_err: 0.0,
            gjk_initial_guess: GjkInitialGuess::DefaultGuess,
            cached_gjk_guess: Vec3::X,
        }
    }
}

impl DistanceRequest {
    pub fn with_nearest_points(mut self, enable: bool) -> Self {
        self.enable_nearest_points = enable;
        self
    }

    /// Requests warm starting from the guess stored in this request.
    pub fn with_cached_guess(mut self, guess: Vec3) -> Self {
        self.gjk_initial_guess = GjkInitialGuess::CachedGuess;
        self.cached_gjk_guess = guess;
        self
    }

    /// Carries the solver state of `result` into the next query. Only has an effect when the
    /// request warm starts from a cached guess.
    pub fn update_guess(&mut self, result: &DistanceResult) {
        if self.gjk_initial_guess == GjkInitialGuess::CachedGuess {
            self.cached_gjk_guess = result.cached_gjk_guess;
        }
    }
}

/// Outcome of a distance query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceResult {
    /// Separation distance. 0 when the shapes touch or overlap.
    pub min_distance: Real,
    /// Witness points in world space, on shape a then shape b. Only written when the
    /// request enables them.
    pub nearest_points: [Vec3; 2],
    /// Unit direction from shape a toward shape b, zero when undefined.
    pub normal: Vec3,
    /// Solver iterations, `None` for closed-form routines.
    pub iterations: Option<u32>,
    /// Separation vector `a - b` left by the solver, used to warm start the next query.
    pub cached_gjk_guess: Vec3,
}

impl Default for DistanceResult {
    fn default() -> Self {
        DistanceResult {
            min_distance: Real::MAX,
            nearest_points: [Vec3::ZERO; 2],
            normal: Vec3::ZERO,
            iterations: None,
            cached_gjk_guess: Vec3::X,
        }
    }
}

impl DistanceResult {
    /// Keeps whichever of `self` and `other` has the smaller distance.
    pub fn update(&mut self, other: &DistanceResult) {
        if other.min_distance < self.min_distance {
            *self = *other;
        }
    }

    /// Maps a result computed on `(b, a)` back to the caller's `(a, b)` order.
    pub(crate) fn swap_roles(&mut self) {
        self.nearest_points.swap(0, 1);
        self.normal = -self.normal;
        self.cached_gjk_guess = -self.cached_gjk_guess;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_update_keeps_smaller() {
        let mut best = DistanceResult::default();
        let near = DistanceResult {
            min_distance: 0.5,
            ..Default::default()
        };
        let far = DistanceResult {
            min_distance: 2.0,
            ..Default::default()
        };
        best.update(&far);
        best.update(&near);
        best.update(&far);
        assert_eq!(best.min_distance, 0.5);
    }

    #[test]
    fn test_update_guess_only_when_cached() {
        let result = DistanceResult {
            cached_gjk_guess: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };

        let mut request = DistanceRequest::default();
        request.update_guess(&result);
        assert_eq!(request.cached_gjk_guess, Vec3::X);

        let mut request = DistanceRequest::default().with_cached_guess(Vec3::Y);
        request.update_guess(&result);
        assert_eq!(request.cached_gjk_guess, Vec3::new(1.0, 2.0, 3.0));
    }
}
