//! Geometry model and distance queries for rigid shapes.
//!
//! A [`Geometry`] wraps a [`Shape`] and lazily caches its local bound. A [`CollisionObject`]
//! places a shared geometry in the world and caches its world bound. Distances between two
//! shapes go through a [`DistanceCache`], which resolves the routine for the pair of shape
//! kinds once, or through the one-shot [`distance()`] functions.

pub mod bounds;
mod config;
mod dispatch;
mod distance;
mod error;
mod geometry;
mod gjk;
pub mod math;
pub mod narrowphase;
mod object;
mod query;
pub mod shapes;

pub use config::QueryConfig;
pub use dispatch::DispatchTable;
pub use distance::{
    distance, distance_geometry, distance_geometry_with_guess, distance_with_guess,
    DistanceCache,
};
pub use error::{ConfigError, QueryError, ShapeError};
pub use geometry::{Geometry, LocalBound, UserData};
pub use gjk::{GjkOutcome, GjkSolver};
pub use narrowphase::DistanceFn;
pub use object::CollisionObject;
pub use query::{DistanceRequest, DistanceResult, GjkInitialGuess};
pub use shapes::{ObjectType, Shape, ShapeKind};
