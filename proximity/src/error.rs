use crate::shapes::ShapeKind;
use thiserror::Error;

/// Failures surfaced by distance queries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("no distance routine registered for {first:?} / {second:?} in either order")]
    UnsupportedPair { first: ShapeKind, second: ShapeKind },
    #[error("{routine} distance routine cannot handle a {found:?} shape")]
    ShapeMismatch {
        routine: &'static str,
        found: ShapeKind,
    },
}

/// Invalid intrinsic parameters handed to a shape constructor.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    #[error("convex hull needs at least 4 points, got {count}")]
    NotEnoughPoints { count: usize },
    #[error("convex hull input is degenerate (collinear or coplanar points)")]
    DegenerateHull,
    #[error("triangle {triangle} references vertex {index} but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("mesh has no vertices")]
    EmptyMesh,
    #[error("height field expects {expected} samples ({rows} x {cols}), got {found}")]
    HeightSampleCount {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file")]
    Io(#[from] std::io::Error),
    #[error("malformed config")]
    Json(#[from] serde_json::Error),
}
