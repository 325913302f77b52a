//! Error taxonomy for point-set validation.

use thiserror::Error;

/// Reasons a candidate point list cannot be triangulated.
///
/// Collinear input is not represented here: it triangulates to an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Input is not a sequence of points.
    #[error("Points must be a list")]
    NotASequence,

    /// Zero points.
    #[error("PointSet is empty")]
    EmptySet,

    /// One or two points.
    #[error("Insufficient points for triangulation: got {count}, need at least 3")]
    InsufficientPoints { count: usize },

    /// Element is not a two-element pair.
    #[error("Invalid point format at index {index}")]
    MalformedPoint { index: usize },

    /// Pair holds a value that is not a number.
    #[error("Point coordinates must be numeric (index {index})")]
    NonNumericCoordinate { index: usize },

    #[error("NaN detected in coordinates (index {index})")]
    NaN { index: usize },

    #[error("Infinity detected in coordinates (index {index})")]
    Infinity { index: usize },

    /// Two points coincide within tolerance on both axes.
    #[error("Duplicate points detected (indices {first} and {second})")]
    DuplicatePoint { first: usize, second: usize },
}

impl GeometryError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotASequence => "NOT_A_SEQUENCE",
            Self::EmptySet => "EMPTY_POINT_SET",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::MalformedPoint { .. } => "MALFORMED_POINT",
            Self::NonNumericCoordinate { .. } => "NON_NUMERIC_COORDINATE",
            Self::NaN { .. } => "NAN_COORDINATE",
            Self::Infinity { .. } => "INFINITE_COORDINATE",
            Self::DuplicatePoint { .. } => "DUPLICATE_POINT",
        }
    }
}

/// Result type for validation and triangulation.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
