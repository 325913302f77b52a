//! Error types for PointSet / Triangle-set decoding and encoding.

use thiserror::Error;

/// Errors raised by the binary codec.
///
/// Every variant is raised at the point of detection; the codec never
/// returns a partially decoded value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Buffer malformed, truncated, or internally inconsistent.
    #[error("invalid binary format: {0}")]
    Format(String),

    /// A triangle references a point index outside `[0, point_count)`.
    #[error("triangle {triangle}: index {index} out of range for {point_count} points")]
    IndexRange {
        /// Position of the offending triangle in the triangle list.
        triangle: usize,
        /// The out-of-range index.
        index: usize,
        /// Number of points the indices refer to.
        point_count: usize,
    },

    /// A triangle's three indices are not pairwise distinct.
    #[error("triangle {triangle} has duplicate vertices {indices:?}")]
    DuplicateVertex {
        /// Position of the offending triangle in the triangle list.
        triangle: usize,
        /// The three indices as read from the buffer.
        indices: [usize; 3],
    },
}

impl CodecError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Format(_) => "INVALID_FORMAT",
            Self::IndexRange { .. } => "INDEX_OUT_OF_RANGE",
            Self::DuplicateVertex { .. } => "DUPLICATE_VERTEX",
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

#[cold]
pub(crate) fn bad(msg: impl Into<String>) -> CodecError {
    CodecError::Format(msg.into())
}
