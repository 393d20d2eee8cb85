//! Errors raised by checked constructors.

use thiserror::Error;

/// Errors that can occur when building boxes or tree configurations from
/// untrusted input.
///
/// Tree operations themselves never fail; see the crate docs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KdTreeError {
    /// A box corner has `low > high` on some axis.
    #[error("inverted bounds on axis {axis}: low {low} > high {high}")]
    InvertedBounds { axis: usize, low: f32, high: f32 },

    /// A box corner has a NaN or infinite coordinate.
    #[error("non-finite bounds on axis {axis}")]
    NonFiniteBounds { axis: usize },

    /// The split threshold must allow at least one item per leaf.
    #[error("split threshold must be at least 1")]
    ZeroSplitThreshold,

    /// The maximum depth exceeds [`MAX_DEPTH_LIMIT`](crate::MAX_DEPTH_LIMIT).
    #[error("max depth {requested} exceeds the limit of {limit}")]
    MaxDepthTooLarge { requested: usize, limit: usize },
}
