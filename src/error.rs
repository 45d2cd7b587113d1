use thiserror::Error;

use crate::handles::FixedVertexHandle;
use crate::Point2;

/// Result type used by [DelaunayInterpolator](crate::DelaunayInterpolator).
pub type InterpResult<T> = Result<T, InterpError>;

/// The error type used for inserting elements into a triangulation.
///
/// A failed insertion never modifies the triangulation.
#[derive(Error, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InsertionError {
    /// A coordinate value was too small.
    ///
    /// The absolute value of any inserted vertex coordinate must either be zero or
    /// greater than or equal to [crate::MIN_ALLOWED_VALUE].
    #[error("coordinate is too small, its absolute value must be 0 or at least 2^-142")]
    TooSmall,

    /// A coordinate value was too large (or not finite).
    ///
    /// The absolute value of any inserted vertex coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE].
    #[error("coordinate is too large, its absolute value must be at most 2^201")]
    TooLarge,

    /// A coordinate value was NaN.
    #[error("coordinate is NaN")]
    NAN,

    /// The position coincides with the position of an existing vertex.
    #[error("position is already occupied by vertex {}", .0.index())]
    Duplicate(FixedVertexHandle),
}

/// Errors reported by [DelaunayInterpolator](crate::DelaunayInterpolator).
#[derive(Error, Clone, PartialEq, Debug)]
pub enum InterpError {
    /// A coordinate sequence did not contain exactly two values.
    #[error("expected a point with 2 coordinates, got {actual}")]
    InvalidPointShape {
        /// Length of the rejected sequence.
        actual: usize,
    },

    /// A coordinate cannot be used for exact geometric predicates.
    #[error("invalid coordinate in point ({}, {}): {reason}", point.x, point.y)]
    InvalidCoordinate {
        /// The rejected point.
        point: Point2<f64>,
        /// Why the point was rejected.
        reason: InsertionError,
    },

    /// The query point lies outside of the convex hull of all inserted points.
    #[error("point ({}, {}) lies outside of the triangulated domain", point.x, point.y)]
    OutsideDomain {
        /// The query point.
        point: Point2<f64>,
    },

    /// The query requires a triangle but all inserted points are collinear.
    #[error("no triangle available at ({}, {}), all inserted points are collinear", point.x, point.y)]
    Degenerate {
        /// The query point.
        point: Point2<f64>,
    },

    /// The point has already been inserted. The interpolator is left unchanged.
    #[error("point ({}, {}) coincides with vertex {existing}", point.x, point.y)]
    DuplicatePoint {
        /// The rejected point.
        point: Point2<f64>,
        /// Id of the vertex occupying this position.
        existing: usize,
    },

    /// A value was requested from the value function but none is bound.
    #[error("no value function is bound, a value for ({}, {}) must be given explicitly", point.x, point.y)]
    MissingValueFunction {
        /// The point whose value was requested.
        point: Point2<f64>,
    },

    /// An inserted function value was NaN or infinite.
    #[error("value {value} at ({}, {}) is not finite", point.x, point.y)]
    NonFiniteValue {
        /// The point the value belongs to.
        point: Point2<f64>,
        /// The rejected value.
        value: f64,
    },

    /// No triangle has an evaluated error yet.
    #[error("the error queue is empty")]
    EmptyErrorQueue,
}

impl InterpError {
    pub(crate) fn from_insertion(point: Point2<f64>, error: InsertionError) -> Self {
        match error {
            InsertionError::Duplicate(existing) => InterpError::DuplicatePoint {
                point,
                existing: existing.index(),
            },
            reason => InterpError::InvalidCoordinate { point, reason },
        }
    }
}
