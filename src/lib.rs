//! Scattered data interpolation on top of an incremental 2D Delaunay triangulation.
//!
//! Samples `(x, y, f(x, y))` are inserted into a [DelaunayTriangulation]. Queries evaluate
//! the piecewise linear interpolant of the triangle containing the query point.
//!
//! When a value function is bound, the interpolator estimates the interpolation error of
//! every triangle and can adaptively refine itself by sampling the function where the
//! estimated error is largest. See [DelaunayInterpolator] for an overview.
//!
//! All geometric decisions (orientation, in-circle tests) are made with exact predicates
//! provided by the `robust` crate.
//!
//! # Cargo features
//! * `serde`: (De)serialization support for points and the exported records.
#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod bounded_side;
mod delaunay_core;
mod delaunay_triangulation;
mod error;
mod interpolator;
mod point;

#[cfg(test)]
mod test_utilities;

pub use bounded_side::BoundedSide;
pub use delaunay_core::math::{
    validate_coordinate, validate_vertex, PointProjection, MAX_ALLOWED_VALUE, MIN_ALLOWED_VALUE,
};
pub use delaunay_core::{LastUsedVertexHintGenerator, LineSideInfo, PositionInTriangulation};
pub use delaunay_triangulation::DelaunayTriangulation;
pub use error::{InsertionError, InterpError, InterpResult};
pub use interpolator::{
    DelaunayInterpolator, ErrorTuple, FaceData, InterpTriangulation, InterpVertex, LineSegment,
    RefinementParameters, RefinementResult, TriangleRecord, ValueFunction,
};
pub use point::{CoordinateNum, HasPosition, Point2};

/// Handle types used for traversal and modification of triangulations.
///
/// A handle can either be a "reference handle" or a "fixed handle". Reference handles are
/// created with a reference to the triangulation and offer traversal methods such as
/// [DirectedEdgeHandle::next] or [VertexHandle::out_edges]. Fixed handles are plain
/// indices which can be turned back into reference handles with
/// [crate::DelaunayTriangulation::vertex], [crate::DelaunayTriangulation::face] and similar
/// methods.
pub mod handles {
    pub use crate::delaunay_core::{
        DirectedEdgeHandle, DirectedEdgeTag, DynamicHandleImpl, FaceHandle, FaceTag,
        FixedDirectedEdgeHandle, FixedFaceHandle, FixedHandleImpl, FixedUndirectedEdgeHandle,
        FixedVertexHandle, UndirectedEdgeHandle, UndirectedEdgeTag, VertexHandle, VertexTag,
        OUTER_FACE,
    };
}

/// Iterators over various elements of a triangulation.
pub mod iterators {
    pub use crate::delaunay_core::iterators::{
        DirectedEdgeIterator, FaceIterator, FixedVertexIterator, UndirectedEdgeIterator,
        VertexIterator,
    };
}
