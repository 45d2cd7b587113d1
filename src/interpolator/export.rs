#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ErrorTuple;

/// An edge of the triangulation, lifted onto the interpolated surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct LineSegment {
    /// `[x, y, value]` of the edge's first vertex.
    pub from: [f64; 3],
    /// `[x, y, value]` of the edge's second vertex.
    pub to: [f64; 3],
    /// Stable edge id. Edges are never removed, so ids stay valid across insertions.
    pub id: usize,
}

/// A snapshot of a single triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct TriangleRecord {
    /// Vertex ids in counter clockwise order.
    pub vertices: [usize; 3],
    /// The triangle's current error estimate, if it has been evaluated.
    pub error: Option<ErrorTuple>,
}
