use super::handles::*;

/// Describes a position in a triangulation.
///
/// The position is set in relation to the triangulation's vertices, edges and faces.
/// This type is the result of calling
/// [DelaunayTriangulation::locate](crate::DelaunayTriangulation::locate).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum PositionInTriangulation {
    /// A position lies exactly on an existing vertex.
    OnVertex(FixedVertexHandle),

    /// A position lies exactly on an edge (but not on its end points).
    OnEdge(FixedDirectedEdgeHandle),

    /// A position lies in the interior of an inner face.
    OnFace(FixedFaceHandle),

    /// A position lies outside the convex hull. The given edge is part of the convex hull
    /// and has both the point and the outer face on its left side.
    ///
    /// *Note*: The given edge is *not* necessarily the *closest* edge to a position.
    OutsideOfConvexHull(FixedDirectedEdgeHandle),

    /// The triangulation contains either no vertices or exactly one vertex which has a
    /// different position than the query point.
    NoTriangulation,
}
