pub use super::handle_defs::*;
pub use super::handle_impls::DynamicHandleImpl;

/// The single outer face of every triangulation.
///
/// The outer face is the unbounded region outside of the convex hull. It always exists,
/// even for empty triangulations.
pub const OUTER_FACE: FixedFaceHandle = new_fixed_face_handle(0);

/// Fixed handle to a vertex.
///
/// *See also the [handles](crate::handles) module.*
pub type FixedVertexHandle = FixedHandleImpl<VertexTag>;

/// Fixed handle to a directed edge.
///
/// *See also the [handles](crate::handles) module.*
pub type FixedDirectedEdgeHandle = FixedHandleImpl<DirectedEdgeTag>;

/// Fixed handle to an undirected edge.
///
/// *See also the [handles](crate::handles) module.*
pub type FixedUndirectedEdgeHandle = FixedHandleImpl<UndirectedEdgeTag>;

/// Fixed handle to a face. Index 0 refers to the [OUTER_FACE].
///
/// *See also the [handles](crate::handles) module.*
pub type FixedFaceHandle = FixedHandleImpl<FaceTag>;

/// Handle to a vertex of a triangulation.
///
/// Dynamic handles borrow the triangulation and can be used to navigate it.
pub type VertexHandle<'a, V, F = ()> = DynamicHandleImpl<'a, V, F, VertexTag>;

/// Handle to a directed edge of a triangulation.
///
/// Every directed edge has its adjacent face on its left side.
pub type DirectedEdgeHandle<'a, V, F = ()> = DynamicHandleImpl<'a, V, F, DirectedEdgeTag>;

/// Handle to an undirected edge of a triangulation.
pub type UndirectedEdgeHandle<'a, V, F = ()> = DynamicHandleImpl<'a, V, F, UndirectedEdgeTag>;

/// Handle to a face of a triangulation. May refer to the outer face.
pub type FaceHandle<'a, V, F = ()> = DynamicHandleImpl<'a, V, F, FaceTag>;
