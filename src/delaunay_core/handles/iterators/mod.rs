mod circular_iterator;
mod fixed_iterators;

pub use circular_iterator::{CCWEdgesNextBackFn, CircularIterator, NextBackFn};
pub use fixed_iterators::{DynamicHandleIterator, FixedHandleIterator};

use super::handle_defs::{DirectedEdgeTag, FaceTag, UndirectedEdgeTag, VertexTag};

/// An iterator over all vertices in insertion order.
pub type VertexIterator<'a, V, F> = DynamicHandleIterator<'a, V, F, VertexTag>;

/// An iterator over the fixed handles of all vertices.
pub type FixedVertexIterator = FixedHandleIterator<VertexTag>;

/// An iterator over all directed edges.
pub type DirectedEdgeIterator<'a, V, F> = DynamicHandleIterator<'a, V, F, DirectedEdgeTag>;

/// An iterator over all undirected edges. Every edge is returned exactly once.
pub type UndirectedEdgeIterator<'a, V, F> = DynamicHandleIterator<'a, V, F, UndirectedEdgeTag>;

/// An iterator over all faces, including the outer face.
pub type FaceIterator<'a, V, F> = DynamicHandleIterator<'a, V, F, FaceTag>;
