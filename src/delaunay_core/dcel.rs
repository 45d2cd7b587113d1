use super::handles::iterators::*;
use super::handles::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FaceEntry<F> {
    pub(crate) adjacent_edge: Option<FixedDirectedEdgeHandle>,
    pub(crate) data: F,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct VertexEntry<V> {
    pub(crate) data: V,
    pub(crate) out_edge: Option<FixedDirectedEdgeHandle>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EdgeEntry {
    pub(crate) entries: [HalfEdgeEntry; 2],
}

impl EdgeEntry {
    pub(crate) fn new(normalized: HalfEdgeEntry, not_normalized: HalfEdgeEntry) -> Self {
        EdgeEntry {
            entries: [normalized, not_normalized],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct HalfEdgeEntry {
    pub(crate) next: FixedDirectedEdgeHandle,
    pub(crate) prev: FixedDirectedEdgeHandle,
    pub(crate) face: FixedFaceHandle,
    pub(crate) origin: FixedVertexHandle,
}

/// Doubly connected edge list storing the triangulation's topology.
///
/// Elements are never removed. Operations that create or modify inner faces record them
/// in `changed_faces` until they are collected with [Dcel::take_changed_faces].
#[derive(Clone, Debug)]
pub struct Dcel<V, F = ()> {
    pub(crate) vertices: Vec<VertexEntry<V>>,
    pub(crate) faces: Vec<FaceEntry<F>>,
    pub(crate) edges: Vec<EdgeEntry>,
    pub(crate) changed_faces: Vec<FixedFaceHandle>,
}

impl<V, F: Default> Default for Dcel<V, F> {
    fn default() -> Self {
        let outer_face = FaceEntry {
            adjacent_edge: None,
            data: F::default(),
        };

        Dcel {
            vertices: Vec::new(),
            faces: vec![outer_face],
            edges: Vec::new(),
            changed_faces: Vec::new(),
        }
    }
}

impl<V, F> Dcel<V, F> {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_directed_edges(&self) -> usize {
        self.edges.len() * 2
    }

    pub fn num_undirected_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex(&self, handle: FixedVertexHandle) -> VertexHandle<V, F> {
        DynamicHandleImpl::new(self, handle)
    }

    pub fn vertex_out_edge(&self, handle: FixedVertexHandle) -> Option<FixedDirectedEdgeHandle> {
        self.vertices[handle.index()].out_edge
    }

    pub fn directed_edge(&self, handle: FixedDirectedEdgeHandle) -> DirectedEdgeHandle<V, F> {
        DirectedEdgeHandle::new(self, handle)
    }

    pub fn undirected_edge(
        &self,
        handle: FixedUndirectedEdgeHandle,
    ) -> UndirectedEdgeHandle<V, F> {
        UndirectedEdgeHandle::new(self, handle)
    }

    pub fn face(&self, handle: FixedFaceHandle) -> FaceHandle<V, F> {
        DynamicHandleImpl::new(self, handle)
    }

    pub fn outer_face(&self) -> FaceHandle<V, F> {
        self.face(OUTER_FACE)
    }

    pub(crate) fn half_edge(&self, handle: FixedDirectedEdgeHandle) -> &HalfEdgeEntry {
        let entry = &self.edges[handle.as_undirected().index()];
        &entry.entries[handle.normalize_index()]
    }

    pub(crate) fn half_edge_mut(&mut self, handle: FixedDirectedEdgeHandle) -> &mut HalfEdgeEntry {
        let entry = &mut self.edges[handle.as_undirected().index()];
        &mut entry.entries[handle.normalize_index()]
    }

    pub fn face_data(&self, handle: FixedFaceHandle) -> &F {
        &self.faces[handle.index()].data
    }

    pub fn face_data_mut(&mut self, handle: FixedFaceHandle) -> &mut F {
        &mut self.faces[handle.index()].data
    }

    pub fn face_adjacent_edge(&self, handle: FixedFaceHandle) -> Option<FixedDirectedEdgeHandle> {
        self.faces[handle.index()].adjacent_edge
    }

    pub fn vertex_data(&self, handle: FixedVertexHandle) -> &V {
        &self.vertices[handle.index()].data
    }

    pub fn vertex_data_mut(&mut self, handle: FixedVertexHandle) -> &mut V {
        &mut self.vertices[handle.index()].data
    }

    pub fn get_edge_from_neighbors(
        &self,
        from: FixedVertexHandle,
        to: FixedVertexHandle,
    ) -> Option<DirectedEdgeHandle<V, F>> {
        self.vertex(from)
            .out_edges()
            .find(|edge| edge.to().fix() == to)
    }

    pub(crate) fn mark_face_changed(&mut self, face: FixedFaceHandle) {
        if !face.is_outer() {
            self.changed_faces.push(face);
        }
    }

    /// Returns all inner faces created or modified since the last call, without duplicates.
    pub(crate) fn take_changed_faces(&mut self) -> Vec<FixedFaceHandle> {
        let mut result = std::mem::take(&mut self.changed_faces);
        result.sort_unstable();
        result.dedup();
        result
    }

    pub fn vertices(&self) -> VertexIterator<V, F> {
        DynamicHandleIterator::new(self, 0..self.num_vertices())
    }

    pub fn fixed_vertices(&self) -> FixedVertexIterator {
        FixedHandleIterator::new(0..self.num_vertices())
    }

    pub fn directed_edges(&self) -> DirectedEdgeIterator<V, F> {
        DynamicHandleIterator::new(self, 0..self.num_directed_edges())
    }

    pub fn undirected_edges(&self) -> UndirectedEdgeIterator<V, F> {
        DynamicHandleIterator::new(self, 0..self.num_undirected_edges())
    }

    pub fn faces(&self) -> FaceIterator<V, F> {
        DynamicHandleIterator::new(self, 0..self.num_faces())
    }

    /// Iterates over all faces except the outer face.
    pub fn inner_faces(&self) -> FaceIterator<V, F> {
        DynamicHandleIterator::new(self, 1..self.num_faces())
    }

    #[cfg(test)]
    pub fn sanity_check(&self) {
        if self.num_vertices() <= 1 {
            assert_eq!(self.num_faces(), 1);
            assert_eq!(self.num_undirected_edges(), 0);
            assert!(self.faces[OUTER_FACE.index()].adjacent_edge.is_none());
            return;
        }

        for (index, face) in self.faces.iter().enumerate() {
            assert_eq!(
                self.directed_edge(face.adjacent_edge.unwrap()).face().fix(),
                FixedFaceHandle::new(index)
            );
        }
        for (index, vertex) in self.vertices.iter().enumerate() {
            assert_eq!(
                self.directed_edge(vertex.out_edge.unwrap()).from().fix(),
                FixedVertexHandle::new(index)
            );
        }

        for handle in 0..self.edges.len() {
            let edge = self.directed_edge(FixedDirectedEdgeHandle::new_normalized(handle));
            assert_eq!(edge, edge.next().prev());
            assert_eq!(edge, edge.prev().next());
            assert_eq!(edge, edge.rev().rev());
            if self.num_faces() > 1 {
                assert_ne!(edge.face(), edge.rev().face());
            }
            if !edge.face().is_outer() {
                assert_eq!(edge, edge.next().next().next());
                assert_eq!(edge, edge.prev().prev().prev());
            }
            assert_ne!(edge, edge.next());
            assert_ne!(edge, edge.prev());

            assert_eq!(edge, edge.cw().ccw());
            assert_eq!(edge, edge.ccw().cw());
            assert_eq!(edge.from(), edge.cw().from());
            assert_eq!(edge.from(), edge.ccw().from());
        }
    }
}
