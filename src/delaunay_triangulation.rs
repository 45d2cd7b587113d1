use crate::delaunay_core::iterators::*;
use crate::delaunay_core::{Dcel, LastUsedVertexHintGenerator};
use crate::handles::*;
use crate::{HasPosition, InsertionError, Point2, PositionInTriangulation};

/// A two dimensional [Delaunay triangulation](https://en.wikipedia.org/wiki/Delaunay_triangulation).
///
/// No vertex of a Delaunay triangulation lies inside the circumcircle of any of its
/// triangles. The triangulation is built incrementally, every insertion restores this
/// property by flipping edges. Vertices are never removed.
///
/// Vertices need to implement [HasPosition]; [Point2] can be used directly. Every face
/// stores an `F` which is reset to `F::default()` whenever the face is created or changed
/// by an insertion, see [Self::take_changed_faces].
///
/// # Example
/// ```
/// use delaunay_linterp::{DelaunayTriangulation, InsertionError, Point2};
///
/// fn main() -> Result<(), InsertionError> {
///     let mut triangulation: DelaunayTriangulation<_> = DelaunayTriangulation::new();
///
///     triangulation.insert(Point2::new(0.0, 1.0))?;
///     triangulation.insert(Point2::new(1.0, 1.0))?;
///     triangulation.insert(Point2::new(0.5, -1.0))?;
///
///     assert_eq!(triangulation.num_vertices(), 3);
///     assert_eq!(triangulation.num_inner_faces(), 1);
///     assert_eq!(triangulation.num_undirected_edges(), 3);
///
///     // Inserting the same position twice fails and leaves the triangulation unchanged
///     assert!(matches!(
///         triangulation.insert(Point2::new(0.0, 1.0)),
///         Err(InsertionError::Duplicate(_))
///     ));
///     assert_eq!(triangulation.num_vertices(), 3);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DelaunayTriangulation<V, F = ()> {
    pub(crate) dcel: Dcel<V, F>,
    pub(crate) hint_generator: LastUsedVertexHintGenerator,
}

impl<V, F: Default> Default for DelaunayTriangulation<V, F> {
    fn default() -> Self {
        Self {
            dcel: Dcel::default(),
            hint_generator: LastUsedVertexHintGenerator::default(),
        }
    }
}

impl<V, F: Default> DelaunayTriangulation<V, F> {
    /// Creates a new, empty triangulation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V, F> DelaunayTriangulation<V, F>
where
    V: HasPosition,
    F: Default,
{
    /// Inserts a new vertex.
    ///
    /// Returns the handle of the new vertex. Fails with [InsertionError::Duplicate] if a
    /// vertex with the same position exists and with the other [InsertionError] variants
    /// for invalid coordinates. The triangulation is not modified if an error is returned.
    pub fn insert(&mut self, vertex: V) -> Result<FixedVertexHandle, InsertionError> {
        self.insert_with_hint_option(vertex, None)
    }

    /// Same as [Self::insert], the walk to the insertion site starts at `hint`.
    pub fn insert_with_hint(
        &mut self,
        vertex: V,
        hint: FixedVertexHandle,
    ) -> Result<FixedVertexHandle, InsertionError> {
        self.insert_with_hint_option(vertex, Some(hint))
    }
}

impl<V, F> DelaunayTriangulation<V, F>
where
    V: HasPosition,
{
    /// Locates a position relative to the triangulation's elements.
    pub fn locate(&self, point: Point2<V::Scalar>) -> PositionInTriangulation {
        self.locate_with_hint_option_core(point, None)
    }

    /// Same as [Self::locate], the walk starts at `hint`.
    pub fn locate_with_hint(
        &self,
        point: Point2<V::Scalar>,
        hint: FixedVertexHandle,
    ) -> PositionInTriangulation {
        self.locate_with_hint_option_core(point, Some(hint))
    }
}

impl<V, F> DelaunayTriangulation<V, F> {
    pub fn num_vertices(&self) -> usize {
        self.dcel.num_vertices()
    }

    /// Number of faces including the outer face.
    pub fn num_all_faces(&self) -> usize {
        self.dcel.num_faces()
    }

    pub fn num_inner_faces(&self) -> usize {
        self.dcel.num_faces() - 1
    }

    pub fn num_undirected_edges(&self) -> usize {
        self.dcel.num_undirected_edges()
    }

    pub fn num_directed_edges(&self) -> usize {
        self.dcel.num_directed_edges()
    }

    /// Returns `true` if no inner face exists.
    ///
    /// This holds for triangulations with less than three vertices and while all
    /// inserted vertices are collinear.
    pub fn all_vertices_on_line(&self) -> bool {
        self.dcel.num_faces() == 1
    }

    pub fn vertex(&self, handle: FixedVertexHandle) -> VertexHandle<V, F> {
        self.dcel.vertex(handle)
    }

    pub fn directed_edge(&self, handle: FixedDirectedEdgeHandle) -> DirectedEdgeHandle<V, F> {
        self.dcel.directed_edge(handle)
    }

    pub fn undirected_edge(&self, handle: FixedUndirectedEdgeHandle) -> UndirectedEdgeHandle<V, F> {
        self.dcel.undirected_edge(handle)
    }

    pub fn face(&self, handle: FixedFaceHandle) -> FaceHandle<V, F> {
        self.dcel.face(handle)
    }

    pub fn outer_face(&self) -> FaceHandle<V, F> {
        self.dcel.outer_face()
    }

    /// Iterates over all vertices in insertion order.
    pub fn vertices(&self) -> VertexIterator<V, F> {
        self.dcel.vertices()
    }

    pub fn fixed_vertices(&self) -> FixedVertexIterator {
        self.dcel.fixed_vertices()
    }

    pub fn directed_edges(&self) -> DirectedEdgeIterator<V, F> {
        self.dcel.directed_edges()
    }

    pub fn undirected_edges(&self) -> UndirectedEdgeIterator<V, F> {
        self.dcel.undirected_edges()
    }

    pub fn all_faces(&self) -> FaceIterator<V, F> {
        self.dcel.faces()
    }

    pub fn inner_faces(&self) -> FaceIterator<V, F> {
        self.dcel.inner_faces()
    }

    /// Mutable access to a vertex. The vertex' position must not be changed.
    pub fn vertex_data_mut(&mut self, handle: FixedVertexHandle) -> &mut V {
        self.dcel.vertex_data_mut(handle)
    }

    pub fn face_data_mut(&mut self, handle: FixedFaceHandle) -> &mut F {
        self.dcel.face_data_mut(handle)
    }

    /// Returns all inner faces that were created or modified since the last call.
    ///
    /// Failed insertions don't change any face. The result is sorted and contains no
    /// duplicates.
    pub fn take_changed_faces(&mut self) -> Vec<FixedFaceHandle> {
        self.dcel.take_changed_faces()
    }
}

#[cfg(test)]
impl<V: HasPosition, F> DelaunayTriangulation<V, F> {
    pub(crate) fn sanity_check(&self) {
        use crate::delaunay_core::math;

        self.dcel.sanity_check();
        let all_vertices_on_line = self.all_vertices_on_line();

        for face in self.inner_faces() {
            let [v0, v1, v2] = face.positions();
            assert!(math::side_query(v0, v1, v2).is_on_left_side());
        }

        for edge in self.directed_edges() {
            if all_vertices_on_line {
                assert!(edge.face().is_outer());
            } else {
                assert_ne!(edge.face(), edge.rev().face());
            }
            assert_ne!(edge.from(), edge.to());
        }

        if all_vertices_on_line {
            assert_eq!(
                self.num_undirected_edges(),
                self.num_vertices().saturating_sub(1)
            );
        } else {
            let num_inner_edges = self
                .directed_edges()
                .filter(|e| !e.face().is_outer())
                .count();
            assert_eq!(self.num_inner_faces() * 3, num_inner_edges);
        }

        // Local Delaunay property implies the global one
        for edge in self.undirected_edges() {
            let edge = edge.as_directed();
            if let (Some(v2), Some(v3)) = (edge.rev().opposite_position(), edge.opposite_position())
            {
                let [v0, v1] = edge.positions();
                assert!(!math::contained_in_circumference(v2, v1, v0, v3));
            }
        }
    }
}
