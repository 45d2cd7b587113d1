use num_traits::Float;

use super::iterators::{CCWEdgesNextBackFn, CircularIterator};
use super::public_handles::*;
use crate::delaunay_core::dcel::Dcel;
use crate::delaunay_core::math;
use crate::{HasPosition, LineSideInfo, Point2};

/// Internal type definition that is only exposed for documentation purposes.
///
/// Use the aliases [VertexHandle], [DirectedEdgeHandle], [UndirectedEdgeHandle] and
/// [FaceHandle] instead.
pub struct DynamicHandleImpl<'a, V, F, Type> {
    pub(crate) dcel: &'a Dcel<V, F>,
    pub(crate) handle: FixedHandleImpl<Type>,
}

impl<'a, V, F, Type> DynamicHandleImpl<'a, V, F, Type> {
    #[inline]
    pub(crate) fn new(dcel: &'a Dcel<V, F>, handle: FixedHandleImpl<Type>) -> Self {
        Self { dcel, handle }
    }
}

impl<'a, V, F, Type: Copy> DynamicHandleImpl<'a, V, F, Type> {
    /// Converts this dynamic handle into its fixed variant.
    ///
    /// Fixed handles do not borrow the triangulation.
    #[inline]
    pub fn fix(&self) -> FixedHandleImpl<Type> {
        self.handle
    }

    /// Returns the internal index of the referenced element.
    pub fn index(&self) -> usize {
        self.handle.index()
    }
}

impl<'a, V, F, Type: Copy> Clone for DynamicHandleImpl<'a, V, F, Type> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V, F, Type: Copy> Copy for DynamicHandleImpl<'a, V, F, Type> {}

impl<'a, V, F, Type: PartialEq> PartialEq for DynamicHandleImpl<'a, V, F, Type> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<'a, V, F, Type: Eq> Eq for DynamicHandleImpl<'a, V, F, Type> {}

impl<'a, V, F, Type> std::fmt::Debug for DynamicHandleImpl<'a, V, F, Type> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicHandle")
            .field("index", &self.handle.index())
            .finish()
    }
}

impl<'a, V, F> VertexHandle<'a, V, F> {
    /// Returns the data stored for this vertex.
    pub fn data(&self) -> &'a V {
        self.dcel.vertex_data(self.handle)
    }

    /// Returns an outgoing edge of this vertex.
    ///
    /// Returns `None` if the vertex is not connected yet (a single vertex triangulation).
    pub fn out_edge(&self) -> Option<DirectedEdgeHandle<'a, V, F>> {
        self.dcel
            .vertex_out_edge(self.handle)
            .map(|edge| DirectedEdgeHandle::new(self.dcel, edge))
    }

    /// Returns all directed edges going out of this vertex in counter clockwise order,
    /// starting at an arbitrary edge.
    pub fn out_edges(&self) -> CircularIterator<'a, V, F, CCWEdgesNextBackFn> {
        match self.out_edge() {
            Some(edge) => CircularIterator::new(edge),
            None => CircularIterator::new_empty(DirectedEdgeHandle::new(
                self.dcel,
                FixedDirectedEdgeHandle::new(0),
            )),
        }
    }

    /// Returns `true` if this vertex lies on the convex hull.
    pub fn is_on_convex_hull(&self) -> bool {
        self.out_edges().any(|edge| edge.is_part_of_convex_hull())
    }
}

impl<'a, V: HasPosition, F> VertexHandle<'a, V, F> {
    /// Returns the position of this vertex.
    pub fn position(&self) -> Point2<V::Scalar> {
        self.data().position()
    }
}

impl<'a, V, F> DirectedEdgeHandle<'a, V, F> {
    fn entry(&self) -> &'a crate::delaunay_core::dcel::HalfEdgeEntry {
        self.dcel.half_edge(self.handle)
    }

    /// Returns the edge's origin vertex.
    pub fn from(&self) -> VertexHandle<'a, V, F> {
        VertexHandle::new(self.dcel, self.entry().origin)
    }

    /// Returns the edge's destination vertex.
    pub fn to(&self) -> VertexHandle<'a, V, F> {
        self.rev().from()
    }

    /// Returns the edge's origin and destination vertex.
    pub fn vertices(&self) -> [VertexHandle<'a, V, F>; 2] {
        [self.from(), self.to()]
    }

    /// Returns the next edge of the adjacent face (counter clockwise).
    pub fn next(&self) -> Self {
        DirectedEdgeHandle::new(self.dcel, self.entry().next)
    }

    /// Returns the previous edge of the adjacent face.
    pub fn prev(&self) -> Self {
        DirectedEdgeHandle::new(self.dcel, self.entry().prev)
    }

    /// Returns the same edge pointing into the other direction.
    pub fn rev(&self) -> Self {
        DirectedEdgeHandle::new(self.dcel, self.handle.rev())
    }

    /// Returns the next outgoing edge of the origin vertex in clockwise direction.
    pub fn cw(&self) -> Self {
        self.rev().next()
    }

    /// Returns the next outgoing edge of the origin vertex in counter clockwise direction.
    pub fn ccw(&self) -> Self {
        self.prev().rev()
    }

    /// Returns the face on the left side of this edge.
    pub fn face(&self) -> FaceHandle<'a, V, F> {
        FaceHandle::new(self.dcel, self.entry().face)
    }

    /// Returns `true` if the outer face lies on the left side of this edge.
    pub fn is_outer_edge(&self) -> bool {
        self.face().is_outer()
    }

    /// Returns `true` if this edge or its reversed edge is adjacent to the outer face.
    pub fn is_part_of_convex_hull(&self) -> bool {
        self.is_outer_edge() || self.rev().is_outer_edge()
    }

    /// Returns the undirected edge this edge belongs to.
    pub fn as_undirected(&self) -> UndirectedEdgeHandle<'a, V, F> {
        UndirectedEdgeHandle::new(self.dcel, self.handle.as_undirected())
    }

    /// Returns the vertex opposite of this edge within its adjacent face.
    ///
    /// Returns `None` for outer edges.
    pub fn opposite_vertex(&self) -> Option<VertexHandle<'a, V, F>> {
        if self.is_outer_edge() {
            None
        } else {
            Some(self.prev().from())
        }
    }
}

impl<'a, V: HasPosition, F> DirectedEdgeHandle<'a, V, F> {
    /// Returns the positions of the edge's origin and destination.
    pub fn positions(&self) -> [Point2<V::Scalar>; 2] {
        [self.from().position(), self.to().position()]
    }

    /// Returns the position of the vertex opposite of this edge.
    pub fn opposite_position(&self) -> Option<Point2<V::Scalar>> {
        self.opposite_vertex().map(|v| v.position())
    }

    /// Determines on which side of this edge a point lies.
    ///
    /// The result is exact, see [LineSideInfo].
    pub fn side_query(&self, query_point: Point2<V::Scalar>) -> LineSideInfo {
        let [p1, p2] = self.positions();
        math::side_query(p1, p2, query_point)
    }

    /// Projects a point onto the line through this edge.
    pub fn project_point(
        &self,
        query_point: Point2<V::Scalar>,
    ) -> math::PointProjection<V::Scalar> {
        let [p1, p2] = self.positions();
        math::project_point(p1, p2, query_point)
    }
}

impl<'a, V, F> UndirectedEdgeHandle<'a, V, F> {
    /// Returns the normalized directed edge of this undirected edge.
    pub fn as_directed(&self) -> DirectedEdgeHandle<'a, V, F> {
        DirectedEdgeHandle::new(self.dcel, self.handle.as_directed())
    }

    /// Returns the edge's two vertices.
    pub fn vertices(&self) -> [VertexHandle<'a, V, F>; 2] {
        self.as_directed().vertices()
    }
}

impl<'a, V, F> FaceHandle<'a, V, F> {
    /// Returns `true` if this is the outer face.
    pub fn is_outer(&self) -> bool {
        self.handle.is_outer()
    }

    /// Returns the data stored for this face.
    pub fn data(&self) -> &'a F {
        self.dcel.face_data(self.handle)
    }

    /// Returns an edge adjacent to this face.
    ///
    /// Returns `None` for the outer face of a triangulation with less than two vertices.
    pub fn adjacent_edge(&self) -> Option<DirectedEdgeHandle<'a, V, F>> {
        self.dcel
            .face_adjacent_edge(self.handle)
            .map(|edge| DirectedEdgeHandle::new(self.dcel, edge))
    }

    /// Returns the three edges of an inner face in counter clockwise order.
    ///
    /// Must not be called on the outer face.
    pub fn adjacent_edges(&self) -> [DirectedEdgeHandle<'a, V, F>; 3] {
        debug_assert!(!self.is_outer());
        let e1 = self
            .adjacent_edge()
            .expect("Inner face without adjacent edge. This is a bug.");
        let e0 = e1.prev();
        let e2 = e1.next();
        [e0, e1, e2]
    }

    /// Returns the three vertices of an inner face in counter clockwise order.
    pub fn vertices(&self) -> [VertexHandle<'a, V, F>; 3] {
        let [e0, e1, e2] = self.adjacent_edges();
        [e0.from(), e1.from(), e2.from()]
    }
}

impl<'a, V: HasPosition, F> FaceHandle<'a, V, F> {
    /// Returns the positions of the face's vertices in counter clockwise order.
    pub fn positions(&self) -> [Point2<V::Scalar>; 3] {
        let [v0, v1, v2] = self.vertices();
        [v0.position(), v1.position(), v2.position()]
    }

    /// Returns the triangle's area.
    pub fn area(&self) -> V::Scalar {
        math::triangle_area(self.positions())
    }
}

impl<'a, V, F> FaceHandle<'a, V, F>
where
    V: HasPosition,
    V::Scalar: Float,
{
    /// Returns the face's center point (the average position of its vertices).
    pub fn center(&self) -> Point2<V::Scalar> {
        math::centroid(self.positions())
    }

    /// Returns the barycentric coordinates of a point relative to this face.
    ///
    /// The coordinates refer to [Self::vertices] and sum up to 1.
    pub fn barycentric_interpolation(&self, coordinate: Point2<V::Scalar>) -> [V::Scalar; 3] {
        math::barycentric_coordinates(self.positions(), coordinate)
    }
}
