//! Topological operations on a [Dcel].
//!
//! None of these functions look at vertex positions. Callers are responsible for only
//! performing operations that keep the embedding planar.
//!
//! Every operation is expressed with three primitives: new edges are created detached
//! with [push_edge], half edges are chained with [link] and inner faces are (re)assembled
//! with [set_triangle]. The latter records the face as changed.

use super::dcel::{Dcel, EdgeEntry, FaceEntry, HalfEdgeEntry, VertexEntry};
use super::handles::*;

fn link<V, F>(
    dcel: &mut Dcel<V, F>,
    prev: FixedDirectedEdgeHandle,
    next: FixedDirectedEdgeHandle,
) {
    dcel.half_edge_mut(prev).next = next;
    dcel.half_edge_mut(next).prev = prev;
}

/// Turns three half edges into the boundary of `face`, in this order.
fn set_triangle<V, F>(
    dcel: &mut Dcel<V, F>,
    face: FixedFaceHandle,
    edges: [FixedDirectedEdgeHandle; 3],
) {
    let [e0, e1, e2] = edges;
    link(dcel, e0, e1);
    link(dcel, e1, e2);
    link(dcel, e2, e0);
    for edge in edges {
        dcel.half_edge_mut(edge).face = face;
    }
    dcel.faces[face.index()].adjacent_edge = Some(e0);
    dcel.mark_face_changed(face);
}

/// Adds an edge `from -> to` that is only linked to its own twin.
///
/// Returns the half edge starting at `from`.
fn push_edge<V, F>(
    dcel: &mut Dcel<V, F>,
    from: FixedVertexHandle,
    to: FixedVertexHandle,
) -> FixedDirectedEdgeHandle {
    let edge = FixedDirectedEdgeHandle::new_normalized(dcel.num_undirected_edges());
    let twin = edge.rev();
    let half = |origin, other| HalfEdgeEntry {
        next: other,
        prev: other,
        face: OUTER_FACE,
        origin,
    };
    dcel.edges.push(EdgeEntry::new(half(from, twin), half(to, edge)));
    edge
}

fn push_vertex<V, F>(dcel: &mut Dcel<V, F>, data: V) -> FixedVertexHandle {
    let handle = FixedVertexHandle::new(dcel.num_vertices());
    dcel.vertices.push(VertexEntry {
        data,
        out_edge: None,
    });
    handle
}

fn push_face<V, F: Default>(dcel: &mut Dcel<V, F>) -> FixedFaceHandle {
    let handle = FixedFaceHandle::new(dcel.num_faces());
    dcel.faces.push(FaceEntry {
        adjacent_edge: None,
        data: F::default(),
    });
    handle
}

fn set_out_edge<V, F>(
    dcel: &mut Dcel<V, F>,
    vertex: FixedVertexHandle,
    edge: FixedDirectedEdgeHandle,
) {
    dcel.vertices[vertex.index()].out_edge = Some(edge);
}

pub fn insert_first_vertex<V, F>(dcel: &mut Dcel<V, F>, vertex: V) -> FixedVertexHandle {
    assert!(dcel.vertices.is_empty());
    push_vertex(dcel, vertex)
}

pub fn insert_second_vertex<V, F>(dcel: &mut Dcel<V, F>, vertex: V) -> FixedVertexHandle {
    assert_eq!(dcel.num_vertices(), 1);
    let first = FixedVertexHandle::new(0);
    let second = push_vertex(dcel, vertex);

    let edge = push_edge(dcel, first, second);
    set_out_edge(dcel, first, edge);
    set_out_edge(dcel, second, edge.rev());
    dcel.faces[OUTER_FACE.index()].adjacent_edge = Some(edge);
    second
}

/// Appends a vertex to the end of a line of collinear vertices.
///
/// ```text
/// <--out_edge-- end_vertex <--new_edge-- new_vertex
/// ```
pub fn extend_line<V, F>(
    dcel: &mut Dcel<V, F>,
    end_vertex: FixedVertexHandle,
    new_vertex: V,
) -> FixedVertexHandle {
    let out_edge = dcel
        .vertex_out_edge(end_vertex)
        .expect("End vertex of a line without out edge. This is a bug.");
    let in_edge = out_edge.rev();
    debug_assert_eq!(
        dcel.half_edge(in_edge).next,
        out_edge,
        "Vertex is not the end of the line. This is a bug."
    );

    let new_vertex = push_vertex(dcel, new_vertex);
    let new_edge = push_edge(dcel, new_vertex, end_vertex);

    link(dcel, in_edge, new_edge.rev());
    link(dcel, new_edge, out_edge);
    set_out_edge(dcel, new_vertex, new_edge);
    new_vertex
}

/// Splits an edge while all vertices are collinear.
///
/// ```text
/// from --edge--> to
/// from --edge--> new_vertex --new_edge--> to
/// ```
pub fn split_edge_when_all_vertices_on_line<V, F>(
    dcel: &mut Dcel<V, F>,
    edge: FixedDirectedEdgeHandle,
    new_vertex: V,
) -> FixedVertexHandle {
    let rev = edge.rev();
    debug_assert_eq!(dcel.half_edge(edge).face, dcel.half_edge(rev).face);

    let to = dcel.half_edge(rev).origin;
    let edge_next = dcel.half_edge(edge).next;
    let rev_prev = dcel.half_edge(rev).prev;

    let new_vertex = push_vertex(dcel, new_vertex);
    let new_edge = push_edge(dcel, new_vertex, to);
    dcel.half_edge_mut(rev).origin = new_vertex;

    // If `to` is the end of the line, the new edge stays linked to its own twin
    if edge_next != rev {
        link(dcel, new_edge, edge_next);
        link(dcel, rev_prev, new_edge.rev());
    }
    link(dcel, edge, new_edge);
    link(dcel, new_edge.rev(), rev);

    set_out_edge(dcel, to, new_edge.rev());
    set_out_edge(dcel, new_vertex, new_edge);
    new_vertex
}

/// Adds a triangle on the outer side of `edge`, spanned by the edge and a new vertex.
///
/// ```text
///        new_vertex
///          /  \
///         /new \
///        / face \
///   from --edge--> to
/// ```
pub fn create_new_face_adjacent_to_edge<V, F>(
    dcel: &mut Dcel<V, F>,
    edge: FixedDirectedEdgeHandle,
    new_vertex: V,
) -> FixedVertexHandle
where
    F: Default,
{
    let entry = *dcel.half_edge(edge);
    let from = entry.origin;
    let to = dcel.half_edge(edge.rev()).origin;

    let new_vertex = push_vertex(dcel, new_vertex);
    let face = push_face(dcel);
    let to_new = push_edge(dcel, to, new_vertex);
    let new_from = push_edge(dcel, new_vertex, from);

    // Reroute the old boundary around the new triangle
    link(dcel, entry.prev, new_from.rev());
    link(dcel, new_from.rev(), to_new.rev());
    link(dcel, to_new.rev(), entry.next);
    dcel.half_edge_mut(new_from.rev()).face = entry.face;
    dcel.half_edge_mut(to_new.rev()).face = entry.face;
    dcel.faces[entry.face.index()].adjacent_edge = Some(new_from.rev());

    set_triangle(dcel, face, [edge, to_new, new_from]);
    set_out_edge(dcel, new_vertex, new_from);
    new_vertex
}

/// Closes the gap between an outer edge and its successor with a new triangle.
///
/// `edge` and its successor must both be adjacent to the outer face. Returns the new
/// outer edge connecting `edge.from()` and `edge.next().to()`.
pub fn create_single_face_between_edge_and_next<V, F>(
    dcel: &mut Dcel<V, F>,
    edge: FixedDirectedEdgeHandle,
) -> FixedDirectedEdgeHandle
where
    F: Default,
{
    let entry = *dcel.half_edge(edge);
    let next = entry.next;
    let after_next = dcel.half_edge(next).next;
    let next_to = dcel.half_edge(next.rev()).origin;

    let face = push_face(dcel);
    let inner = push_edge(dcel, next_to, entry.origin);
    let outer = inner.rev();

    link(dcel, entry.prev, outer);
    link(dcel, outer, after_next);
    dcel.faces[OUTER_FACE.index()].adjacent_edge = Some(outer);

    set_triangle(dcel, face, [edge, next, inner]);
    outer
}

/// Splits an edge of the convex hull. Only the inner side gets a new face.
///
/// ```text
///   to                   to
///   |\                   |\
///   | \ edge             | \ e2
///   |f1\         =>      |nf new_vertex
///   |   \                | / \ edge
///   v----from            v----from
/// ```
pub fn split_half_edge<V, F>(
    dcel: &mut Dcel<V, F>,
    edge: FixedDirectedEdgeHandle,
    new_vertex: V,
) -> FixedVertexHandle
where
    F: Default,
{
    let entry = *dcel.half_edge(edge);
    let twin = edge.rev();
    let twin_entry = *dcel.half_edge(twin);
    let to = twin_entry.origin;
    let v = dcel.half_edge(entry.prev).origin;

    let new_vertex = push_vertex(dcel, new_vertex);
    let new_face = push_face(dcel);
    let e1 = push_edge(dcel, v, new_vertex);
    let e2 = push_edge(dcel, new_vertex, to);
    dcel.half_edge_mut(twin).origin = new_vertex;

    set_triangle(dcel, entry.face, [edge, e1.rev(), entry.prev]);
    set_triangle(dcel, new_face, [e2, entry.next, e1]);

    link(dcel, twin_entry.prev, e2.rev());
    link(dcel, e2.rev(), twin);
    dcel.half_edge_mut(e2.rev()).face = twin_entry.face;

    set_out_edge(dcel, to, e2.rev());
    set_out_edge(dcel, new_vertex, e2);
    new_vertex
}

/// Splits an edge between two inner faces, resulting in four faces around the new vertex.
///
/// ```text
///   v1-----v4          v1-----v4
///   |\  f0 |           |\  f0 /|
///   | \e0  |           | \e0 / |
///   |  \   |    =>     |f1 v0 f3
///   |f1 \  |           | /   \ |
///   |    \ |           |/  f2 \|
///   v2-----v3          v2-----v3
/// ```
pub fn split_edge<V, F>(
    dcel: &mut Dcel<V, F>,
    e0: FixedDirectedEdgeHandle,
    new_vertex: V,
) -> FixedVertexHandle
where
    F: Default,
{
    let t0 = e0.rev();
    let edge = *dcel.half_edge(e0);
    let twin = *dcel.half_edge(t0);

    let v3 = twin.origin;
    let v2 = dcel.half_edge(twin.prev).origin;
    let v4 = dcel.half_edge(edge.prev).origin;

    let v0 = push_vertex(dcel, new_vertex);
    let f2 = push_face(dcel);
    let f3 = push_face(dcel);
    let e1 = push_edge(dcel, v2, v0);
    let e2 = push_edge(dcel, v3, v0);
    let e3 = push_edge(dcel, v4, v0);
    dcel.half_edge_mut(t0).origin = v0;

    set_triangle(dcel, edge.face, [e0, e3.rev(), edge.prev]);
    set_triangle(dcel, twin.face, [t0, twin.next, e1]);
    set_triangle(dcel, f2, [e1.rev(), twin.prev, e2]);
    set_triangle(dcel, f3, [e2.rev(), edge.next, e3]);

    set_out_edge(dcel, v0, t0);
    set_out_edge(dcel, v3, e2);
    v0
}

/// Connects a new vertex inside of `face` with all three corners.
pub fn insert_into_triangle<V, F>(
    dcel: &mut Dcel<V, F>,
    vertex: V,
    face: FixedFaceHandle,
) -> FixedVertexHandle
where
    F: Default,
{
    let e0 = dcel
        .face_adjacent_edge(face)
        .expect("Inner face without adjacent edge. This is a bug.");
    let e1 = dcel.half_edge(e0).next;
    let e2 = dcel.half_edge(e1).next;
    let [v0, v1, v2] = [e0, e1, e2].map(|edge| dcel.half_edge(edge).origin);

    let v = push_vertex(dcel, vertex);
    let f1 = push_face(dcel);
    let f2 = push_face(dcel);
    let to_v1 = push_edge(dcel, v, v1);
    let to_v2 = push_edge(dcel, v, v2);
    let to_v0 = push_edge(dcel, v, v0);

    set_triangle(dcel, face, [e0, to_v1.rev(), to_v0]);
    set_triangle(dcel, f1, [e1, to_v2.rev(), to_v1]);
    set_triangle(dcel, f2, [e2, to_v0.rev(), to_v2]);

    set_out_edge(dcel, v, to_v1);
    v
}

/// Flips an edge in clockwise direction.
///
/// ```text
///     v3               v3
///    /  \             / |\
///   /  e \           /  | \
///  v0----v2   =>    v0  e  v2
///   \ t  /           \  | /
///    \  /             \ |/
///     v1               v1
/// ```
///
/// Both adjacent faces keep their handles but are rebuilt around the flipped edge.
pub fn flip_cw<V, F>(dcel: &mut Dcel<V, F>, edge: FixedUndirectedEdgeHandle) {
    let e = edge.as_directed();
    let t = e.rev();
    let e_entry = *dcel.half_edge(e);
    let t_entry = *dcel.half_edge(t);

    let new_e_origin = dcel.half_edge(e_entry.prev).origin;
    let new_t_origin = dcel.half_edge(t_entry.prev).origin;
    dcel.half_edge_mut(e).origin = new_e_origin;
    dcel.half_edge_mut(t).origin = new_t_origin;

    set_triangle(dcel, e_entry.face, [e, t_entry.prev, e_entry.next]);
    set_triangle(dcel, t_entry.face, [t, e_entry.prev, t_entry.next]);

    // The old end points may have used the flipped edge as out edge
    set_out_edge(dcel, e_entry.origin, t_entry.next);
    set_out_edge(dcel, t_entry.origin, e_entry.next);
}

#[cfg(test)]
mod test {
    use super::super::dcel::Dcel;
    use super::super::handles::*;
    use super::*;

    fn triangle() -> (Dcel<usize>, FixedFaceHandle) {
        let mut dcel = Dcel::<usize>::default();
        insert_first_vertex(&mut dcel, 0);
        insert_second_vertex(&mut dcel, 1);
        let edge = FixedDirectedEdgeHandle::new_normalized(0);
        create_new_face_adjacent_to_edge(&mut dcel, edge, 2);
        (dcel, FixedFaceHandle::new(1))
    }

    #[test]
    fn test_create_triangle() {
        let (mut dcel, face) = triangle();
        assert_eq!(dcel.num_vertices(), 3);
        assert_eq!(dcel.num_faces(), 2);
        assert_eq!(dcel.num_undirected_edges(), 3);
        assert_eq!(dcel.take_changed_faces(), vec![face]);
        assert!(dcel.take_changed_faces().is_empty());
        assert_eq!(dcel.outer_face().adjacent_edge().unwrap().face().fix(), OUTER_FACE);
        dcel.sanity_check();
    }

    #[test]
    fn test_insert_into_triangle() {
        let (mut dcel, face) = triangle();
        dcel.take_changed_faces();
        let vertex = insert_into_triangle(&mut dcel, 3, face);
        assert_eq!(vertex.index(), 3);
        assert_eq!(dcel.num_faces(), 4);
        assert_eq!(dcel.num_undirected_edges(), 6);
        assert_eq!(dcel.vertex(vertex).out_edges().count(), 3);
        assert_eq!(dcel.take_changed_faces().len(), 3);
        dcel.sanity_check();
    }

    #[test]
    fn test_close_gap_on_outer_face() {
        let mut dcel = Dcel::<usize>::default();
        insert_first_vertex(&mut dcel, 0);
        insert_second_vertex(&mut dcel, 1);
        extend_line(&mut dcel, FixedVertexHandle::new(1), 2);
        dcel.take_changed_faces();

        let edge = dcel
            .directed_edges()
            .find(|edge| edge.next().rev() != *edge && edge.next() != edge.rev())
            .unwrap()
            .fix();
        let outer = create_single_face_between_edge_and_next(&mut dcel, edge);
        assert!(dcel.directed_edge(outer).face().is_outer());
        assert!(!dcel.directed_edge(outer).rev().face().is_outer());
        assert_eq!(dcel.num_faces(), 2);
        assert_eq!(dcel.take_changed_faces().len(), 1);
        dcel.sanity_check();
    }

    #[test]
    fn test_split_edge_and_flip() {
        let (mut dcel, face) = triangle();
        let vertex = insert_into_triangle(&mut dcel, 3, face);
        dcel.take_changed_faces();

        let inner_edge = dcel
            .vertex(vertex)
            .out_edge()
            .unwrap()
            .as_undirected()
            .fix();
        split_edge(&mut dcel, inner_edge.as_directed(), 4);
        dcel.sanity_check();
        assert_eq!(dcel.num_faces(), 6);
        assert_eq!(dcel.take_changed_faces().len(), 4);

        let hull_edge = dcel
            .directed_edges()
            .find(|edge| edge.is_outer_edge())
            .unwrap()
            .fix();
        split_half_edge(&mut dcel, hull_edge.rev(), 5);
        dcel.sanity_check();
        assert_eq!(dcel.num_faces(), 7);
        assert_eq!(dcel.take_changed_faces().len(), 2);

        let flippable = dcel
            .undirected_edges()
            .find(|edge| !edge.as_directed().is_part_of_convex_hull())
            .unwrap()
            .fix();
        let [from, to] = dcel.undirected_edge(flippable).vertices().map(|v| v.fix());
        flip_cw(&mut dcel, flippable);
        dcel.sanity_check();
        assert_eq!(dcel.take_changed_faces().len(), 2);
        assert!(dcel.get_edge_from_neighbors(from, to).is_none());
    }

    #[test]
    fn test_line_operations() {
        let mut dcel = Dcel::<usize>::default();
        insert_first_vertex(&mut dcel, 0);
        insert_second_vertex(&mut dcel, 1);
        extend_line(&mut dcel, FixedVertexHandle::new(1), 2);
        dcel.sanity_check();
        split_edge_when_all_vertices_on_line(
            &mut dcel,
            FixedDirectedEdgeHandle::new_normalized(0),
            3,
        );
        dcel.sanity_check();
        assert_eq!(dcel.num_undirected_edges(), 3);
        assert_eq!(dcel.num_faces(), 1);
        assert!(dcel.take_changed_faces().is_empty());
    }
}
