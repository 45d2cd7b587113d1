use std::cmp::Ordering;

use smallvec::SmallVec;

use super::dcel_operations;
use super::handles::*;
use super::math;

use crate::{DelaunayTriangulation, HasPosition, InsertionError, Point2, PositionInTriangulation};

/// Location of a new vertex while all existing vertices are collinear.
enum LinePosition {
    /// On the line, strictly between the two ends of this edge.
    Between(FixedDirectedEdgeHandle),
    /// On the line, beyond this end vertex.
    BeyondEnd(FixedVertexHandle),
    /// Coincides with an existing vertex.
    Vertex(FixedVertexHandle),
    /// Not on the line. The position is on the left side of this edge.
    Beside(FixedDirectedEdgeHandle),
}

impl<V, F> DelaunayTriangulation<V, F>
where
    V: HasPosition,
    F: Default,
{
    pub(crate) fn insert_with_hint_option(
        &mut self,
        vertex: V,
        hint: Option<FixedVertexHandle>,
    ) -> Result<FixedVertexHandle, InsertionError> {
        math::validate_vertex(&vertex)?;
        let result = self.insert_validated(vertex, hint)?;
        self.hint_generator.notify_vertex_inserted(result);
        Ok(result)
    }

    fn insert_validated(
        &mut self,
        vertex: V,
        hint: Option<FixedVertexHandle>,
    ) -> Result<FixedVertexHandle, InsertionError> {
        use PositionInTriangulation::*;

        match self.num_vertices() {
            0 => return Ok(dcel_operations::insert_first_vertex(&mut self.dcel, vertex)),
            1 => return self.insert_second_vertex(vertex),
            _ => {}
        }

        let position = vertex.position();
        if self.all_vertices_on_line() {
            return match self.locate_on_line(position) {
                LinePosition::Between(edge) => Ok(
                    dcel_operations::split_edge_when_all_vertices_on_line(&mut self.dcel, edge, vertex),
                ),
                LinePosition::BeyondEnd(end) => {
                    Ok(dcel_operations::extend_line(&mut self.dcel, end, vertex))
                }
                LinePosition::Vertex(existing) => Err(InsertionError::Duplicate(existing)),
                LinePosition::Beside(edge) => Ok(self.insert_outside_of_convex_hull(edge, vertex)),
            };
        }

        match self.locate_with_hint_option_core(position, hint) {
            OnFace(face) => Ok(self.insert_into_face(face, vertex)),
            OnEdge(edge) => Ok(self.insert_on_edge(edge, vertex)),
            OutsideOfConvexHull(edge) => Ok(self.insert_outside_of_convex_hull(edge, vertex)),
            OnVertex(existing) => Err(InsertionError::Duplicate(existing)),
            NoTriangulation => {
                panic!("Located nothing in a non empty triangulation. This is a bug.")
            }
        }
    }

    fn insert_second_vertex(&mut self, vertex: V) -> Result<FixedVertexHandle, InsertionError> {
        let first = FixedVertexHandle::new(0);
        if self.vertex(first).position() == vertex.position() {
            return Err(InsertionError::Duplicate(first));
        }
        Ok(dcel_operations::insert_second_vertex(&mut self.dcel, vertex))
    }

    fn locate_on_line(&self, position: Point2<V::Scalar>) -> LinePosition {
        let edge = self
            .directed_edges()
            .next()
            .expect("Line without edges. This is a bug.");
        let side = edge.side_query(position);
        if side.is_on_left_side() {
            return LinePosition::Beside(edge.fix());
        }
        if side.is_on_right_side() {
            return LinePosition::Beside(edge.fix().rev());
        }

        // Collinear points are ordered along the line by their lexicographic order.
        // Coordinates are validated, so partial_cmp never fails.
        let order = |left: Point2<V::Scalar>, right: Point2<V::Scalar>| {
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        };

        let mut closest_below: Option<VertexHandle<V, F>> = None;
        let mut closest_above: Option<VertexHandle<V, F>> = None;
        for vertex in self.vertices() {
            let (slot, closer) = match order(vertex.position(), position) {
                Ordering::Equal => return LinePosition::Vertex(vertex.fix()),
                Ordering::Less => (&mut closest_below, Ordering::Greater),
                Ordering::Greater => (&mut closest_above, Ordering::Less),
            };
            if slot.map_or(true, |current| order(vertex.position(), current.position()) == closer) {
                *slot = Some(vertex);
            }
        }

        match (closest_below, closest_above) {
            (Some(below), Some(above)) => {
                let edge = self
                    .dcel
                    .get_edge_from_neighbors(below.fix(), above.fix())
                    .expect("Neighbors on a line are not connected. This is a bug.");
                LinePosition::Between(edge.fix())
            }
            (Some(end), None) | (None, Some(end)) => LinePosition::BeyondEnd(end.fix()),
            (None, None) => panic!("Line without vertices. This is a bug."),
        }
    }

    fn insert_outside_of_convex_hull(
        &mut self,
        hull_edge: FixedDirectedEdgeHandle,
        vertex: V,
    ) -> FixedVertexHandle {
        let position = vertex.position();
        debug_assert!(self
            .directed_edge(hull_edge)
            .side_query(position)
            .is_on_left_side());

        let new_vertex =
            dcel_operations::create_new_face_adjacent_to_edge(&mut self.dcel, hull_edge, vertex);

        let hull_edge_handle = self.directed_edge(hull_edge);
        let mut ccw_outer = hull_edge_handle.prev().rev().fix();
        let mut cw_outer = hull_edge_handle.next().rev().fix();
        self.legalize_edge(hull_edge);

        // Every further hull edge visible from the new vertex gets its own triangle
        loop {
            let prev = self.directed_edge(ccw_outer).prev();
            if !prev.side_query(position).is_on_left_side() {
                break;
            }
            let prev = prev.fix();
            ccw_outer =
                dcel_operations::create_single_face_between_edge_and_next(&mut self.dcel, prev);
            self.legalize_edge(prev);
        }

        loop {
            let next = self.directed_edge(cw_outer).next();
            if !next.side_query(position).is_on_left_side() {
                break;
            }
            let next = next.fix();
            cw_outer = dcel_operations::create_single_face_between_edge_and_next(
                &mut self.dcel,
                cw_outer,
            );
            self.legalize_edge(next);
        }

        new_vertex
    }

    fn insert_into_face(&mut self, face: FixedFaceHandle, vertex: V) -> FixedVertexHandle {
        let new_vertex = dcel_operations::insert_into_triangle(&mut self.dcel, vertex, face);
        self.legalize_vertex(new_vertex);
        new_vertex
    }

    fn insert_on_edge(&mut self, edge: FixedDirectedEdgeHandle, vertex: V) -> FixedVertexHandle {
        let handle = self.directed_edge(edge);
        let new_vertex = match (handle.is_outer_edge(), handle.rev().is_outer_edge()) {
            (true, _) => dcel_operations::split_half_edge(&mut self.dcel, edge.rev(), vertex),
            (_, true) => dcel_operations::split_half_edge(&mut self.dcel, edge, vertex),
            _ => dcel_operations::split_edge(&mut self.dcel, edge, vertex),
        };
        self.legalize_vertex(new_vertex);
        new_vertex
    }

    /// Legalizes all edges opposite of `vertex`.
    fn legalize_vertex(&mut self, vertex: FixedVertexHandle) {
        let opposite_edges: SmallVec<[_; 4]> = self
            .vertex(vertex)
            .out_edges()
            .filter(|edge| !edge.is_outer_edge())
            .map(|edge| edge.next().fix())
            .collect();

        for edge in opposite_edges {
            self.legalize_edge(edge);
        }
    }

    /// Restores the Delaunay property after a vertex was inserted on the left side of
    /// `edge`.
    ///
    /// Flipping an illegal edge can make the two far edges of the flipped quad illegal,
    /// these are checked next. Every flip removes an illegal edge, so this terminates.
    fn legalize_edge(&mut self, edge: FixedDirectedEdgeHandle) {
        let mut candidates: SmallVec<[FixedDirectedEdgeHandle; 8]> = SmallVec::new();
        candidates.push(edge);

        while let Some(candidate) = candidates.pop() {
            if !self.is_illegal(candidate) {
                continue;
            }
            let far_side = self.directed_edge(candidate).rev();
            let far_edges = [far_side.next().fix(), far_side.prev().fix()];

            log::trace!("flipping edge {}", candidate.as_undirected().index());
            dcel_operations::flip_cw(&mut self.dcel, candidate.as_undirected());
            candidates.extend(far_edges);
        }
    }

    /// An inner edge is illegal if the vertex on its left lies inside the circumcircle of
    /// the triangle on its right.
    fn is_illegal(&self, edge: FixedDirectedEdgeHandle) -> bool {
        //   far-------to
        //    |      / |
        //    |  edge  |
        //    |  /     |
        //   from----near
        let edge = self.directed_edge(edge);
        match (edge.rev().opposite_position(), edge.opposite_position()) {
            (Some(far), Some(near)) => {
                let from = edge.from().position();
                let to = edge.to().position();
                debug_assert!(math::is_ordered_ccw(far, to, from));
                math::contained_in_circumference(far, to, from, near)
            }
            _ => false,
        }
    }
}

impl<V, F> DelaunayTriangulation<V, F>
where
    V: HasPosition,
{
    pub(crate) fn locate_with_hint_option_core(
        &self,
        point: Point2<V::Scalar>,
        hint: Option<FixedVertexHandle>,
    ) -> PositionInTriangulation {
        let start = hint.unwrap_or_else(|| self.hint_generator.get_hint());
        self.locate_from(point, start)
    }

    /// Greedily walks along edges to the vertex closest to `position`.
    fn walk_to_nearest_neighbor(
        &self,
        start: FixedVertexHandle,
        position: Point2<V::Scalar>,
    ) -> VertexHandle<V, F> {
        let mut current = self.vertex(start);
        let mut distance = current.position().distance_2(position);

        while let Some((closer, closer_distance)) = current
            .out_edges()
            .map(|edge| edge.to())
            .map(|neighbor| (neighbor, neighbor.position().distance_2(position)))
            .find(|(_, neighbor_distance)| *neighbor_distance < distance)
        {
            current = closer;
            distance = closer_distance;
        }
        current
    }

    fn locate_from(
        &self,
        target: Point2<V::Scalar>,
        start: FixedVertexHandle,
    ) -> PositionInTriangulation {
        if self.num_vertices() < 2 {
            return match self.vertices().next() {
                Some(single) if single.position() == target => {
                    PositionInTriangulation::OnVertex(single.fix())
                }
                _ => PositionInTriangulation::NoTriangulation,
            };
        }

        let start = if start.index() < self.num_vertices() {
            start
        } else {
            FixedVertexHandle::new(0)
        };
        let out_edge = self
            .walk_to_nearest_neighbor(start, target)
            .out_edge()
            .expect("Vertex without out edge. This is a bug.");

        // Invariant: target is on the left side of edge or on its line
        let mut edge = if out_edge.side_query(target).is_on_right_side() {
            out_edge.rev()
        } else {
            out_edge
        };

        loop {
            if edge.is_outer_edge() {
                if !edge.side_query(target).is_on_line() {
                    self.hint_generator.notify_vertex_lookup(edge.from().fix());
                    return PositionInTriangulation::OutsideOfConvexHull(edge.fix());
                }
                if edge.rev().is_outer_edge() {
                    return self.locate_on_line_walk(edge.rev(), target);
                }
                edge = edge.rev();
                continue;
            }

            let triangle = [edge, edge.next(), edge.prev()];
            let sides = triangle.map(|e| e.side_query(target));
            if let Some(index) = sides.iter().position(|side| side.is_on_right_side()) {
                edge = triangle[index].rev();
                continue;
            }

            self.hint_generator.notify_vertex_lookup(edge.from().fix());
            let on_line: SmallVec<[_; 3]> = triangle
                .iter()
                .zip(sides)
                .filter(|(_, side)| side.is_on_line())
                .map(|(e, _)| *e)
                .collect();

            return match on_line.as_slice() {
                [] => PositionInTriangulation::OnFace(edge.face().fix()),
                [single] => PositionInTriangulation::OnEdge(single.fix()),
                [first, second] => {
                    // Two edges of a triangle meet in exactly one vertex
                    let shared = if first.to() == second.from() {
                        first.to()
                    } else {
                        first.from()
                    };
                    PositionInTriangulation::OnVertex(shared.fix())
                }
                _ => panic!("Degenerate triangle. This is a bug."),
            };
        }
    }

    /// Locates `position` while all vertices are on a line. `position` is on that line.
    fn locate_on_line_walk(
        &self,
        start: DirectedEdgeHandle<V, F>,
        position: Point2<V::Scalar>,
    ) -> PositionInTriangulation {
        let mut edge = if start.project_point(position).is_before_edge() {
            start.rev()
        } else {
            start
        };

        loop {
            if let Some(vertex) = edge.vertices().into_iter().find(|v| v.position() == position) {
                return PositionInTriangulation::OnVertex(vertex.fix());
            }
            if !edge.project_point(position).is_behind_edge() {
                return PositionInTriangulation::OnEdge(edge.fix());
            }

            let next = edge.next();
            if next == edge.rev() {
                return PositionInTriangulation::OutsideOfConvexHull(edge.fix());
            }
            edge = next;
        }
    }
}

#[cfg(test)]
mod test {
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;

    use crate::handles::FixedVertexHandle;
    use crate::test_utilities::*;
    use crate::{DelaunayTriangulation, InsertionError, Point2};

    #[test]
    fn test_empty() {
        let d = DelaunayTriangulation::<Point2<f32>>::default();
        assert_eq!(d.num_vertices(), 0);
        assert_eq!(d.num_all_faces(), 1);
        assert_eq!(d.num_undirected_edges(), 0);
    }

    #[test]
    fn test_insert_first_and_second() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<Point2<f32>>::default();
        d.insert(Point2::default())?;
        assert_eq!(d.num_vertices(), 1);
        assert_eq!(d.num_all_faces(), 1);
        assert_eq!(d.num_undirected_edges(), 0);

        d.insert(Point2::new(0.123, 1.234))?;
        assert_eq!(d.num_vertices(), 2);
        assert_eq!(d.num_all_faces(), 1);
        assert_eq!(d.num_undirected_edges(), 1);
        assert!(d.all_vertices_on_line());
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_third_point() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        d.insert(Point2::new(1f64, 0f64))?;
        d.insert(Point2::new(0f64, 1f64))?;
        d.insert(Point2::new(1f64, 1f64))?;

        assert_eq!(d.num_vertices(), 3);
        assert_eq!(d.num_all_faces(), 2);
        assert_eq!(d.num_inner_faces(), 1);
        assert!(!d.all_vertices_on_line());
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_five_points() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        d.insert(Point2::new(1f64, 0f64))?;
        d.insert(Point2::new(0f64, 1f64))?;

        let v3 = Point2::new(0.433_833_144_214_401f64, 0.900_993_231_373_602_9f64);
        let v4 = Point2::new(2.0, 2.0);
        let v5 = Point2::new(0.5, 0.25);
        d.insert(v3)?;
        d.sanity_check();
        d.insert(v4)?;
        d.sanity_check();
        d.insert(v5)?;
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_many_points() -> Result<(), InsertionError> {
        const SIZE: usize = 3000;
        let points = random_points_with_seed(SIZE, SEED);

        let mut d = DelaunayTriangulation::<_>::new();
        for point in points {
            d.insert(point)?;
        }

        assert_eq!(d.num_vertices(), SIZE);
        assert_eq!(d.inner_faces().count(), d.num_inner_faces());
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_outside_convex_hull() -> Result<(), InsertionError> {
        const NUM: usize = 100;
        let mut rng = rand::rngs::StdRng::from_seed(*SEED);
        let range = Uniform::new(0., 2.0 * ::std::f64::consts::PI);

        let mut d = DelaunayTriangulation::<_>::default();

        // Every point on the circle lies outside of the current convex hull
        for _ in 0..NUM {
            let ang = range.sample(&mut rng);
            let vec = Point2::new(ang.sin(), ang.cos());
            d.insert(vec)?;
        }
        assert_eq!(d.num_vertices(), NUM);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_same_point_is_rejected() -> Result<(), InsertionError> {
        let points = random_points_with_seed(300, SEED2);
        let mut d = DelaunayTriangulation::<_>::default();
        for p in &points {
            d.insert(*p)?;
        }
        let num_edges = d.num_undirected_edges();

        for (index, p) in points.iter().enumerate() {
            assert_eq!(
                d.insert(*p),
                Err(InsertionError::Duplicate(FixedVertexHandle::new(index)))
            );
        }
        assert_eq!(d.num_vertices(), points.len());
        assert_eq!(d.num_undirected_edges(), num_edges);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_same_point_small() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        let first = Point2::new(0.2, 0.1);
        d.insert(first)?;
        assert_eq!(
            d.insert(first),
            Err(InsertionError::Duplicate(FixedVertexHandle::new(0)))
        );
        d.insert(Point2::new(1.3, 2.2))?;
        d.insert(Point2::new(2.0, 0.5))?;
        assert_eq!(
            d.insert(Point2::new(1.3, 2.2)),
            Err(InsertionError::Duplicate(FixedVertexHandle::new(1)))
        );
        assert_eq!(d.num_vertices(), 3);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_invalid_coordinates_are_rejected() {
        let mut d = DelaunayTriangulation::<_>::default();
        assert_eq!(
            d.insert(Point2::new(f64::NAN, 0.0)),
            Err(InsertionError::NAN)
        );
        assert_eq!(
            d.insert(Point2::new(0.0, f64::INFINITY)),
            Err(InsertionError::TooLarge)
        );
        assert_eq!(
            d.insert(Point2::new(1.0e-44, 1.0)),
            Err(InsertionError::TooSmall)
        );
        assert_eq!(d.num_vertices(), 0);
    }

    #[test]
    fn test_insert_on_edges() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        d.insert(Point2::new(0., 0f64))?;
        d.insert(Point2::new(1., 0.))?;

        d.insert(Point2::new(1., 1.))?;
        d.sanity_check();
        d.insert(Point2::new(0.5, 0.5))?;
        d.sanity_check();
        d.insert(Point2::new(0., 0.4))?;
        d.sanity_check();
        d.insert(Point2::new(1., 0.5))?;
        d.sanity_check();
        d.insert(Point2::new(0.5, 1.))?;
        d.sanity_check();
        d.insert(Point2::new(0.7, 0.))?;
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_degenerate_triangulation() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        for i in -50..50 {
            d.insert(Point2::new(f64::from(i), 0.))?;
        }
        assert!(d.all_vertices_on_line());
        assert_eq!(d.num_undirected_edges(), 99);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_points_on_line() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        d.insert(Point2::new(0.0, 1.0))?;

        for i in -50..50 {
            d.insert(Point2::new(f64::from(i), 0.))?;
            d.sanity_check();
        }

        for i in -10..10 {
            if i == 0 {
                continue;
            }
            d.insert(Point2::new(f64::from(i), 0.5 * f64::from(i)))?;
            d.sanity_check();
        }
        Ok(())
    }

    #[test]
    fn test_leave_line_in_the_middle() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        for x in [0.0, 4.0, 2.0, 1.0, 3.0, -1.0] {
            d.insert(Point2::new(x, 0.0))?;
        }
        d.sanity_check();
        d.insert(Point2::new(1.5, 1.0))?;
        assert!(!d.all_vertices_on_line());
        assert_eq!(d.num_inner_faces(), 5);
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_points_on_grid() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();

        for y in 0..20 {
            for x in 0..7 {
                d.insert(Point2::new(f64::from(x), f64::from(y)))?;
                d.sanity_check();
            }
        }
        Ok(())
    }

    #[test]
    fn test_insert_points_with_increasing_distance() -> Result<(), InsertionError> {
        let mut points = random_points_with_seed(1000, SEED);
        points.sort_by(|p1, p2| p1.length2().partial_cmp(&p2.length2()).unwrap());
        let mut d = DelaunayTriangulation::<_>::new();
        for point in points {
            d.insert(point)?;
        }
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_points_on_grid_with_increasing_distance() -> Result<(), InsertionError> {
        let mut points = Vec::new();
        const SIZE: i64 = 7;
        for x in -SIZE..SIZE {
            for y in -SIZE..SIZE {
                points.push(Point2::new(x as f64, y as f64));
            }
        }
        points.sort_by(|p1, p2| p1.length2().partial_cmp(&p2.length2()).unwrap());
        let mut d = DelaunayTriangulation::<_>::new();
        for point in points {
            d.insert(point)?;
        }
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_near_degenerate() -> Result<(), InsertionError> {
        use float_next_after::NextAfter;

        let mut d = DelaunayTriangulation::<_>::default();
        d.insert(Point2::new(0.0, 0.0))?;
        d.insert(Point2::new(1.0, 0.0))?;
        d.insert(Point2::new(2.0, 0.0))?;
        // Barely above the line
        d.insert(Point2::new(1.0, crate::MIN_ALLOWED_VALUE))?;
        assert!(!d.all_vertices_on_line());
        d.sanity_check();
        // Barely next to an existing vertex
        d.insert(Point2::new(1.0f64.next_after(f64::INFINITY), 0.0))?;
        d.sanity_check();
        Ok(())
    }

    #[test]
    fn test_changed_faces_are_reported() -> Result<(), InsertionError> {
        let mut d = DelaunayTriangulation::<_>::default();
        d.insert(Point2::new(0.0, 0.0))?;
        d.insert(Point2::new(1.0, 0.0))?;
        assert!(d.take_changed_faces().is_empty());

        d.insert(Point2::new(0.0, 1.0))?;
        let changed = d.take_changed_faces();
        assert_eq!(changed.len(), 1);

        d.insert(Point2::new(0.25, 0.25))?;
        let changed = d.take_changed_faces();
        assert_eq!(changed.len(), 3);
        for face in d.inner_faces() {
            assert!(changed.contains(&face.fix()));
        }

        assert_eq!(
            d.insert(Point2::new(0.25, 0.25)),
            Err(InsertionError::Duplicate(FixedVertexHandle::new(3)))
        );
        assert!(d.take_changed_faces().is_empty());
        Ok(())
    }
}
