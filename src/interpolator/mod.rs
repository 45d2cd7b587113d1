//! Piecewise linear interpolation over a Delaunay triangulation with adaptive sampling.

mod error_queue;
mod export;
mod refinement;

pub use error_queue::ErrorTuple;
pub use export::{LineSegment, TriangleRecord};
pub use refinement::{RefinementParameters, RefinementResult};

use error_queue::ErrorQueue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::delaunay_core::math;
use crate::handles::*;
use crate::{
    BoundedSide, DelaunayTriangulation, HasPosition, InterpError, InterpResult, Point2,
    PositionInTriangulation,
};

/// A sample stored by a [DelaunayInterpolator].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct InterpVertex {
    position: Point2<f64>,
    value: f64,
    gradient: Option<[f64; 2]>,
}

impl InterpVertex {
    /// The function value at this vertex.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Area weighted mean of the gradients of all adjacent triangles.
    ///
    /// `None` while the vertex is not part of any triangle.
    pub fn gradient(&self) -> Option<[f64; 2]> {
        self.gradient
    }
}

impl HasPosition for InterpVertex {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Face data of the interpolator's triangulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceData {
    serial: u64,
}

impl FaceData {
    /// Creation stamp of the face.
    ///
    /// Renewed whenever an insertion splits or flips the face. Smaller serials belong to
    /// older triangles.
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

/// The triangulation type used by [DelaunayInterpolator].
pub type InterpTriangulation = DelaunayTriangulation<InterpVertex, FaceData>;

/// A scalar function evaluated at `[x, y]`.
pub type ValueFunction = Box<dyn Fn(&[f64]) -> f64>;

type InterpFaceHandle<'a> = FaceHandle<'a, InterpVertex, FaceData>;
type InterpVertexHandle<'a> = VertexHandle<'a, InterpVertex, FaceData>;

enum Location {
    Vertex(FixedVertexHandle),
    Edge(FixedDirectedEdgeHandle),
    Face(FixedFaceHandle),
}

/// Interpolates scattered samples of a scalar function of two variables.
///
/// Samples are inserted into a [DelaunayTriangulation], queries return the value of the
/// linear interpolant of the triangle containing the query point. If a value function is
/// bound, every triangle's interpolation error is estimated at its centroid. The
/// triangle with the largest error can then be split by sampling the function there,
/// see [Self::insert_largest_error_point] and [Self::refine].
///
/// # Example
/// ```
/// use delaunay_linterp::{DelaunayInterpolator, InterpError, Point2};
///
/// fn main() -> Result<(), InterpError> {
///     let mut interpolator = DelaunayInterpolator::new();
///     interpolator.insert_with_value(Point2::new(0.0, 0.0), 0.0)?;
///     interpolator.insert_with_value(Point2::new(1.0, 0.0), 1.0)?;
///     interpolator.insert_with_value(Point2::new(0.0, 1.0), 1.0)?;
///
///     assert_eq!(interpolator.interp(Point2::new(0.5, 0.5))?, 1.0);
///     assert!(matches!(
///         interpolator.interp(Point2::new(2.0, 2.0)),
///         Err(InterpError::OutsideDomain { .. })
///     ));
///     Ok(())
/// }
/// ```
pub struct DelaunayInterpolator {
    triangulation: InterpTriangulation,
    function: Option<ValueFunction>,
    error_queue: ErrorQueue,
    next_serial: u64,
}

impl Default for DelaunayInterpolator {
    fn default() -> Self {
        Self {
            triangulation: InterpTriangulation::default(),
            function: None,
            error_queue: ErrorQueue::default(),
            next_serial: 1,
        }
    }
}

impl std::fmt::Debug for DelaunayInterpolator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelaunayInterpolator")
            .field("num_vertices", &self.num_vertices())
            .field("num_triangles", &self.num_triangles())
            .field("num_evaluated_triangles", &self.error_queue.len())
            .field("has_function", &self.has_function())
            .finish()
    }
}

impl DelaunayInterpolator {
    /// Creates an interpolator without a value function.
    ///
    /// Values must be passed to [Self::insert_with_value]. No errors are estimated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interpolator sampling `function`.
    ///
    /// The function receives the coordinates as `[x, y]`.
    pub fn with_function(function: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        Self {
            function: Some(Box::new(function)),
            ..Self::default()
        }
    }

    pub fn has_function(&self) -> bool {
        self.function.is_some()
    }

    /// Read access to the underlying triangulation.
    pub fn triangulation(&self) -> &InterpTriangulation {
        &self.triangulation
    }

    pub fn num_vertices(&self) -> usize {
        self.triangulation.num_vertices()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangulation.num_inner_faces()
    }

    /// Inserts a sample, its value is taken from the bound function.
    ///
    /// Returns the id of the new vertex. Fails with [InterpError::MissingValueFunction] if
    /// no function is bound and with [InterpError::DuplicatePoint] if the position was
    /// sampled before. Nothing is modified if an error is returned.
    pub fn insert(&mut self, point: Point2<f64>) -> InterpResult<usize> {
        validate_point(point)?;
        let value = self.evaluate(point)?;
        self.insert_with_value(point, value)
    }

    /// Inserts a sample with an explicit value.
    pub fn insert_with_value(&mut self, point: Point2<f64>, value: f64) -> InterpResult<usize> {
        if !value.is_finite() {
            return Err(InterpError::NonFiniteValue { point, value });
        }

        let vertex = InterpVertex {
            position: point,
            value,
            gradient: None,
        };
        let handle = self
            .triangulation
            .insert(vertex)
            .map_err(|error| InterpError::from_insertion(point, error))?;

        let changed_faces = self.triangulation.take_changed_faces();
        log::debug!(
            "inserted vertex {} at ({}, {}) with value {}, {} faces changed",
            handle.index(),
            point.x,
            point.y,
            value,
            changed_faces.len()
        );
        self.update_changed_faces(&changed_faces);
        Ok(handle.index())
    }

    /// Same as [Self::insert] for coordinates given as a slice of length 2.
    pub fn insert_coords(&mut self, coords: &[f64]) -> InterpResult<usize> {
        self.insert(Point2::try_from(coords)?)
    }

    /// Evaluates the interpolant.
    ///
    /// Points on a vertex return that vertex' value exactly. While all samples are
    /// collinear, points on the line are interpolated along the containing segment.
    pub fn interp(&self, point: Point2<f64>) -> InterpResult<f64> {
        let location = self.locate(point)?;
        if let Location::Vertex(vertex) = location {
            return Ok(self.triangulation.vertex(vertex).data().value);
        }

        if let Some(face) = self.resolve_face(&location) {
            let face = self.triangulation.face(face);
            let weights = clamped_weights(face.barycentric_interpolation(point));
            let values = face.vertices().map(|v| v.data().value);
            return Ok(weights.iter().zip(values).map(|(w, v)| w * v).sum());
        }

        match location {
            Location::Edge(edge) => {
                let edge = self.triangulation.directed_edge(edge);
                let t = edge.project_point(point).relative_position().clamp(0.0, 1.0);
                let [from, to] = edge.vertices();
                Ok((1.0 - t) * from.data().value + t * to.data().value)
            }
            _ => Err(InterpError::OutsideDomain { point }),
        }
    }

    /// Same as [Self::interp] for coordinates given as a slice of length 2.
    pub fn interp_coords(&self, coords: &[f64]) -> InterpResult<f64> {
        self.interp(Point2::try_from(coords)?)
    }

    /// Returns the gradient `[df/dx, df/dy]` of the interpolant.
    ///
    /// The interpolant is linear within each triangle, so the gradient is constant per
    /// triangle. Fails with [InterpError::Degenerate] if no triangle exists yet.
    pub fn gradient(&self, point: Point2<f64>) -> InterpResult<[f64; 2]> {
        let location = self.locate(point)?;
        let face = self
            .resolve_face(&location)
            .ok_or(InterpError::Degenerate { point })?;
        face_gradient(self.triangulation.face(face)).ok_or(InterpError::Degenerate { point })
    }

    /// Same as [Self::gradient] for coordinates given as a slice of length 2.
    pub fn gradient_coords(&self, coords: &[f64]) -> InterpResult<[f64; 2]> {
        self.gradient(Point2::try_from(coords)?)
    }

    /// Returns the vertex ids and barycentric weights of the triangle used to interpolate
    /// at `point`.
    ///
    /// The weights are non-negative and sum up to one.
    pub fn barycentric_coordinates(
        &self,
        point: Point2<f64>,
    ) -> InterpResult<([usize; 3], [f64; 3])> {
        let location = self.locate(point)?;
        let face = self
            .resolve_face(&location)
            .ok_or(InterpError::Degenerate { point })?;
        let face = self.triangulation.face(face);
        let ids = face.vertices().map(|v| v.index());

        let weights = match location {
            Location::Vertex(vertex) => ids.map(|id| if id == vertex.index() { 1.0 } else { 0.0 }),
            _ => clamped_weights(face.barycentric_interpolation(point)),
        };
        Ok((ids, weights))
    }

    /// Classifies a point relative to the convex hull of all samples.
    pub fn bounded_side(&self, point: Point2<f64>) -> InterpResult<BoundedSide> {
        use PositionInTriangulation::*;

        validate_point(point)?;
        let side = match self.triangulation.locate(point) {
            NoTriangulation | OutsideOfConvexHull(_) => BoundedSide::OnUnboundedSide,
            _ if self.triangulation.all_vertices_on_line() => BoundedSide::OnBoundary,
            OnFace(_) => BoundedSide::OnBoundedSide,
            OnEdge(edge) => {
                if self.triangulation.directed_edge(edge).is_part_of_convex_hull() {
                    BoundedSide::OnBoundary
                } else {
                    BoundedSide::OnBoundedSide
                }
            }
            OnVertex(vertex) => {
                if self.triangulation.vertex(vertex).is_on_convex_hull() {
                    BoundedSide::OnBoundary
                } else {
                    BoundedSide::OnBoundedSide
                }
            }
        };
        Ok(side)
    }

    /// Returns the stored gradient estimate of a vertex.
    ///
    /// `None` for unknown ids and for vertices that are not part of any triangle.
    pub fn vertex_gradient(&self, id: usize) -> Option<[f64; 2]> {
        self.vertex_by_id(id)?.data().gradient
    }

    /// Returns the error estimate of every evaluated triangle, largest error first.
    ///
    /// Triangles whose rounded centroid does not lie strictly inside of them are not
    /// evaluated.
    pub fn get_error_queue(&self) -> Vec<ErrorTuple> {
        self.error_queue
            .iter_descending()
            .map(|(_, tuple)| *tuple)
            .collect()
    }

    /// Returns the error estimate of the triangle with the largest error.
    ///
    /// Triangles with equal errors are ordered by age, the oldest one is returned.
    pub fn get_largest_error_tuple(&self) -> InterpResult<ErrorTuple> {
        self.error_queue
            .largest()
            .map(|(_, tuple)| *tuple)
            .ok_or(InterpError::EmptyErrorQueue)
    }

    /// Samples the function at the representative point of the triangle with the
    /// largest error.
    ///
    /// Returns the id of the new vertex.
    pub fn insert_largest_error_point(&mut self) -> InterpResult<usize> {
        let (face, tuple) = self
            .error_queue
            .largest()
            .map(|(face, tuple)| (face, *tuple))
            .ok_or(InterpError::EmptyErrorQueue)?;
        log::debug!(
            "splitting face {} with error {} at ({}, {})",
            face.index(),
            tuple.error,
            tuple.point.x,
            tuple.point.y
        );
        self.insert_with_value(tuple.point, tuple.value)
    }

    /// Inserts largest error points until the error threshold or the vertex budget is
    /// reached.
    ///
    /// Returns early with an error if an insertion fails, vertices inserted before stay in
    /// the triangulation.
    pub fn refine(&mut self, parameters: RefinementParameters) -> InterpResult<RefinementResult> {
        if self.error_queue.is_empty() {
            log::debug!("refinement skipped, no triangle has been evaluated");
        }
        let max_additional_vertices = parameters.max_additional_vertices(self.num_vertices());
        let mut added_vertices = Vec::new();

        let refinement_complete = loop {
            let largest_error = match self.error_queue.largest() {
                Some((_, tuple)) => tuple.error,
                None => break true,
            };
            if largest_error <= parameters.error_threshold() {
                break true;
            }
            if added_vertices.len() >= max_additional_vertices {
                break false;
            }
            added_vertices.push(self.insert_largest_error_point()?);
        };

        let largest_error = self.error_queue.largest().map(|(_, tuple)| tuple.error);
        log::debug!(
            "refinement added {} vertices, largest remaining error: {:?}",
            added_vertices.len(),
            largest_error
        );
        if !refinement_complete {
            log::warn!(
                "refinement stopped after {} vertices before reaching error threshold {}",
                added_vertices.len(),
                parameters.error_threshold()
            );
        }

        Ok(RefinementResult {
            added_vertices,
            largest_error,
            refinement_complete,
        })
    }

    /// Returns the position and id of every vertex in insertion order.
    pub fn get_all_vertices(&self) -> Vec<(Point2<f64>, usize)> {
        self.triangulation
            .vertices()
            .map(|vertex| (vertex.position(), vertex.index()))
            .collect()
    }

    /// Returns every edge of the triangulation exactly once.
    pub fn get_line_segments(&self) -> Vec<LineSegment> {
        self.triangulation
            .undirected_edges()
            .map(|edge| {
                let [from, to] = edge.vertices();
                LineSegment {
                    from: lift(from),
                    to: lift(to),
                    id: edge.index(),
                }
            })
            .collect()
    }

    /// Returns all triangles together with their current error estimate.
    pub fn get_triangles(&self) -> Vec<TriangleRecord> {
        self.triangulation
            .inner_faces()
            .map(|face| TriangleRecord {
                vertices: face.vertices().map(|v| v.index()),
                error: self.error_queue.get(face.fix()).copied(),
            })
            .collect()
    }

    /// Returns the minimum and maximum of `[x, y, value]` over all vertices.
    pub fn bounding_box(&self) -> Option<([f64; 3], [f64; 3])> {
        let mut points = self.triangulation.vertices().map(lift);
        let first = points.next()?;
        Some(points.fold((first, first), |(mut min, mut max), point| {
            for i in 0..3 {
                min[i] = min[i].min(point[i]);
                max[i] = max[i].max(point[i]);
            }
            (min, max)
        }))
    }

    fn vertex_by_id(&self, id: usize) -> Option<InterpVertexHandle> {
        (id < self.num_vertices()).then(|| self.triangulation.vertex(FixedVertexHandle::new(id)))
    }

    fn evaluate(&self, point: Point2<f64>) -> InterpResult<f64> {
        let function = self
            .function
            .as_ref()
            .ok_or(InterpError::MissingValueFunction { point })?;
        let value = function(&[point.x, point.y]);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(InterpError::NonFiniteValue { point, value })
        }
    }

    fn locate(&self, point: Point2<f64>) -> InterpResult<Location> {
        use PositionInTriangulation::*;

        validate_point(point)?;
        match self.triangulation.locate(point) {
            OnVertex(vertex) => Ok(Location::Vertex(vertex)),
            OnEdge(edge) => Ok(Location::Edge(edge)),
            OnFace(face) => Ok(Location::Face(face)),
            OutsideOfConvexHull(_) | NoTriangulation => Err(InterpError::OutsideDomain { point }),
        }
    }

    /// Picks the inner face used for a location.
    ///
    /// Points on edges and vertices resolve to the incident face with the lowest serial.
    fn resolve_face(&self, location: &Location) -> Option<FixedFaceHandle> {
        match *location {
            Location::Face(face) => Some(face),
            Location::Edge(edge) => {
                let edge = self.triangulation.directed_edge(edge);
                oldest_face([edge.face(), edge.rev().face()])
            }
            Location::Vertex(vertex) => oldest_face(
                self.triangulation
                    .vertex(vertex)
                    .out_edges()
                    .map(|edge| edge.face()),
            ),
        }
    }

    fn update_changed_faces(&mut self, changed_faces: &[FixedFaceHandle]) {
        for &face in changed_faces {
            self.triangulation.face_data_mut(face).serial = self.next_serial;
            self.next_serial += 1;
            self.error_queue.remove(face);
        }

        let mut vertices: Vec<FixedVertexHandle> = changed_faces
            .iter()
            .flat_map(|&face| self.triangulation.face(face).vertices().map(|v| v.fix()))
            .collect();
        vertices.sort_unstable();
        vertices.dedup();

        for vertex in vertices {
            let gradient = self.estimate_vertex_gradient(vertex);
            self.triangulation.vertex_data_mut(vertex).gradient = gradient;
        }

        if self.function.is_some() {
            for &face in changed_faces {
                if let Some(tuple) = self.evaluate_face(face) {
                    let serial = self.triangulation.face(face).data().serial;
                    self.error_queue.insert(face, serial, tuple);
                }
            }
        }
    }

    fn estimate_vertex_gradient(&self, vertex: FixedVertexHandle) -> Option<[f64; 2]> {
        let mut weighted_sum = [0.0, 0.0];
        let mut total_area = 0.0;
        for edge in self.triangulation.vertex(vertex).out_edges() {
            let face = edge.face();
            if face.is_outer() {
                continue;
            }
            if let Some([dx, dy]) = face_gradient(face) {
                let area = face.area();
                weighted_sum[0] += area * dx;
                weighted_sum[1] += area * dy;
                total_area += area;
            }
        }

        if total_area > 0.0 {
            Some([weighted_sum[0] / total_area, weighted_sum[1] / total_area])
        } else {
            None
        }
    }

    fn evaluate_face(&self, face: FixedFaceHandle) -> Option<ErrorTuple> {
        let function = self.function.as_ref()?;
        let face = self.triangulation.face(face);
        let point = face.center();
        if !face
            .adjacent_edges()
            .iter()
            .all(|edge| edge.side_query(point).is_on_left_side())
        {
            log::warn!(
                "skipping error estimate of face {}, its center ({}, {}) is not strictly inside",
                face.index(),
                point.x,
                point.y
            );
            return None;
        }

        let value = function(&[point.x, point.y]);
        let weights = math::barycentric_coordinates(face.positions(), point);
        let estimate: f64 = face
            .vertices()
            .iter()
            .zip(weights)
            .map(|(vertex, weight)| weight * vertex.data().value)
            .sum();
        let error = (value - estimate).abs();

        if !error.is_finite() {
            log::warn!(
                "skipping error estimate of face {}, value {} at ({}, {}) is not finite",
                face.index(),
                value,
                point.x,
                point.y
            );
            return None;
        }
        Some(ErrorTuple {
            error,
            value,
            point,
        })
    }
}

fn validate_point(point: Point2<f64>) -> InterpResult<()> {
    math::validate_vertex(&point).map_err(|reason| InterpError::InvalidCoordinate { point, reason })
}

fn oldest_face<'a>(
    faces: impl IntoIterator<Item = InterpFaceHandle<'a>>,
) -> Option<FixedFaceHandle> {
    faces
        .into_iter()
        .filter(|face| !face.is_outer())
        .min_by_key(|face| face.data().serial)
        .map(|face| face.fix())
}

fn face_gradient(face: InterpFaceHandle) -> Option<[f64; 2]> {
    let values = face.vertices().map(|v| v.data().value);
    math::plane_gradient(face.positions(), values)
}

fn clamped_weights(weights: [f64; 3]) -> [f64; 3] {
    let clamped = weights.map(|w| w.max(0.0));
    let sum: f64 = clamped.iter().sum();
    clamped.map(|w| w / sum)
}

fn lift(vertex: InterpVertexHandle) -> [f64; 3] {
    let position = vertex.position();
    [position.x, position.y, vertex.data().value]
}
