use crate::{CoordinateNum, HasPosition, InsertionError, LineSideInfo, Point2};
use num_traits::Float;

/// Indicates a point's projected position relative to an edge.
///
/// Created by [DirectedEdgeHandle::project_point](crate::handles::DirectedEdgeHandle::project_point).
#[derive(Debug, Clone, Copy)]
pub struct PointProjection<S> {
    factor: S,
    length_2: S,
}

/// The smallest allowed coordinate value greater than zero. This value is equal to
/// 2<sup>-142</sup>.
///
/// The *absolute value* of any inserted coordinate must be either zero or greater than or
/// equal to this value. Smaller values could underflow while evaluating the exact
/// geometric predicates.
// Exponent range taken from Shewchuk, "Adaptive Precision Floating-Point Arithmetic and
// Fast Robust Geometric Predicates".
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest allowed coordinate value. This value is equal to 2<sup>201</sup>.
///
/// The *absolute value* of any inserted coordinate must be smaller than or equal to this
/// value.
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Checks if a coordinate value is suitable for insertion.
///
/// Fails if the coordinate is NaN, if its absolute value is non-zero and below
/// [MIN_ALLOWED_VALUE] or if its absolute value exceeds [MAX_ALLOWED_VALUE].
/// Infinite values are reported as [InsertionError::TooLarge].
pub fn validate_coordinate<S: CoordinateNum>(value: S) -> Result<(), InsertionError> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InsertionError::NAN)
    } else if as_f64.abs() < MIN_ALLOWED_VALUE && as_f64 != 0.0 {
        Err(InsertionError::TooSmall)
    } else if as_f64.abs() > MAX_ALLOWED_VALUE {
        Err(InsertionError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if both coordinates of a vertex are valid, see [validate_coordinate].
pub fn validate_vertex<V: HasPosition>(vertex: &V) -> Result<(), InsertionError> {
    let position = vertex.position();
    validate_coordinate(position.x)?;
    validate_coordinate(position.y)?;
    Ok(())
}

impl<S: CoordinateNum> PointProjection<S> {
    fn new(factor: S, length_2: S) -> Self {
        Self { factor, length_2 }
    }

    /// Returns `true` if the projection lies before the edge's origin.
    pub fn is_before_edge(&self) -> bool {
        self.factor < S::zero()
    }

    /// Returns `true` if the projection lies behind the edge's destination.
    pub fn is_behind_edge(&self) -> bool {
        self.factor > self.length_2
    }

    /// Returns `true` if the projection lies on the edge, including its end points.
    pub fn is_on_edge(&self) -> bool {
        !self.is_before_edge() && !self.is_behind_edge()
    }

    /// Returns the projection onto the reversed edge.
    pub fn reversed(&self) -> Self {
        Self {
            factor: self.length_2 - self.factor,
            length_2: self.length_2,
        }
    }
}

impl<S: CoordinateNum + Float> PointProjection<S> {
    /// Returns the position of the projection relative to the edge.
    ///
    /// 0.0 corresponds to the edge's origin and 1.0 to its destination.
    pub fn relative_position(&self) -> S {
        self.factor / self.length_2
    }
}

pub fn project_point<S>(p1: Point2<S>, p2: Point2<S>, query_point: Point2<S>) -> PointProjection<S>
where
    S: CoordinateNum,
{
    let dir = p2.sub(p1);
    PointProjection::new(query_point.sub(p1).dot(dir), dir.length2())
}

fn to_robust_coord<S: CoordinateNum>(point: Point2<S>) -> robust::Coord<S> {
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Returns `true` if `p` lies strictly inside the circumcircle of the ccw ordered
/// triangle `v1, v2, v3`.
pub fn contained_in_circumference<S>(
    v1: Point2<S>,
    v2: Point2<S>,
    v3: Point2<S>,
    p: Point2<S>,
) -> bool
where
    S: CoordinateNum,
{
    let v1 = to_robust_coord(v1);
    let v2 = to_robust_coord(v2);
    let v3 = to_robust_coord(v3);
    let p = to_robust_coord(p);

    // incircle expects cw ordered vertices
    robust::incircle(v3, v2, v1, p) < 0.0
}

pub fn is_ordered_ccw<S>(p1: Point2<S>, p2: Point2<S>, query_point: Point2<S>) -> bool
where
    S: CoordinateNum,
{
    side_query(p1, p2, query_point).is_on_left_side_or_on_line()
}

pub fn side_query<S>(p1: Point2<S>, p2: Point2<S>, query_point: Point2<S>) -> LineSideInfo
where
    S: CoordinateNum,
{
    let p1 = to_robust_coord(p1);
    let p2 = to_robust_coord(p2);
    let query_point = to_robust_coord(query_point);

    let result = robust::orient2d(p1, p2, query_point);
    LineSideInfo::from_determinant(result)
}

pub fn triangle_area<S>(positions: [Point2<S>; 3]) -> S
where
    S: CoordinateNum,
{
    let [v0, v1, v2] = positions;
    let b = v1.sub(v0);
    let c = v2.sub(v0);
    (b.x * c.y - b.y * c.x).abs() * 0.5.into()
}

pub fn centroid<S>(positions: [Point2<S>; 3]) -> Point2<S>
where
    S: CoordinateNum + Float,
{
    let [v0, v1, v2] = positions;
    let third = S::one() / (S::one() + S::one() + S::one());
    v0.add(v1).add(v2).mul(third)
}

/// Barycentric coordinates of `coordinate` relative to a triangle.
///
/// The result may contain negative weights if the point lies outside of the triangle.
pub fn barycentric_coordinates<S>(positions: [Point2<S>; 3], coordinate: Point2<S>) -> [S; 3]
where
    S: CoordinateNum + Float,
{
    let [v1, v2, v3] = positions;
    let (x, y) = (coordinate.x, coordinate.y);
    let (x1, x2, x3) = (v1.x, v2.x, v3.x);
    let (y1, y2, y3) = (v1.y, v2.y, v3.y);
    let det = (y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3);
    let lambda1 = ((y2 - y3) * (x - x3) + (x3 - x2) * (y - y3)) / det;
    let lambda2 = ((y3 - y1) * (x - x3) + (x1 - x3) * (y - y3)) / det;
    let lambda3 = S::one() - lambda1 - lambda2;
    [lambda1, lambda2, lambda3]
}

/// Returns the gradient `[df/dx, df/dy]` of the plane through three points with the given
/// function values.
///
/// Returns `None` if the points are collinear.
pub fn plane_gradient(positions: [Point2<f64>; 3], values: [f64; 3]) -> Option<[f64; 2]> {
    let [p0, p1, p2] = positions;
    let d1 = p1.sub(p0);
    let d2 = p2.sub(p0);
    let df1 = values[1] - values[0];
    let df2 = values[2] - values[0];

    let det = d1.x * d2.y - d1.y * d2.x;
    if det == 0.0 {
        return None;
    }
    let a = (df1 * d2.y - df2 * d1.y) / det;
    let b = (d1.x * df2 - d2.x * df1) / det;
    Some([a, b])
}

#[cfg(test)]
mod test {
    use super::{validate_coordinate, validate_vertex};
    use crate::{InsertionError, Point2};
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_coordinate() {
        use InsertionError::*;
        assert_eq!(validate_coordinate(f64::NAN), Err(NAN));
        let max_value = super::MAX_ALLOWED_VALUE;

        assert_eq!(validate_coordinate(f64::INFINITY), Err(TooLarge));
        assert_eq!(validate_coordinate(f64::NEG_INFINITY), Err(TooLarge));
        assert_eq!(validate_coordinate(max_value * 2.0), Err(TooLarge));

        let min_value = super::MIN_ALLOWED_VALUE;
        assert_eq!(validate_coordinate(min_value / 2.0), Err(TooSmall));

        assert_eq!(validate_coordinate(f32::MIN_POSITIVE), Ok(()));
        assert_eq!(validate_coordinate(f32::MAX), Ok(()));
        assert_eq!(validate_coordinate(min_value), Ok(()));
        assert_eq!(validate_coordinate(max_value), Ok(()));
        assert_eq!(validate_coordinate(0.0), Ok(()));

        assert_eq!(validate_vertex(&Point2::new(1.0, f64::NAN)), Err(NAN));
        assert_eq!(validate_vertex(&Point2::new(-3.0, 2.0)), Ok(()));
    }

    #[test]
    fn test_limits_are_tight() {
        use float_next_after::NextAfter;

        for number_under_test in [
            0.0.next_after(f64::INFINITY),
            super::MIN_ALLOWED_VALUE.next_after(f64::NEG_INFINITY),
            (-super::MIN_ALLOWED_VALUE).next_after(f64::INFINITY),
        ] {
            assert_eq!(
                validate_coordinate(number_under_test),
                Err(InsertionError::TooSmall)
            );
        }

        assert_eq!(
            validate_coordinate(super::MAX_ALLOWED_VALUE.next_after(f64::INFINITY)),
            Err(InsertionError::TooLarge)
        );
    }

    #[test]
    fn check_min_and_max_value() {
        let mut expected = 1.0f64;
        for _ in 0..142 {
            expected *= 0.5;
        }
        assert_eq!(super::MIN_ALLOWED_VALUE, expected);

        let mut expected = 1.0f64;
        for _ in 0..201 {
            expected *= 2.0;
        }
        assert_eq!(super::MAX_ALLOWED_VALUE, expected);
    }

    #[test]
    fn test_edge_side() {
        use super::side_query;

        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(1.0, 1.0);

        assert!(side_query(p1, p2, Point2::new(1.0, 0.0)).is_on_right_side());
        assert!(side_query(p1, p2, Point2::new(0.0, 1.0)).is_on_left_side());
        assert!(side_query(p1, p2, Point2::new(0.5, 0.5)).is_on_line());
    }

    #[test]
    fn test_project_point() {
        use super::project_point;

        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(2.0, 0.0);

        let projection = project_point(p1, p2, Point2::new(0.5, 3.0));
        assert!(projection.is_on_edge());
        assert_relative_eq!(projection.relative_position(), 0.25);
        assert_relative_eq!(projection.reversed().relative_position(), 0.75);

        assert!(project_point(p1, p2, Point2::new(-0.1, 1.0)).is_before_edge());
        assert!(project_point(p1, p2, Point2::new(2.1, -1.0)).is_behind_edge());
        assert!(project_point(p1, p2, p2).is_on_edge());
    }

    #[test]
    fn test_contained_in_circumference() {
        use super::contained_in_circumference;

        let (a1, a2, a3) = (3f64, 2f64, 1f64);
        let offset = Point2::new(0.5, 0.7);
        let v1 = Point2::new(a1.sin(), a1.cos()).mul(2.).add(offset);
        let v2 = Point2::new(a2.sin(), a2.cos()).mul(2.).add(offset);
        let v3 = Point2::new(a3.sin(), a3.cos()).mul(2.).add(offset);
        assert!(super::side_query(v1, v2, v3).is_on_left_side());
        assert!(contained_in_circumference(v1, v2, v3, offset));
        let shrunk = (v1.sub(offset)).mul(0.9).add(offset);
        assert!(contained_in_circumference(v1, v2, v3, shrunk));
        let expanded = (v1.sub(offset)).mul(1.1).add(offset);
        assert!(!contained_in_circumference(v1, v2, v3, expanded));
        // Points on the circle are not contained
        assert!(!contained_in_circumference(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ));
    }

    #[test]
    fn test_area_and_centroid() {
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(super::triangle_area(positions), 2.0);

        let centroid = super::centroid(positions);
        assert_relative_eq!(centroid.x, 2.0 / 3.0);
        assert_relative_eq!(centroid.y, 2.0 / 3.0);
    }

    #[test]
    fn test_barycentric_coordinates() {
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let [l0, l1, l2] = super::barycentric_coordinates(positions, Point2::new(0.25, 0.5));
        assert_relative_eq!(l0, 0.25);
        assert_relative_eq!(l1, 0.25);
        assert_relative_eq!(l2, 0.5);

        let [l0, l1, l2] = super::barycentric_coordinates(positions, positions[1]);
        assert_relative_eq!(l0, 0.0);
        assert_relative_eq!(l1, 1.0);
        assert_relative_eq!(l2, 0.0);

        let outside = super::barycentric_coordinates(positions, Point2::new(1.0, 1.0));
        assert!(outside[0] < 0.0);
    }

    #[test]
    fn test_plane_gradient() {
        let positions = [
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 2.0),
            Point2::new(0.0, 4.0),
        ];
        let plane = |p: Point2<f64>| 2.0 * p.x - 0.5 * p.y + 7.0;
        let values = positions.map(plane);
        let [a, b] = super::plane_gradient(positions, values).unwrap();
        assert_relative_eq!(a, 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(b, -0.5, epsilon = 1.0e-12);

        let collinear = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ];
        assert_eq!(super::plane_gradient(collinear, [0.0, 1.0, 2.0]), None);
    }
}
