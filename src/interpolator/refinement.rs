#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls how [DelaunayInterpolator::refine](crate::DelaunayInterpolator::refine)
/// samples new points.
///
/// Refinement repeatedly inserts the representative point of the triangle with the largest
/// error until either the largest error drops to the threshold or the vertex budget is
/// used up.
///
/// # Example
/// ```
/// use delaunay_linterp::{DelaunayInterpolator, Point2, RefinementParameters};
///
/// let mut interpolator = DelaunayInterpolator::with_function(|p: &[f64]| p[0] * p[0] + p[1]);
/// for [x, y] in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]] {
///     interpolator.insert(Point2::new(x, y)).unwrap();
/// }
///
/// let params = RefinementParameters::new()
///     .with_error_threshold(1.0e-2)
///     .with_max_additional_vertices(2000);
/// let result = interpolator.refine(params).unwrap();
/// assert!(result.refinement_complete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct RefinementParameters {
    max_additional_vertices: Option<usize>,
    error_threshold: f64,
}

impl Default for RefinementParameters {
    fn default() -> Self {
        Self {
            max_additional_vertices: None,
            error_threshold: 0.0,
        }
    }
}

impl RefinementParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the number of vertices the refinement may insert.
    ///
    /// Defaults to ten times the number of vertices at the start of the refinement.
    pub fn with_max_additional_vertices(mut self, max_additional_vertices: usize) -> Self {
        self.max_additional_vertices = Some(max_additional_vertices);
        self
    }

    /// Stops the refinement once no triangle has an error above `error_threshold`.
    ///
    /// Defaults to 0.0, refinement then only stops when it runs out of vertices or all
    /// errors vanish.
    pub fn with_error_threshold(mut self, error_threshold: f64) -> Self {
        self.error_threshold = error_threshold;
        self
    }

    pub fn error_threshold(&self) -> f64 {
        self.error_threshold
    }

    pub(crate) fn max_additional_vertices(&self, num_vertices: usize) -> usize {
        self.max_additional_vertices
            .unwrap_or_else(|| num_vertices.saturating_mul(10))
    }
}

/// Returned by [DelaunayInterpolator::refine](crate::DelaunayInterpolator::refine).
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementResult {
    /// Ids of all vertices inserted by the refinement, in insertion order.
    pub added_vertices: Vec<usize>,

    /// The largest remaining error, `None` if no triangle was evaluated.
    pub largest_error: Option<f64>,

    /// `true` if the error threshold was reached.
    ///
    /// `false` if the refinement ran out of additional vertices
    /// (see [RefinementParameters::with_max_additional_vertices]).
    pub refinement_complete: bool,
}

#[cfg(test)]
mod test {
    use super::RefinementParameters;

    #[test]
    fn test_builder() {
        let params = RefinementParameters::new();
        assert_eq!(params.error_threshold(), 0.0);
        assert_eq!(params.max_additional_vertices(7), 70);

        let params = params
            .with_error_threshold(0.25)
            .with_max_additional_vertices(3);
        assert_eq!(params.error_threshold(), 0.25);
        assert_eq!(params.max_additional_vertices(7), 3);
    }
}
