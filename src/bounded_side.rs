#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a point relative to the triangulated domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub enum BoundedSide {
    /// Outside of the convex hull.
    OnUnboundedSide,
    /// On a convex hull edge or vertex. Also used for any point on the line while all
    /// vertices are collinear.
    OnBoundary,
    /// Strictly inside the convex hull.
    OnBoundedSide,
}
