use std::cmp::Ordering;
use std::collections::BTreeSet;

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::handles::FixedFaceHandle;
use crate::Point2;

/// Estimated interpolation error of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct ErrorTuple {
    /// Absolute difference between the function and the interpolant at [Self::point].
    pub error: f64,
    /// The function value at [Self::point].
    pub value: f64,
    /// The triangle's representative point (its centroid).
    pub point: Point2<f64>,
}

#[derive(Debug, Clone, Copy)]
struct QueueKey {
    error: f64,
    serial: u64,
    face: FixedFaceHandle,
}

// Larger errors first. Equal errors are ordered so that the lowest serial is the maximum.
impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error
            .total_cmp(&other.error)
            .then_with(|| other.serial.cmp(&self.serial))
            .then_with(|| other.face.cmp(&self.face))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueKey {}

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    serial: u64,
    tuple: ErrorTuple,
}

/// Priority structure holding at most one [ErrorTuple] per face.
///
/// Insertion, removal and access to the maximum take `O(log n)`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorQueue {
    entries: HashMap<FixedFaceHandle, QueueEntry>,
    order: BTreeSet<QueueKey>,
}

impl ErrorQueue {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or replaces the entry of `face`.
    ///
    /// The error must not be NaN.
    pub fn insert(&mut self, face: FixedFaceHandle, serial: u64, tuple: ErrorTuple) {
        debug_assert!(!tuple.error.is_nan());
        self.remove(face);
        self.order.insert(QueueKey {
            error: tuple.error,
            serial,
            face,
        });
        self.entries.insert(face, QueueEntry { serial, tuple });
    }

    pub fn remove(&mut self, face: FixedFaceHandle) -> Option<ErrorTuple> {
        let entry = self.entries.remove(&face)?;
        let removed = self.order.remove(&QueueKey {
            error: entry.tuple.error,
            serial: entry.serial,
            face,
        });
        debug_assert!(removed, "Error queue index out of sync. This is a bug.");
        Some(entry.tuple)
    }

    pub fn get(&self, face: FixedFaceHandle) -> Option<&ErrorTuple> {
        self.entries.get(&face).map(|entry| &entry.tuple)
    }

    /// Returns the face with the largest error. Ties are resolved by the lowest serial.
    pub fn largest(&self) -> Option<(FixedFaceHandle, &ErrorTuple)> {
        let key = self.order.last()?;
        Some((key.face, &self.entries[&key.face].tuple))
    }

    /// Iterates over all entries, largest error first.
    pub fn iter_descending(&self) -> impl Iterator<Item = (FixedFaceHandle, &ErrorTuple)> + '_ {
        self.order
            .iter()
            .rev()
            .map(move |key| (key.face, &self.entries[&key.face].tuple))
    }
}

#[cfg(test)]
mod test {
    use super::{ErrorQueue, ErrorTuple};
    use crate::handles::FixedFaceHandle;
    use crate::Point2;

    fn tuple(error: f64) -> ErrorTuple {
        ErrorTuple {
            error,
            value: error * 2.0,
            point: Point2::new(error, -error),
        }
    }

    fn face(index: usize) -> FixedFaceHandle {
        FixedFaceHandle::new(index)
    }

    #[test]
    fn test_largest_and_replace() {
        let mut queue = ErrorQueue::default();
        assert!(queue.largest().is_none());

        queue.insert(face(1), 1, tuple(0.5));
        queue.insert(face(2), 2, tuple(2.0));
        queue.insert(face(3), 3, tuple(1.0));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.largest(), Some((face(2), &tuple(2.0))));

        // Replacing an entry must drop its old key
        queue.insert(face(2), 4, tuple(0.1));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.largest(), Some((face(3), &tuple(1.0))));

        let errors: Vec<_> = queue.iter_descending().map(|(_, t)| t.error).collect();
        assert_eq!(errors, vec![1.0, 0.5, 0.1]);
    }

    #[test]
    fn test_remove() {
        let mut queue = ErrorQueue::default();
        queue.insert(face(1), 1, tuple(3.0));
        queue.insert(face(2), 2, tuple(1.0));

        assert_eq!(queue.remove(face(1)), Some(tuple(3.0)));
        assert_eq!(queue.remove(face(1)), None);
        assert_eq!(queue.get(face(2)), Some(&tuple(1.0)));
        assert_eq!(queue.largest(), Some((face(2), &tuple(1.0))));

        queue.remove(face(2));
        assert!(queue.is_empty());
        assert!(queue.largest().is_none());
    }

    #[test]
    fn test_ties_prefer_lowest_serial() {
        let mut queue = ErrorQueue::default();
        queue.insert(face(7), 12, tuple(1.0));
        queue.insert(face(3), 5, tuple(1.0));
        queue.insert(face(9), 8, tuple(1.0));
        assert_eq!(queue.largest().map(|(f, _)| f), Some(face(3)));

        queue.remove(face(3));
        assert_eq!(queue.largest().map(|(f, _)| f), Some(face(9)));
    }
}
