use std::sync::atomic::{AtomicUsize, Ordering};

use super::FixedVertexHandle;

/// Remembers the most recently used vertex as start point for the next walk.
///
/// Insertions and queries that are spatially close to the previous one finish in
/// constant time. Randomly distributed queries take `O(sqrt(n))`.
#[derive(Default, Debug)]
pub struct LastUsedVertexHintGenerator {
    index: AtomicUsize,
}

impl Clone for LastUsedVertexHintGenerator {
    fn clone(&self) -> Self {
        Self {
            index: AtomicUsize::new(self.index.load(Ordering::Relaxed)),
        }
    }
}

impl LastUsedVertexHintGenerator {
    /// Returns a vertex that is likely close to the next query.
    ///
    /// The handle may be out of range for an empty triangulation.
    pub fn get_hint(&self) -> FixedVertexHandle {
        FixedVertexHandle::new(self.index.load(Ordering::Relaxed))
    }

    /// Interior mutability allows updating the hint from read only queries.
    pub fn notify_vertex_lookup(&self, vertex: FixedVertexHandle) {
        self.index.store(vertex.index(), Ordering::Relaxed);
    }

    pub fn notify_vertex_inserted(&mut self, vertex: FixedVertexHandle) {
        self.notify_vertex_lookup(vertex);
    }
}

#[cfg(test)]
mod test {
    use super::LastUsedVertexHintGenerator;
    use crate::handles::FixedVertexHandle;

    #[test]
    fn test_remembers_last_vertex() {
        let mut generator = LastUsedVertexHintGenerator::default();
        assert_eq!(generator.get_hint(), FixedVertexHandle::new(0));
        generator.notify_vertex_inserted(FixedVertexHandle::new(4));
        assert_eq!(generator.get_hint(), FixedVertexHandle::new(4));
        generator.notify_vertex_lookup(FixedVertexHandle::new(2));
        assert_eq!(generator.clone().get_hint(), FixedVertexHandle::new(2));
    }
}
