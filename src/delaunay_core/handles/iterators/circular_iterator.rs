use core::marker::PhantomData;

use super::super::DirectedEdgeHandle;

pub trait NextBackFn {
    fn next<V, F>(edge_handle: DirectedEdgeHandle<V, F>) -> DirectedEdgeHandle<V, F>;

    fn next_back<V, F>(edge_handle: DirectedEdgeHandle<V, F>) -> DirectedEdgeHandle<V, F>;
}

/// Rotates around the origin of an edge in counter clockwise order.
pub struct CCWEdgesNextBackFn;

impl NextBackFn for CCWEdgesNextBackFn {
    fn next<V, F>(edge_handle: DirectedEdgeHandle<V, F>) -> DirectedEdgeHandle<V, F> {
        edge_handle.ccw()
    }

    fn next_back<V, F>(edge_handle: DirectedEdgeHandle<V, F>) -> DirectedEdgeHandle<V, F> {
        edge_handle.cw()
    }
}

/// Iterates over a closed loop of edges, e.g. all out edges of a vertex.
pub struct CircularIterator<'a, V, F, NB> {
    current_handle: DirectedEdgeHandle<'a, V, F>,
    final_handle: DirectedEdgeHandle<'a, V, F>,
    iteration_finished: bool,
    next_back_fn: PhantomData<NB>,
}

impl<'a, V, F, NB: NextBackFn> CircularIterator<'a, V, F, NB> {
    pub fn new(start_edge: DirectedEdgeHandle<'a, V, F>) -> Self {
        CircularIterator {
            current_handle: start_edge,
            final_handle: start_edge,
            iteration_finished: false,
            next_back_fn: Default::default(),
        }
    }

    pub fn new_empty(some_edge: DirectedEdgeHandle<'a, V, F>) -> Self {
        CircularIterator {
            current_handle: some_edge,
            final_handle: some_edge,
            iteration_finished: true,
            next_back_fn: Default::default(),
        }
    }
}

impl<'a, V, F, NB: NextBackFn> Iterator for CircularIterator<'a, V, F, NB> {
    type Item = DirectedEdgeHandle<'a, V, F>;

    fn next(&mut self) -> Option<DirectedEdgeHandle<'a, V, F>> {
        if self.iteration_finished {
            return None;
        }
        let result = self.current_handle;
        self.current_handle = NB::next(self.current_handle);
        if self.current_handle == self.final_handle {
            self.iteration_finished = true;
        }
        Some(result)
    }
}

impl<'a, V, F, NB: NextBackFn> DoubleEndedIterator for CircularIterator<'a, V, F, NB> {
    fn next_back(&mut self) -> Option<DirectedEdgeHandle<'a, V, F>> {
        if self.iteration_finished {
            return None;
        }
        self.final_handle = NB::next_back(self.final_handle);
        if self.current_handle == self.final_handle {
            self.iteration_finished = true;
        }
        Some(self.final_handle)
    }
}
