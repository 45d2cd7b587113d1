use std::marker::PhantomData;

use super::super::handle_defs::FixedHandleImpl;
use super::super::DynamicHandleImpl;

use crate::delaunay_core::dcel::Dcel;

pub struct FixedHandleIterator<Type> {
    range: std::ops::Range<usize>,
    ty: PhantomData<Type>,
}

impl<Type: Default> FixedHandleIterator<Type> {
    pub(crate) fn new(range: std::ops::Range<usize>) -> Self {
        Self {
            range,
            ty: Default::default(),
        }
    }
}

impl<Type: Default> Iterator for FixedHandleIterator<Type> {
    type Item = FixedHandleImpl<Type>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(FixedHandleImpl::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<Type: Default> ExactSizeIterator for FixedHandleIterator<Type> {}

pub struct DynamicHandleIterator<'a, V, F, Type> {
    fixed_iterator: FixedHandleIterator<Type>,
    dcel: &'a Dcel<V, F>,
}

impl<'a, V, F, Type: Default> DynamicHandleIterator<'a, V, F, Type> {
    pub(crate) fn new(dcel: &'a Dcel<V, F>, range: std::ops::Range<usize>) -> Self {
        DynamicHandleIterator {
            fixed_iterator: FixedHandleIterator::new(range),
            dcel,
        }
    }
}

impl<'a, V, F, Type: Default> Iterator for DynamicHandleIterator<'a, V, F, Type> {
    type Item = DynamicHandleImpl<'a, V, F, Type>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fixed_iterator
            .next()
            .map(|handle| DynamicHandleImpl::new(self.dcel, handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fixed_iterator.size_hint()
    }
}

impl<'a, V, F, Type: Default> ExactSizeIterator for DynamicHandleIterator<'a, V, F, Type> {}
