use std::convert::TryInto;

/// Internal type definition that is only exposed for documentation purposes.
///
/// Use the aliases [FixedVertexHandle](super::FixedVertexHandle),
/// [FixedDirectedEdgeHandle](super::FixedDirectedEdgeHandle),
/// [FixedUndirectedEdgeHandle](super::FixedUndirectedEdgeHandle) and
/// [FixedFaceHandle](super::FixedFaceHandle) instead.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedHandleImpl<Type> {
    index: u32,
    ty: Type,
}

impl<Type> std::fmt::Debug for FixedHandleImpl<Type> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedHandle")
            .field("index", &self.index)
            .finish()
    }
}

pub(crate) const fn new_fixed_face_handle(index: u32) -> FixedHandleImpl<FaceTag> {
    FixedHandleImpl { index, ty: FaceTag }
}

impl<Type: Default> FixedHandleImpl<Type> {
    pub(crate) fn new(index: usize) -> Self {
        Self::new_internal(
            index
                .try_into()
                .expect("Index too big - at most 2^32 elements supported"),
        )
    }

    fn new_internal(index: u32) -> Self {
        Self {
            index,
            ty: Type::default(),
        }
    }
}

impl<Type> FixedHandleImpl<Type> {
    /// Returns the internal index of this element.
    ///
    /// Vertex indices equal the insertion order. Indices of edges and faces are stable
    /// as no element is ever removed, although the geometry a face or edge refers to
    /// changes when an insertion splits or flips it.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct VertexTag;
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct DirectedEdgeTag;
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct UndirectedEdgeTag;
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct FaceTag;

impl FixedHandleImpl<DirectedEdgeTag> {
    // Both directed edges of an undirected edge share one index slot. The lowest bit
    // selects the direction.
    pub(crate) fn new_normalized(index: usize) -> Self {
        Self::new(index << 1)
    }

    /// Returns `true` if this is the first of the two directed edges of its undirected edge.
    pub fn is_normalized(&self) -> bool {
        self.index & 0x1 == 0
    }

    pub(crate) fn normalize_index(&self) -> usize {
        self.index() & 0x1
    }

    /// Returns the reversed edge.
    #[inline]
    pub fn rev(&self) -> Self {
        Self::new_internal(self.index ^ 0x1)
    }

    /// Returns the undirected edge this directed edge belongs to.
    #[inline]
    pub fn as_undirected(&self) -> FixedHandleImpl<UndirectedEdgeTag> {
        FixedHandleImpl::new_internal(self.index >> 1)
    }
}

impl FixedHandleImpl<UndirectedEdgeTag> {
    /// Returns the normalized directed edge of this undirected edge.
    pub fn as_directed(&self) -> FixedHandleImpl<DirectedEdgeTag> {
        self.normalized()
    }

    pub(crate) fn normalized(&self) -> FixedHandleImpl<DirectedEdgeTag> {
        FixedHandleImpl::new_normalized(self.index())
    }

    pub(crate) fn not_normalized(&self) -> FixedHandleImpl<DirectedEdgeTag> {
        self.normalized().rev()
    }
}

impl FixedHandleImpl<FaceTag> {
    /// Returns `true` if this handle refers to the single outer face.
    pub fn is_outer(&self) -> bool {
        self.index == 0
    }
}
