use alloc::vec::Vec;

/// One position in the (conceptually infinite) logical list.
///
/// Slots are contiguous from index 0. A slot past the last fetched item holds `data = None`
/// and renders as a tombstone. `height`/`width` are 0 until measured and are reset to 0 on
/// resize because layout may have changed.
#[derive(Clone, Debug)]
pub(crate) struct Slot<T, N> {
    pub(crate) data: Option<T>,
    /// At most one node, exclusively owned while attached.
    pub(crate) node: Option<N>,
    /// Whether the attached node is a tombstone placeholder.
    pub(crate) tombstone: bool,
    pub(crate) height: u32,
    pub(crate) width: u32,
    /// Last-computed vertical offset in scroll-space.
    pub(crate) top: u64,
}

impl<T, N> Slot<T, N> {
    pub(crate) fn vacant() -> Self {
        Self {
            data: None,
            node: None,
            tombstone: false,
            height: 0,
            width: 0,
            top: 0,
        }
    }
}

/// An ownership-transferring free-list of detached tombstone nodes.
///
/// Releasing returns the node for reuse instead of dropping it, which bounds node
/// allocation/deallocation churn no matter how far the user scrolls.
#[derive(Clone, Debug, Default)]
pub(crate) struct TombstonePool<N> {
    nodes: Vec<N>,
}

impl<N> TombstonePool<N> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn acquire(&mut self) -> Option<N> {
        self.nodes.pop()
    }

    pub(crate) fn release(&mut self, node: N) {
        self.nodes.push(node);
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}
