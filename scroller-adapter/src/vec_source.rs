use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::convert::Infallible;

use scroller::{FetchRequest, Size, Source};

/// The node type produced by [`VecSource`]: a plain block with a label, an optional group
/// header, and a fixed measured size.
///
/// Presentation layers map these onto whatever their UI uses; headless tests inspect them
/// directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockNode {
    pub label: String,
    /// Rendered above the item when the source decided a group boundary was crossed.
    pub header: Option<String>,
    pub height: u32,
    pub width: u32,
    pub is_tombstone: bool,
}

/// A default in-memory [`Source`] backed by a `Vec`.
///
/// Pages resolve on the next poll, which models the microtask boundary of a real asynchronous
/// source: a fetch issued during one event becomes visible on the following tick, never
/// re-entrantly within the same one.
pub struct VecSource<T> {
    items: Vec<T>,
    cursor: usize,
    pending: VecDeque<FetchRequest>,
    height: Arc<dyn Fn(&T) -> u32 + Send + Sync>,
    label: Arc<dyn Fn(&T) -> String + Send + Sync>,
    header: Option<Arc<dyn Fn(Option<&T>, &T) -> Option<String> + Send + Sync>>,
    tombstone_height: u32,
    width: u32,
}

impl<T> VecSource<T> {
    pub fn new(
        items: Vec<T>,
        height: impl Fn(&T) -> u32 + Send + Sync + 'static,
        label: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            items,
            cursor: 0,
            pending: VecDeque::new(),
            height: Arc::new(height),
            label: Arc::new(label),
            header: None,
            tombstone_height: 32,
            width: 320,
        }
    }

    /// Decides whether an item starts a new group given the item before it (`None` for the
    /// first item). Returning `Some(label)` renders a header above the item.
    pub fn with_header(
        mut self,
        header: impl Fn(Option<&T>, &T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.header = Some(Arc::new(header));
        self
    }

    pub fn with_tombstone_height(mut self, tombstone_height: u32) -> Self {
        self.tombstone_height = tombstone_height;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Items handed out so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.cursor)
    }
}

impl<T: Clone> Source for VecSource<T> {
    type Item = T;
    type Node = BlockNode;
    type Error = Infallible;

    fn fetch(&mut self, request: FetchRequest) {
        self.pending.push_back(request);
    }

    fn poll_fetch(&mut self) -> Option<(FetchRequest, Result<Vec<T>, Infallible>)> {
        let request = self.pending.pop_front()?;
        let n = core::cmp::min(request.count, self.remaining());
        let page = self.items[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Some((request, Ok(page)))
    }

    fn create_tombstone(&mut self) -> BlockNode {
        BlockNode {
            label: String::new(),
            header: None,
            height: self.tombstone_height,
            width: self.width,
            is_tombstone: true,
        }
    }

    fn render(&mut self, previous: Option<&T>, item: &T, recycled: Option<BlockNode>) -> BlockNode {
        let mut node = recycled.unwrap_or_default();
        node.label = (self.label)(item);
        node.header = self
            .header
            .as_ref()
            .and_then(|f| f(previous, item));
        node.height = (self.height)(item);
        node.width = self.width;
        node.is_tombstone = false;
        node
    }

    fn measure(&self, node: &BlockNode) -> Size {
        Size {
            height: node.height,
            width: node.width,
        }
    }
}

impl<T> core::fmt::Debug for VecSource<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VecSource")
            .field("len", &self.items.len())
            .field("cursor", &self.cursor)
            .field("pending", &self.pending.len())
            .field("tombstone_height", &self.tombstone_height)
            .finish_non_exhaustive()
    }
}
