use alloc::vec::Vec;

use crate::{FetchRequest, Size};

/// The content adapter the engine depends on.
///
/// A source supplies domain items in pages, produces the visual nodes representing them, and
/// produces the tombstone placeholders shown while content is not yet available. It is the only
/// interface the core consumes; transport, authentication, and item layout all live behind it.
///
/// The engine never mutates a source beyond invoking this contract, and never issues a second
/// fetch while one is outstanding.
pub trait Source {
    /// The domain payload for one list entry.
    type Item;
    /// The visual node type. The engine owns nodes exclusively while they are attached and
    /// recycles them through its pools; it never inspects them beyond `measure`.
    type Node;
    /// The fetch error type, surfaced to the error-reporting hook before being treated as
    /// end-of-content.
    type Error: core::fmt::Display;

    /// Starts fetching up to `request.count` items from wherever the source's internal cursor
    /// left off.
    ///
    /// This is the request half of the fetch boundary; the completion is delivered through
    /// [`Source::poll_fetch`]. The source must hold on to `request` and hand it back with the
    /// result so the engine can match generations.
    fn fetch(&mut self, request: FetchRequest);

    /// Returns a completed fetch, if any.
    ///
    /// The engine polls this on every [`crate::Scroller::update`] and keeps draining within one
    /// update while follow-up pages resolve, so a source that resolves synchronously is pulled
    /// dry in a single tick.
    fn poll_fetch(&mut self) -> Option<(FetchRequest, Result<Vec<Self::Item>, Self::Error>)>;

    /// Produces a fresh placeholder node.
    ///
    /// The engine keeps released tombstones in a pool and only calls this when the pool is
    /// empty, so allocation churn stays bounded.
    fn create_tombstone(&mut self) -> Self::Node;

    /// Produces (or mutates and returns) a node representing `item`.
    ///
    /// When `recycled` is supplied it must be reused in place rather than reallocated; the node
    /// previously represented a different item and every visual property must be overwritten.
    /// `previous` is the item immediately before this one (if already fetched), so the source
    /// can decide whether to render a group/section header such as a date boundary.
    fn render(
        &mut self,
        previous: Option<&Self::Item>,
        item: &Self::Item,
        recycled: Option<Self::Node>,
    ) -> Self::Node;

    /// Reports the laid-out size of a node.
    ///
    /// This is the engine's single point of layout read: it is called once per newly rendered
    /// node (and once per tombstone template on resize), never inside the positioning walk.
    fn measure(&self, node: &Self::Node) -> Size;
}
