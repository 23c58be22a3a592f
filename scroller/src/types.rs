/// The logical item pinned to the top of the viewport.
///
/// `offset` is the pixel distance from the item's start to the viewport's top edge. The anchor
/// is the single source of truth for "where are we": it is recomputed from scroll deltas, never
/// interpolated, so positioning math stays stable while estimated heights are being corrected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub index: usize,
    /// Signed so that intermediate walk states can briefly dip below an item's start.
    pub offset: i64,
}

impl Anchor {
    /// The rest position: item 0 with no offset.
    pub const fn rest() -> Self {
        Self {
            index: 0,
            offset: 0,
        }
    }
}

/// Cached layout measurements for one node, in the scroll axis and cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub height: u32,
    pub width: u32,
}

/// The direction the user last scrolled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A paginated fetch issued by the engine.
///
/// `generation` identifies the engine epoch the request belongs to. The engine bumps it on
/// every reset/source swap and discards completions whose generation no longer matches, so a
/// stale resolution can never corrupt re-initialized state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRequest {
    pub generation: u64,
    /// Maximum number of items the source should return. Returning fewer (possibly zero)
    /// signals end-of-content.
    pub count: usize,
}

/// The half-open `[first, last)` range of slots that currently must have live nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachedRange {
    pub first: usize,
    pub last: usize, // exclusive
}

impl AttachedRange {
    pub fn is_empty(&self) -> bool {
        self.first >= self.last
    }

    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }
}

/// A borrowed view of one attached slot, emitted by [`crate::Scroller::for_each_attached`].
#[derive(Debug)]
pub struct AttachedItem<'a, T, N> {
    pub index: usize,
    /// Absolute vertical offset in scroll-space. Presentation layers should apply this as an
    /// explicit transform; attached nodes are never positioned by normal flow.
    pub top: u64,
    /// Effective height used for positioning (the canonical tombstone height when unmeasured).
    pub height: u32,
    pub is_tombstone: bool,
    pub data: Option<&'a T>,
    pub node: &'a N,
}
