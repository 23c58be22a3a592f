use alloc::string::String;
use alloc::sync::Arc;

use crate::Source;
use crate::scroller::Scroller;

/// A callback fired when the engine's observable state changes.
pub type OnChangeCallback<S> = Arc<dyn Fn(&Scroller<S>) + Send + Sync>;

/// The error-reporting hook for failed fetches.
///
/// A failed fetch is reported here and then treated exactly like an empty page
/// (end-of-content); the engine never retries on its own.
pub type FetchErrorCallback<S> = Arc<dyn Fn(&<S as Source>::Error) + Send + Sync>;

/// Derives an optional group header label from an item (e.g. a date bucket).
pub type HeaderLabelFn<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Number of items to keep materialized beyond the viewport in the direction of travel.
pub const DEFAULT_RUNWAY_ITEMS: usize = 50;
/// Number of items to keep materialized behind the direction of travel.
pub const DEFAULT_RUNWAY_ITEMS_OPPOSITE: usize = 10;
/// Pixels of scrollable runway to maintain past the last positioned item.
pub const DEFAULT_SCROLL_RUNWAY: u32 = 2000;
/// How long a tombstone cross-fade runs before the tombstone is released.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 200;

/// Configuration for [`crate::Scroller`].
///
/// This type is designed to be cheap to clone: hooks are stored in `Arc`s so adapters can
/// tweak a few fields and swap the whole options struct without reallocating closures.
pub struct ScrollerOptions<S: Source> {
    /// Page size: the maximum number of items requested per fetch.
    pub limit: usize,
    /// Initial viewport height in the scroll axis.
    pub viewport_height: u32,
    /// Window widening beyond the trailing edge in the direction of travel.
    pub runway_items: usize,
    /// Window widening behind the direction of travel. Kept small: reverse scrolling stays
    /// smooth without paying the full runway cost in both directions.
    pub runway_items_opposite: usize,
    /// How much invisible runway to keep past the last positioned item, so the native
    /// scrollbar thumb stays plausible before the content length is known.
    pub scroll_runway: u32,
    /// Cross-fade duration when real content replaces a visible tombstone.
    pub animation_duration_ms: u64,
    /// Optional hook deriving a header label from the anchored item.
    pub header_label: Option<HeaderLabelFn<S::Item>>,
    /// Message the presentation layer should show when the list is empty.
    pub empty_message: Option<String>,
    /// Optional callback fired after every state-changing entry point.
    pub on_change: Option<OnChangeCallback<S>>,
    /// Optional hook invoked with the error of a failed fetch.
    pub on_fetch_error: Option<FetchErrorCallback<S>>,
}

impl<S: Source> ScrollerOptions<S> {
    /// Creates options with the given page size and defaults for everything else.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            viewport_height: 0,
            runway_items: DEFAULT_RUNWAY_ITEMS,
            runway_items_opposite: DEFAULT_RUNWAY_ITEMS_OPPOSITE,
            scroll_runway: DEFAULT_SCROLL_RUNWAY,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            header_label: None,
            empty_message: None,
            on_change: None,
            on_fetch_error: None,
        }
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_runway_items(mut self, runway_items: usize, runway_items_opposite: usize) -> Self {
        self.runway_items = runway_items;
        self.runway_items_opposite = runway_items_opposite;
        self
    }

    pub fn with_scroll_runway(mut self, scroll_runway: u32) -> Self {
        self.scroll_runway = scroll_runway;
        self
    }

    pub fn with_animation_duration_ms(mut self, animation_duration_ms: u64) -> Self {
        self.animation_duration_ms = animation_duration_ms;
        self
    }

    pub fn with_header_label(
        mut self,
        f: impl Fn(&S::Item) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.header_label = Some(Arc::new(f));
        self
    }

    pub fn with_empty_message(mut self, empty_message: impl Into<String>) -> Self {
        self.empty_message = Some(empty_message.into());
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Scroller<S>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_fetch_error(
        mut self,
        on_fetch_error: Option<impl Fn(&S::Error) + Send + Sync + 'static>,
    ) -> Self {
        self.on_fetch_error = on_fetch_error.map(|f| Arc::new(f) as _);
        self
    }
}

impl<S: Source> Clone for ScrollerOptions<S> {
    fn clone(&self) -> Self {
        Self {
            limit: self.limit,
            viewport_height: self.viewport_height,
            runway_items: self.runway_items,
            runway_items_opposite: self.runway_items_opposite,
            scroll_runway: self.scroll_runway,
            animation_duration_ms: self.animation_duration_ms,
            header_label: self.header_label.clone(),
            empty_message: self.empty_message.clone(),
            on_change: self.on_change.clone(),
            on_fetch_error: self.on_fetch_error.clone(),
        }
    }
}

impl<S: Source> core::fmt::Debug for ScrollerOptions<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollerOptions")
            .field("limit", &self.limit)
            .field("viewport_height", &self.viewport_height)
            .field("runway_items", &self.runway_items)
            .field("runway_items_opposite", &self.runway_items_opposite)
            .field("scroll_runway", &self.scroll_runway)
            .field("animation_duration_ms", &self.animation_duration_ms)
            .field("empty_message", &self.empty_message)
            .finish_non_exhaustive()
    }
}
