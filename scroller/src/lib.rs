//! A headless infinite-scroll engine with tombstone-based node recycling.
//!
//! For adapter-level utilities (a driving controller, a default in-memory source, scroll-to-top
//! tweens), see the `scroller-adapter` crate.
//!
//! This crate focuses on the core algorithms needed to present a lazily-paginated list of
//! unknown (and growing) length as if it were fully materialized: anchor/offset scroll math,
//! a recycled tombstone placeholder pool, the visible-window fill/attach/detach pass, and the
//! paginated-fetch throttling that feeds it. Memory and node counts stay bounded no matter how
//! far the user scrolls.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - a [`Source`]: paged item fetching plus node production/measurement
//! - viewport height and scroll offsets
//! - a frame clock (`update`) for cross-fades and fetch completions
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod options;
mod scroller;
mod slot;
mod source;
mod state;
mod types;


pub use options::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_RUNWAY_ITEMS, DEFAULT_RUNWAY_ITEMS_OPPOSITE,
    DEFAULT_SCROLL_RUNWAY, FetchErrorCallback, HeaderLabelFn, OnChangeCallback, ScrollerOptions,
};
pub use scroller::Scroller;
pub use source::Source;
pub use state::ScrollState;
pub use types::{Anchor, AttachedItem, AttachedRange, FetchRequest, ScrollDirection, Size};
