use scroller::{ScrollState, Scroller, ScrollerOptions, Source};

use crate::{Easing, Tween};

/// A framework-neutral controller that wraps a [`scroller::Scroller`] and provides common
/// adapter workflows.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (for cross-fade expiry, fetch completions, and the
///   scroll-to-top animation)
///
/// After each call, read `scroller().scroll_top()` back into the real scroll container: the
/// engine corrects the offset when freshly measured heights shift the anchor's position.
#[derive(Debug)]
pub struct Controller<S: Source> {
    s: Scroller<S>,
    tween: Option<Tween>,
}

impl<S: Source> Controller<S> {
    /// Creates a controller around a live viewport: the engine is built, the tombstone template
    /// measured, and the initial window filled and pumped once.
    pub fn new(source: S, options: ScrollerOptions<S>, now_ms: u64) -> Self {
        let mut s = Scroller::new(source, options);
        s.on_resize(now_ms);
        s.update(now_ms);
        Self { s, tween: None }
    }

    pub fn from_scroller(s: Scroller<S>) -> Self {
        Self { s, tween: None }
    }

    pub fn scroller(&self) -> &Scroller<S> {
        &self.s
    }

    pub fn scroller_mut(&mut self) -> &mut Scroller<S> {
        &mut self.s
    }

    pub fn into_scroller(self) -> Scroller<S> {
        self.s
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active scroll-to-top animation: the user wins.
    pub fn on_scroll(&mut self, scroll_top: u64, now_ms: u64) {
        self.cancel_animation();
        self.s.on_scroll(scroll_top, now_ms);
        self.s.update(now_ms);
    }

    /// Call this after the UI coalesced a resize burst.
    pub fn on_resize(&mut self, now_ms: u64) {
        self.s.on_resize(now_ms);
        self.s.update(now_ms);
    }

    pub fn set_viewport_height(&mut self, viewport_height: u32, now_ms: u64) {
        self.s.set_viewport_height(viewport_height, now_ms);
        self.s.update(now_ms);
    }

    /// Advances the controller.
    ///
    /// When a scroll-to-top animation is active, samples it, applies the offset, and returns
    /// the engine-corrected scroll position for the UI to write back. Otherwise just pumps the
    /// engine's cooperative tasks.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let Some(tween) = self.tween else {
            self.s.update(now_ms);
            return None;
        };

        let offset = tween.sample(now_ms);
        self.s.on_scroll(offset, now_ms);
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        self.s.update(now_ms);
        Some(self.s.scroll_top())
    }

    /// Starts the animated "scroll to top" affordance.
    ///
    /// Typically wired to a button shown while [`ScrollState::scrolled_from_top`] is set.
    pub fn scroll_to_top(&mut self, now_ms: u64, duration_ms: u64, easing: Easing) {
        let from = self.s.scroll_top();
        if from == 0 {
            self.tween = None;
            return;
        }
        self.tween = Some(Tween::to_top(from, now_ms, duration_ms, easing));
    }

    /// Swaps the content source (e.g. a different filter/feed) and restarts from the top.
    pub fn set_source(&mut self, source: S, now_ms: u64) -> S {
        self.cancel_animation();
        let old = self.s.set_source(source, now_ms);
        self.s.update(now_ms);
        old
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.s.scroll_state()
    }
}
