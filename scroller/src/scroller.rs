use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::slot::{Slot, TombstonePool};
use crate::{
    Anchor, AttachedItem, AttachedRange, FetchRequest, ScrollDirection, ScrollState,
    ScrollerOptions, Size, Source,
};

/// A tombstone mid cross-fade: the node stays alive until the deadline, then returns to the
/// pool. Transitions die with the engine, so no animation callback can outlive it.
#[derive(Debug)]
struct Transition<N> {
    node: N,
    deadline_ms: u64,
}

/// A headless infinite-scroll engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; nodes are whatever the [`Source`] produces.
/// - Your adapter drives it by forwarding scroll/resize events and a frame clock.
/// - Attached content is exposed via zero-allocation iteration (`for_each_attached`).
///
/// The engine keeps the logical item list (including not-yet-loaded placeholder slots), decides
/// which slots are within the runway, recycles nodes between visible and tombstone states,
/// issues paginated fetches, and keeps the anchor item's on-screen position stable across all
/// of that churn.
pub struct Scroller<S: Source> {
    source: S,
    options: ScrollerOptions<S>,

    items: Vec<Slot<S::Item, S::Node>>,
    loaded_items: usize,

    anchor: Anchor,
    anchor_scroll_top: u64,
    scroll_top: u64,
    scroll_direction: Option<ScrollDirection>,
    scrolled_from_top: bool,

    first_attached: usize,
    last_attached: usize, // exclusive

    tombstones: TombstonePool<S::Node>,
    tombstone_size: Size,
    transitions: Vec<Transition<S::Node>>,

    request_in_progress: bool,
    generation: u64,
    end_of_content: bool,

    runway_end: u64,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<S: Source> Scroller<S> {
    /// Creates a new engine around `source`.
    ///
    /// The canonical tombstone size is derived immediately (one tombstone is created, measured,
    /// and pooled). No content is requested until the first `on_resize`/`on_scroll`; call
    /// [`Self::on_resize`] once the viewport is live.
    pub fn new(mut source: S, options: ScrollerOptions<S>) -> Self {
        let node = source.create_tombstone();
        let tombstone_size = source.measure(&node);
        let mut tombstones = TombstonePool::new();
        tombstones.release(node);
        sdebug!(
            limit = options.limit,
            viewport_height = options.viewport_height,
            "Scroller::new"
        );
        Self {
            source,
            options,
            items: Vec::new(),
            loaded_items: 0,
            anchor: Anchor::rest(),
            anchor_scroll_top: 0,
            scroll_top: 0,
            scroll_direction: None,
            scrolled_from_top: false,
            first_attached: 0,
            last_attached: 0,
            tombstones,
            tombstone_size,
            transitions: Vec::new(),
            request_in_progress: false,
            generation: 0,
            end_of_content: false,
            runway_end: 0,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &ScrollerOptions<S> {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Swaps the content source and re-initializes around it.
    ///
    /// Returns the old source. Any fetch it still resolves afterwards is discarded by the
    /// generation check.
    pub fn set_source(&mut self, source: S, now_ms: u64) -> S {
        let old = core::mem::replace(&mut self.source, source);
        self.reset(now_ms);
        old
    }

    /// Discards all bookkeeping and starts over from the top.
    ///
    /// Every owned node is dropped, the tombstone pool is cleared (the templates may have
    /// changed), the fetch generation is bumped so stale resolutions are ignored, and the
    /// initial window is re-filled.
    pub fn reset(&mut self, now_ms: u64) {
        sdebug!(generation = self.generation, "reset");
        self.generation = self.generation.wrapping_add(1);
        self.request_in_progress = false;
        self.end_of_content = false;
        self.items.clear();
        self.loaded_items = 0;
        self.tombstones.clear();
        self.transitions.clear();
        self.anchor = Anchor::rest();
        self.anchor_scroll_top = 0;
        self.scroll_top = 0;
        self.scroll_direction = None;
        self.scrolled_from_top = false;
        self.first_attached = 0;
        self.last_attached = 0;
        self.runway_end = 0;
        self.batch_update(|s| {
            s.measure_tombstone();
            s.on_scroll(0, now_ms);
        });
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The engine-corrected scroll position.
    ///
    /// After each attach pass this may differ from the offset the UI last reported, because
    /// newly measured heights above the anchor shift its absolute position. Adapters should
    /// write it back to the real scroll container.
    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Total height of the invisible runway sentinel, i.e. the scrollable extent the UI should
    /// report to its scrollbar.
    pub fn runway_end(&self) -> u64 {
        self.runway_end
    }

    pub fn attached_range(&self) -> AttachedRange {
        AttachedRange {
            first: self.first_attached,
            last: self.last_attached,
        }
    }

    /// Number of items fetched so far.
    pub fn loaded_len(&self) -> usize {
        self.loaded_items
    }

    /// Number of logical slots, including trailing not-yet-loaded placeholders.
    pub fn slot_len(&self) -> usize {
        self.items.len()
    }

    pub fn end_of_content(&self) -> bool {
        self.end_of_content
    }

    pub fn request_in_progress(&self) -> bool {
        self.request_in_progress
    }

    /// The canonical placeholder size backing every height-estimate fallback.
    pub fn tombstone_size(&self) -> Size {
        self.tombstone_size
    }

    /// `true` once end-of-content was reached with zero items.
    pub fn is_empty(&self) -> bool {
        self.end_of_content && self.loaded_items == 0
    }

    /// The configured empty-state message, when the list is actually empty.
    pub fn empty_message(&self) -> Option<&str> {
        if self.is_empty() {
            self.options.empty_message.as_deref()
        } else {
            None
        }
    }

    /// Snapshot of the state the presentation layer cares about.
    pub fn scroll_state(&self) -> ScrollState {
        let header_label = self.options.header_label.as_ref().and_then(|f| {
            self.items
                .get(self.anchor.index)
                .and_then(|slot| slot.data.as_ref())
                .and_then(|item| f(item))
        });
        ScrollState {
            scrolled_from_top: self.scrolled_from_top,
            header_label,
            empty: self.is_empty(),
        }
    }

    /// Iterates over every attached slot in index order, without allocations.
    pub fn for_each_attached(&self, mut f: impl FnMut(AttachedItem<'_, S::Item, S::Node>)) {
        let last = cmp::min(self.last_attached, self.items.len());
        for index in self.first_attached..last {
            let slot = &self.items[index];
            let Some(node) = slot.node.as_ref() else {
                continue;
            };
            f(AttachedItem {
                index,
                top: slot.top,
                height: if slot.height > 0 {
                    slot.height
                } else {
                    self.tombstone_size.height
                },
                is_tombstone: slot.tombstone,
                data: slot.data.as_ref(),
                node,
            });
        }
    }

    /// Iterates over tombstones currently cross-fading out, with their release deadline.
    pub fn for_each_transition(&self, mut f: impl FnMut(&S::Node, u64)) {
        for t in &self.transitions {
            f(&t.node, t.deadline_ms);
        }
    }

    /// Applies a scroll offset reported by the UI layer.
    ///
    /// `scroll_top == 0` is special-cased to the exact rest anchor so floating drift can never
    /// accumulate at the natural resting position. Any other offset advances the anchor by the
    /// observed delta, walking only the items actually crossed.
    pub fn on_scroll(&mut self, scroll_top: u64, now_ms: u64) {
        strace!(scroll_top, now_ms, "on_scroll");
        let delta = scroll_top as i64 - self.anchor_scroll_top as i64;
        if scroll_top == 0 {
            self.anchor = Anchor::rest();
        } else {
            self.anchor = self.calculate_anchored_item(self.anchor, delta);
        }
        self.scrolled_from_top = scroll_top > 0;
        self.anchor_scroll_top = scroll_top;
        self.scroll_top = scroll_top;
        self.scroll_direction = match delta.cmp(&0) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };

        let last_visible =
            self.calculate_anchored_item(self.anchor, i64::from(self.options.viewport_height));

        // Bias the runway toward the direction of travel; keep a small buffer behind it so
        // reversing does not immediately miss the cache.
        let (first, last) = if self.scroll_direction == Some(ScrollDirection::Backward) {
            (
                self.anchor.index as i64 - self.options.runway_items as i64,
                last_visible.index as i64 + self.options.runway_items_opposite as i64,
            )
        } else {
            (
                self.anchor.index as i64 - self.options.runway_items_opposite as i64,
                last_visible.index as i64 + self.options.runway_items as i64,
            )
        };
        self.fill(first, last, now_ms);
        self.notify();
    }

    /// Handles a viewport resize.
    ///
    /// Every cached measurement is invalidated (layout may have changed) and the canonical
    /// tombstone size is re-derived, then the current window is re-attached and re-measured.
    /// Callers are expected to coalesce/debounce resize events before forwarding them.
    pub fn on_resize(&mut self, now_ms: u64) {
        sdebug!(now_ms, "on_resize");
        self.batch_update(|s| {
            s.measure_tombstone();
            for slot in &mut s.items {
                slot.height = 0;
                slot.width = 0;
            }
            let top = s.scroll_top;
            s.on_scroll(top, now_ms);
        });
    }

    pub fn set_viewport_height(&mut self, viewport_height: u32, now_ms: u64) {
        if self.options.viewport_height == viewport_height {
            return;
        }
        self.options.viewport_height = viewport_height;
        self.on_resize(now_ms);
    }

    /// Advances the engine's cooperative tasks: expires finished cross-fades and polls the
    /// source for fetch completions. Call once per frame/timer tick.
    pub fn update(&mut self, now_ms: u64) {
        self.batch_update(|s| {
            s.expire_transitions(now_ms);
            s.pump_fetches(now_ms);
        });
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Walks the anchor by `delta` pixels, item by item.
    ///
    /// Only items actually crossed are traversed; runs of unmeasured slots are skipped in bulk
    /// using the canonical tombstone height, then corrected once real heights are known.
    pub(crate) fn calculate_anchored_item(&self, initial: Anchor, delta: i64) -> Anchor {
        if delta == 0 {
            return initial;
        }
        let tombstone = i64::from(self.tombstone_size.height.max(1));
        let mut remaining = delta + initial.offset;
        let mut index = initial.index as i64;
        let mut skipped = 0i64;

        if remaining < 0 {
            while remaining < 0 && index > 0 {
                let h = self.measured_height(index as usize - 1);
                if h == 0 {
                    break;
                }
                remaining += i64::from(h);
                index -= 1;
            }
            let short = cmp::min(remaining, 0);
            skipped = cmp::max(-index, -((-short) / tombstone));
        } else {
            while remaining > 0 && (index as usize) < self.items.len() {
                let h = self.measured_height(index as usize);
                if h == 0 || i64::from(h) >= remaining {
                    break;
                }
                remaining -= i64::from(h);
                index += 1;
            }
            if index as usize >= self.items.len() || self.measured_height(index as usize) == 0 {
                skipped = cmp::max(remaining, 0) / tombstone;
            }
        }

        index += skipped;
        remaining -= skipped * tombstone;
        Anchor {
            index: cmp::max(index, 0) as usize,
            offset: remaining,
        }
    }

    /// Stores the window that must have live nodes and re-attaches.
    ///
    /// `start` is clamped to 0; once end-of-content is known the window never extends past the
    /// loaded items.
    pub(crate) fn fill(&mut self, start: i64, end: i64, now_ms: u64) {
        let previous = self.attached_range();
        self.first_attached = cmp::max(start, 0) as usize;
        self.last_attached = cmp::max(end, 0) as usize;
        self.attach_content(previous, now_ms);
    }

    /// The recycling core: reap, materialize, measure, position, then maybe fetch.
    ///
    /// `previous` is the window that held live nodes before this pass. Only slots leaving it
    /// are reaped, so a scroll event costs O(window size), not O(loaded items).
    fn attach_content(&mut self, previous: AttachedRange, now_ms: u64) {
        if self.end_of_content {
            self.last_attached = cmp::min(self.last_attached, self.loaded_items);
            self.first_attached = cmp::min(self.first_attached, self.last_attached);
        }

        // Reap: release every node that left the window. Tombstones return to their pool;
        // real-content nodes stay available for same-pass reuse.
        let mut unused: Vec<S::Node> = Vec::new();
        for i in previous.first..cmp::min(previous.last, self.items.len()) {
            if i >= self.first_attached && i < self.last_attached {
                continue;
            }
            let slot = &mut self.items[i];
            if let Some(node) = slot.node.take() {
                if slot.tombstone {
                    slot.tombstone = false;
                    self.tombstones.release(node);
                } else {
                    unused.push(node);
                }
            }
        }

        while self.items.len() < self.last_attached {
            self.items.push(Slot::vacant());
        }

        // Materialize: give every slot in the window a node.
        for i in self.first_attached..self.last_attached {
            let (head, tail) = self.items.split_at_mut(i);
            let slot = &mut tail[0];

            let placeholder_swap = slot.tombstone && slot.data.is_some();
            if slot.node.is_some() && !placeholder_swap {
                continue;
            }
            if placeholder_swap {
                // Real data arrived while the tombstone is on screen: cross-fade, and release
                // the tombstone only after the animation window elapses.
                if let Some(tombstone) = slot.node.take() {
                    self.transitions.push(Transition {
                        node: tombstone,
                        deadline_ms: now_ms.saturating_add(self.options.animation_duration_ms),
                    });
                }
                slot.tombstone = false;
                slot.height = 0;
            }

            if let Some(item) = tail[0].data.as_ref() {
                let previous = if i > 0 { head[i - 1].data.as_ref() } else { None };
                let node = self.source.render(previous, item, unused.pop());
                let slot = &mut tail[0];
                slot.node = Some(node);
                slot.tombstone = false;
            } else {
                let node = match self.tombstones.acquire() {
                    Some(node) => node,
                    None => self.source.create_tombstone(),
                };
                let slot = &mut tail[0];
                slot.node = Some(node);
                slot.tombstone = true;
            }
        }

        // Measure: read layout once per just-rendered node. Tombstone slots keep height 0 and
        // fall back to the canonical tombstone size everywhere.
        for i in self.first_attached..self.last_attached {
            let slot = &self.items[i];
            if slot.tombstone || slot.height != 0 {
                continue;
            }
            if let Some(node) = slot.node.as_ref() {
                let size = self.source.measure(node);
                let slot = &mut self.items[i];
                slot.height = size.height;
                slot.width = size.width;
            }
        }

        self.position_content();
        self.maybe_request_content();
    }

    /// Positions every attached node by walking outward from the anchor.
    ///
    /// The anchor's absolute position is re-derived from index 0 first, so heights learned this
    /// pass cannot cause visible jumps anywhere else.
    fn position_content(&mut self) {
        let mut anchor_pos: u64 = 0;
        for i in 0..self.anchor.index {
            anchor_pos = anchor_pos.saturating_add(self.height_or_tombstone(i));
        }
        let anchor_top = anchor_pos as i64 + self.anchor.offset;
        self.anchor_scroll_top = cmp::max(anchor_top, 0) as u64;
        self.scroll_top = self.anchor_scroll_top;

        let mut pos = anchor_pos as i64;
        let mut i = self.anchor.index;
        while i > self.first_attached {
            pos -= self.height_or_tombstone(i - 1) as i64;
            i -= 1;
        }
        while i < self.first_attached {
            pos += self.height_or_tombstone(i) as i64;
            i += 1;
        }

        let last = cmp::min(self.last_attached, self.items.len());
        for i in self.first_attached..last {
            let h = self.height_or_tombstone(i) as i64;
            self.items[i].top = cmp::max(pos, 0) as u64;
            pos += h;
        }
        let last_position = cmp::max(pos, 0) as u64;

        if self.end_of_content {
            // The scrollbar can be exact once the content length is known.
            self.runway_end = self.content_height();
        } else {
            self.runway_end = cmp::max(
                self.runway_end,
                last_position.saturating_add(u64::from(self.options.scroll_runway)),
            );
        }
    }

    /// Requests the next page when the attached window has outrun the loaded data.
    ///
    /// At most one request is ever in flight, and nothing is requested once end-of-content was
    /// observed. Each page asks for at most `limit` items; the attach pass after a merge
    /// re-requests until the window is satisfied.
    fn maybe_request_content(&mut self) {
        if self.request_in_progress || self.end_of_content {
            return;
        }
        let needed = self.last_attached.saturating_sub(self.loaded_items);
        if needed == 0 {
            return;
        }
        let count = cmp::min(needed, cmp::max(self.options.limit, 1));
        self.request_in_progress = true;
        let request = FetchRequest {
            generation: self.generation,
            count,
        };
        sdebug!(count, generation = self.generation, "requesting content");
        self.source.fetch(request);
    }

    fn pump_fetches(&mut self, now_ms: u64) {
        while let Some((request, result)) = self.source.poll_fetch() {
            if request.generation != self.generation {
                sdebug!(
                    generation = request.generation,
                    current = self.generation,
                    "discarding stale fetch"
                );
                continue;
            }
            self.request_in_progress = false;
            match result {
                Ok(new_items) => {
                    strace!(
                        requested = request.count,
                        received = new_items.len(),
                        "fetch resolved"
                    );
                    let short = new_items.len() < request.count;
                    if short {
                        self.end_of_content = true;
                    }
                    self.add_content(new_items, now_ms);
                    if short {
                        self.detach_content(now_ms);
                    }
                }
                Err(error) => {
                    swarn!(error = %error, "fetch failed; treating as end of content");
                    if let Some(cb) = &self.options.on_fetch_error {
                        cb(&error);
                    }
                    self.end_of_content = true;
                    self.detach_content(now_ms);
                }
            }
            self.notify();
        }
    }

    /// Merges a fetched page into the logical list and re-attaches the window.
    fn add_content(&mut self, new_items: Vec<S::Item>, now_ms: u64) {
        let previous = self.attached_range();
        for item in new_items {
            if self.items.len() == self.loaded_items {
                self.items.push(Slot::vacant());
            }
            self.items[self.loaded_items].data = Some(item);
            self.loaded_items += 1;
        }
        self.attach_content(previous, now_ms);
    }

    /// Trims trailing placeholder slots after end-of-content and recomputes positions so the
    /// removed phantom space cannot leave a dangling gap.
    fn detach_content(&mut self, now_ms: u64) {
        let previous = self.attached_range();
        while self.items.len() > self.loaded_items {
            if let Some(mut slot) = self.items.pop() {
                if let Some(node) = slot.node.take() {
                    if slot.tombstone {
                        self.tombstones.release(node);
                    }
                }
            }
        }
        let count = self.loaded_items;
        self.last_attached = cmp::min(self.last_attached, count);
        self.first_attached = cmp::min(self.first_attached, self.last_attached);
        if self.anchor.index >= count {
            self.anchor = if count == 0 {
                Anchor::rest()
            } else {
                Anchor {
                    index: count - 1,
                    offset: 0,
                }
            };
        }
        if count == 0 {
            self.scrolled_from_top = false;
        }
        self.attach_content(previous, now_ms);
    }

    fn expire_transitions(&mut self, now_ms: u64) {
        let mut i = 0;
        while i < self.transitions.len() {
            if self.transitions[i].deadline_ms <= now_ms {
                let finished = self.transitions.swap_remove(i);
                self.tombstones.release(finished.node);
            } else {
                i += 1;
            }
        }
    }

    fn measure_tombstone(&mut self) {
        let node = match self.tombstones.acquire() {
            Some(node) => node,
            None => self.source.create_tombstone(),
        };
        self.tombstone_size = self.source.measure(&node);
        self.tombstones.release(node);
        sdebug!(
            height = self.tombstone_size.height,
            width = self.tombstone_size.width,
            "measure_tombstone"
        );
    }

    fn measured_height(&self, index: usize) -> u32 {
        self.items.get(index).map(|s| s.height).unwrap_or(0)
    }

    fn height_or_tombstone(&self, index: usize) -> u64 {
        let h = self.measured_height(index);
        if h > 0 {
            u64::from(h)
        } else {
            u64::from(self.tombstone_size.height.max(1))
        }
    }

    fn content_height(&self) -> u64 {
        let mut total = 0u64;
        for i in 0..self.items.len() {
            total = total.saturating_add(self.height_or_tombstone(i));
        }
        total
    }

    #[cfg(test)]
    pub(crate) fn pooled_tombstones(&self) -> usize {
        self.tombstones.len()
    }

    #[cfg(test)]
    pub(crate) fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    #[cfg(test)]
    pub(crate) fn slots_with_nodes(&self) -> usize {
        self.items.iter().filter(|s| s.node.is_some()).count()
    }
}

impl<S: Source> core::fmt::Debug for Scroller<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scroller")
            .field("anchor", &self.anchor)
            .field("scroll_top", &self.scroll_top)
            .field("loaded_items", &self.loaded_items)
            .field("slots", &self.items.len())
            .field("first_attached", &self.first_attached)
            .field("last_attached", &self.last_attached)
            .field("request_in_progress", &self.request_in_progress)
            .field("end_of_content", &self.end_of_content)
            .field("runway_end", &self.runway_end)
            .finish_non_exhaustive()
    }
}
