use alloc::format;
use alloc::vec::Vec;

use scroller::{Anchor, ScrollerOptions};

use crate::{Controller, Easing, Tween, VecSource};

const VIEWPORT: u32 = 120;
const LIMIT: usize = 10;

fn item_height(id: &u64) -> u32 {
    20 + (*id % 5) as u32 * 10
}

fn feed(total: u64) -> VecSource<u64> {
    VecSource::new((0..total).collect(), item_height, |id| format!("item {id}"))
        .with_tombstone_height(24)
}

fn controller(total: u64) -> Controller<VecSource<u64>> {
    let options = ScrollerOptions::new(LIMIT).with_viewport_height(VIEWPORT);
    Controller::new(feed(total), options, 0)
}

#[test]
fn vec_source_pages_through_to_end_of_content() {
    let c = controller(23);
    let s = c.scroller();

    assert!(s.end_of_content());
    assert_eq!(s.loaded_len(), 23);
    assert_eq!(s.slot_len(), 23);
    assert_eq!(s.source().remaining(), 0);
}

#[test]
fn vec_source_renders_labels_and_recycles() {
    let mut c = controller(500);

    let mut labels = Vec::new();
    c.scroller().for_each_attached(|item| {
        if !item.is_tombstone {
            labels.push((item.index, item.node.label.clone()));
        }
    });
    assert!(!labels.is_empty());
    for (index, label) in labels {
        assert_eq!(label, format!("item {index}"));
    }

    // Scroll far enough that early nodes are reaped and re-rendered for later items.
    for step in 1..=40u64 {
        c.on_scroll(step * 60, step * 16);
    }
    c.scroller().for_each_attached(|item| {
        if !item.is_tombstone {
            assert_eq!(item.node.label, format!("item {}", item.index));
            assert!(!item.node.is_tombstone);
        }
    });
}

#[test]
fn header_appears_only_on_group_boundaries() {
    let source = VecSource::new(
        (0..60u64).collect(),
        item_height,
        |id| format!("item {id}"),
    )
    .with_header(|previous, item| {
        let group = item / 10;
        match previous {
            Some(p) if p / 10 == group => None,
            _ => Some(format!("group {group}")),
        }
    });
    let options = ScrollerOptions::new(LIMIT).with_viewport_height(VIEWPORT);
    let c = Controller::new(source, options, 0);

    c.scroller().for_each_attached(|item| {
        if item.is_tombstone {
            return;
        }
        if item.index % 10 == 0 {
            assert_eq!(
                item.node.header.as_deref(),
                Some(format!("group {}", item.index / 10).as_str()),
                "item {} should start a group",
                item.index
            );
        } else {
            assert_eq!(item.node.header, None, "item {} should not carry a header", item.index);
        }
    });
}

#[test]
fn scroll_to_top_animates_monotonically_to_zero() {
    let mut c = controller(200);
    c.on_scroll(900, 0);
    assert!(c.scroller().scroll_top() > 0);

    c.scroll_to_top(1_000, 160, Easing::SmoothStep);
    assert!(c.is_animating());

    let mut previous = c.scroller().scroll_top();
    let mut now = 1_000;
    while c.is_animating() {
        now += 16;
        if let Some(top) = c.tick(now) {
            assert!(top <= previous, "animated offset went back up: {previous} -> {top}");
            previous = top;
        }
        assert!(now < 2_000, "animation never finished");
    }

    assert_eq!(c.scroller().scroll_top(), 0);
    assert_eq!(c.scroller().anchor(), Anchor::rest());
    assert!(!c.scroller().scroll_state().scrolled_from_top);
}

#[test]
fn scroll_to_top_is_a_noop_at_the_top() {
    let mut c = controller(40);
    c.scroll_to_top(0, 160, Easing::Linear);
    assert!(!c.is_animating());
    assert_eq!(c.tick(16), None);
}

#[test]
fn user_scroll_cancels_the_animation() {
    let mut c = controller(200);
    c.on_scroll(800, 0);
    c.scroll_to_top(1_000, 300, Easing::EaseInOutCubic);
    c.tick(1_050);
    assert!(c.is_animating());

    c.on_scroll(640, 1_060);
    assert!(!c.is_animating());
    assert_eq!(c.scroller().scroll_top(), 640);
    assert_eq!(c.tick(1_080), None);
}

#[test]
fn set_source_swaps_feeds_and_restarts() {
    let mut c = controller(30);
    c.on_scroll(400, 0);
    assert!(c.scroller().scroll_top() > 0);

    let old = c.set_source(feed(5), 100);
    assert_eq!(old.cursor(), 30);
    assert_eq!(c.scroller().scroll_top(), 0);
    assert!(c.scroller().end_of_content());
    assert_eq!(c.scroller().loaded_len(), 5);

    let mut first_label = None;
    c.scroller().for_each_attached(|item| {
        if item.index == 0 {
            first_label = Some(item.node.label.clone());
        }
    });
    assert_eq!(first_label.as_deref(), Some("item 0"));
}

#[test]
fn empty_feed_reports_the_empty_state() {
    let options = ScrollerOptions::new(LIMIT)
        .with_viewport_height(VIEWPORT)
        .with_empty_message("nothing here");
    let c = Controller::new(feed(0), options, 0);

    assert!(c.scroller().is_empty());
    assert_eq!(c.scroller().empty_message(), Some("nothing here"));
    assert!(c.scroll_state().empty);
}

#[test]
fn tween_sampling_hits_both_endpoints() {
    let tween = Tween::new(480, 0, 100, 200, Easing::Linear);
    assert_eq!(tween.sample(100), 480);
    assert_eq!(tween.sample(200), 240);
    assert_eq!(tween.sample(300), 0);
    assert!(tween.is_done(300));
    assert!(!tween.is_done(299));
}

#[test]
fn finished_tween_lands_exactly_on_its_target() {
    // Only an exact 0 resets the anchor, so truncating float easing must never leave the
    // finished tween a pixel short.
    let tween = Tween::to_top(937, 10, 90, Easing::EaseInOutCubic);
    assert_eq!(tween.target(), 0);
    assert_eq!(tween.sample(10), 937);
    assert!(!tween.is_done(99));
    assert_eq!(tween.sample(100), 0);
    assert_eq!(tween.sample(5_000), 0);
}

#[test]
fn easing_curves_are_anchored_at_zero_and_one() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert!(easing.sample(0.0).abs() < 1e-6);
        assert!((easing.sample(1.0) - 1.0).abs() < 1e-6);
        assert!((easing.sample(0.5) - 0.5).abs() < 1e-6);
    }
}
