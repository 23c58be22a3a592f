// Example: a grouped feed driven by Controller + VecSource, with animated scroll-to-top.
use scroller::ScrollerOptions;
use scroller_adapter::{Controller, Easing, VecSource};

fn main() {
    // 120 posts, grouped by tens; every tenth post opens a new day.
    let source = VecSource::new(
        (0..120u64).collect(),
        |id| 36 + (*id % 4) as u32 * 12,
        |id| format!("post {id}"),
    )
    .with_header(|previous, item| {
        let day = item / 10;
        match previous {
            Some(p) if p / 10 == day => None,
            _ => Some(format!("day {day}")),
        }
    });

    let options = ScrollerOptions::new(15).with_viewport_height(240);
    let mut c = Controller::new(source, options, 0);

    // Scroll partway down, one wheel notch per frame.
    let mut now = 0u64;
    for _ in 0..30 {
        now += 16;
        c.on_scroll(c.scroller().scroll_top() + 90, now);
    }
    println!(
        "scrolled: top={} anchor={:?} state={:?}",
        c.scroller().scroll_top(),
        c.scroller().anchor(),
        c.scroll_state()
    );

    c.scroller().for_each_attached(|item| {
        let viewport_top = c.scroller().scroll_top();
        if item.top >= viewport_top && item.top < viewport_top + 240 {
            if let Some(header) = &item.node.header {
                println!("  == {header} ==");
            }
            println!("  y={:4} {}", item.top, item.node.label);
        }
    });

    // The "back to top" button.
    c.scroll_to_top(now, 320, Easing::EaseInOutCubic);
    while c.is_animating() {
        now += 16;
        if let Some(top) = c.tick(now) {
            println!("animating: top={top}");
        }
    }
    println!("done: top={} state={:?}", c.scroller().scroll_top(), c.scroll_state());
}
