// Example: minimal headless usage, simulating scroll and frame ticks.
use std::collections::VecDeque;

use scroller::{FetchRequest, Scroller, ScrollerOptions, Size, Source};

struct Message {
    id: u64,
    body: String,
}

/// A toy source: 42 messages total, pages resolve on the next poll.
struct Backend {
    next_id: u64,
    pending: VecDeque<FetchRequest>,
}

struct Node {
    text: String,
    tombstone: bool,
}

impl Source for Backend {
    type Item = Message;
    type Node = Node;
    type Error = std::io::Error;

    fn fetch(&mut self, request: FetchRequest) {
        self.pending.push_back(request);
    }

    fn poll_fetch(&mut self) -> Option<(FetchRequest, Result<Vec<Message>, Self::Error>)> {
        let request = self.pending.pop_front()?;
        let remaining = 42u64.saturating_sub(self.next_id) as usize;
        let n = request.count.min(remaining);
        let page = (0..n)
            .map(|_| {
                let id = self.next_id;
                self.next_id += 1;
                Message {
                    id,
                    body: format!("message #{id}"),
                }
            })
            .collect();
        Some((request, Ok(page)))
    }

    fn create_tombstone(&mut self) -> Node {
        Node {
            text: String::new(),
            tombstone: true,
        }
    }

    fn render(&mut self, _previous: Option<&Message>, item: &Message, recycled: Option<Node>) -> Node {
        let mut node = recycled.unwrap_or(Node {
            text: String::new(),
            tombstone: false,
        });
        node.text = item.body.clone();
        node.tombstone = false;
        node
    }

    fn measure(&self, node: &Node) -> Size {
        Size {
            height: if node.tombstone { 32 } else { 40 },
            width: 320,
        }
    }
}

fn main() {
    let backend = Backend {
        next_id: 0,
        pending: VecDeque::new(),
    };
    let mut s = Scroller::new(backend, ScrollerOptions::new(10).with_viewport_height(160));

    // The viewport comes alive: fill the window and pump the first pages.
    s.on_resize(0);
    s.update(0);
    println!(
        "after init: loaded={} attached={:?} runway_end={}",
        s.loaded_len(),
        s.attached_range(),
        s.runway_end()
    );

    // Simulate a user scrolling down across a few frames.
    for frame in 1..=10u64 {
        s.on_scroll(frame * 80, frame * 16);
        s.update(frame * 16);
    }
    println!(
        "after scroll: anchor={:?} loaded={} end_of_content={}",
        s.anchor(),
        s.loaded_len(),
        s.end_of_content()
    );

    s.for_each_attached(|item| {
        if item.top < s.scroll_top() + 160 && item.top + u64::from(item.height) > s.scroll_top() {
            let text = if item.is_tombstone { "..." } else { &item.node.text };
            println!("  y={:4} {}", item.top, text);
        }
    });
}
