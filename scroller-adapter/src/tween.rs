/// The animation behind the adapter's "scroll to top" affordance.
///
/// The engine never animates scroll offsets itself. [`crate::Controller`] samples the active
/// tween once per frame and feeds the value through `Scroller::on_scroll`, so an animated
/// return to the top is indistinguishable from a very smooth user scroll, and a real user
/// scroll simply replaces the tween's output (see `Controller::on_scroll`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    from: u64,
    to: u64,
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl Tween {
    pub fn new(from: u64, to: u64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// A tween back to the rest position, where the engine snaps the anchor to item 0.
    pub fn to_top(from: u64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self::new(from, 0, start_ms, duration_ms, easing)
    }

    /// The scroll offset this tween is heading for.
    pub fn target(&self) -> u64 {
        self.to
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// The scroll offset to apply at `now_ms`.
    ///
    /// Once the duration has elapsed this returns exactly `target()`; the eased float math
    /// must not be allowed to land one pixel short of the rest position, since only an exact
    /// offset of 0 resets the anchor.
    pub fn sample(&self, now_ms: u64) -> u64 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);

        let from = self.from as f32;
        let to = self.to as f32;
        let v = from + (to - from) * eased;
        v.max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
