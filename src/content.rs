//! Content presenter: the current flat page and its swap transition.
//!
//! [`frame`] resolves the page at the current position together with the
//! "advance to next" affordance. The affordance is absent on the last page
//! even though `next()` itself wraps: wraparound stays reachable through the
//! panel/keyboard path only.

use crate::outline::Payload;
use crate::position::Navigator;

/// The "advance to next" affordance, naming the page it leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceHint<'a> {
    /// Title of the next flat page.
    pub title: &'a str,
}

/// Everything the content view needs to render the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentFrame<'a> {
    /// Title of the current page.
    pub title: &'a str,
    /// Opaque payload of the current page. `None` only for the landing
    /// position of a container-only section before it resolves.
    pub payload: Option<&'a Payload>,
    /// Present on every page except the last.
    pub advance: Option<AdvanceHint<'a>>,
}

/// Resolve the content frame for the navigator's current position.
#[must_use]
pub fn frame(nav: &Navigator) -> ContentFrame<'_> {
    let outline = nav.outline();
    let page = nav.current_page();
    let flat = nav.flat_index();
    let advance = if flat + 1 < nav.page_count() {
        nav.pages().get(flat + 1).map(|next| AdvanceHint {
            title: next.title(outline),
        })
    } else {
        None
    };
    ContentFrame {
        title: page.title(outline),
        payload: page.payload(outline),
        advance,
    }
}

/// Kind of content-swap animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Content slides in from the right (forward navigation).
    SlideLeft,
    /// Content slides in from the left (backward navigation).
    SlideRight,
    /// Cross-fade (jumps and in-section swaps).
    Fade,
}

/// A running content-swap animation, driven by a millisecond clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    kind: TransitionKind,
    start_ms: u64,
    duration_ms: u16,
}

impl Transition {
    /// Start a transition at `now_ms`.
    #[must_use]
    pub const fn new(kind: TransitionKind, now_ms: u64, duration_ms: u16) -> Self {
        Self {
            kind,
            start_ms: now_ms,
            duration_ms,
        }
    }

    /// The animation kind.
    #[must_use]
    pub const fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Eased progress in `0.0..=1.0` at `now_ms`, or `None` once finished.
    #[must_use]
    pub fn frame(&self, now_ms: u64) -> Option<f32> {
        if self.duration_ms == 0 {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= u64::from(self.duration_ms) {
            return None;
        }
        let t = elapsed as f32 / f32::from(self.duration_ms);
        Some(ease_in_out(t))
    }

    /// Whether the transition has run to completion at `now_ms`.
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.frame(now_ms).is_none()
    }
}

/// Smoothstep easing.
fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
