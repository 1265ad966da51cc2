//! Scroll-sync observer.
//!
//! When the active section renders its subsections as one scrollable column,
//! each subsection starts at a known row (its anchor). [`ScrollSync`] watches
//! those anchor spans and reports which one sits in the viewport's focus
//! band, a band biased toward the upper-middle of the screen so the "current"
//! subsection reflects what the reader is actually reading rather than what
//! has merely appeared at the bottom edge.
//!
//! The observer has an explicit lifecycle: [`ScrollSync::observe`] subscribes
//! to one section's anchors (tearing down the previous subscription) and
//! [`ScrollSync::detach`] unsubscribes entirely. Callers apply a reported
//! focus change through
//! [`Navigator::set_subsection_from_scroll`](crate::Navigator::set_subsection_from_scroll),
//! which by construction cannot change the section component.

use crate::event::{LogLevel, emit_log};

/// The viewport band used to decide which anchor counts as "being read".
///
/// `top` and `bottom` are fractions of the viewport height measured from the
/// top edge. The default band covers 20%..45% of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusBand {
    pub top: f32,
    pub bottom: f32,
}

impl FocusBand {
    /// Create a band, clamping both edges into `0.0..=1.0` and ordering
    /// them.
    #[must_use]
    pub fn new(top: f32, bottom: f32) -> Self {
        let top = top.clamp(0.0, 1.0);
        let bottom = bottom.clamp(0.0, 1.0);
        if top <= bottom {
            Self { top, bottom }
        } else {
            Self {
                top: bottom,
                bottom: top,
            }
        }
    }
}

impl Default for FocusBand {
    fn default() -> Self {
        Self {
            top: 0.20,
            bottom: 0.45,
        }
    }
}

/// Where one subsection's content sits in the active section's column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorSpan {
    /// Subsection index within the observed section.
    pub subsection: usize,
    /// First row of the subsection in document coordinates.
    pub top_row: u32,
    /// Number of rows the subsection occupies.
    pub height: u32,
}

impl AnchorSpan {
    /// Create a span.
    #[must_use]
    pub const fn new(subsection: usize, top_row: u32, height: u32) -> Self {
        Self {
            subsection,
            top_row,
            height,
        }
    }

    const fn end_row(&self) -> u32 {
        self.top_row.saturating_add(self.height)
    }
}

/// A reported focus change: the subsection now being read.
///
/// Carries the section it was observed in so stale reports (from an observer
/// that outlived its section) can be rejected by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollFocus {
    pub section: usize,
    pub subsection: usize,
}

#[derive(Clone, Debug)]
struct Watch {
    section: usize,
    spans: Vec<AnchorSpan>,
}

/// Watches the active section's anchor spans and reports focus changes.
#[derive(Clone, Debug, Default)]
pub struct ScrollSync {
    band: FocusBand,
    watch: Option<Watch>,
    last_focus: Option<usize>,
}

impl ScrollSync {
    /// Create an observer with the default focus band.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an observer with a custom focus band.
    #[must_use]
    pub fn with_band(band: FocusBand) -> Self {
        Self {
            band,
            watch: None,
            last_focus: None,
        }
    }

    /// The configured focus band.
    #[must_use]
    pub fn band(&self) -> FocusBand {
        self.band
    }

    /// Subscribe to a section's anchors, tearing down any previous
    /// subscription. Spans are kept sorted by row. Observing an empty span
    /// list is equivalent to [`ScrollSync::detach`]: a section without
    /// subsections is never watched.
    pub fn observe(&mut self, section: usize, mut spans: Vec<AnchorSpan>) {
        if spans.is_empty() {
            self.detach();
            return;
        }
        spans.sort_by_key(|span| span.top_row);
        emit_log(
            LogLevel::Debug,
            &format!("scroll-sync: observe section={section} anchors={}", spans.len()),
        );
        self.watch = Some(Watch { section, spans });
        self.last_focus = None;
    }

    /// Drop the subscription and all observation handles.
    pub fn detach(&mut self) {
        if self.watch.is_some() {
            emit_log(LogLevel::Debug, "scroll-sync: detach");
        }
        self.watch = None;
        self.last_focus = None;
    }

    /// Section currently observed, if any.
    #[must_use]
    pub fn section(&self) -> Option<usize> {
        self.watch.as_ref().map(|w| w.section)
    }

    /// Number of live observation handles. Zero when detached; used to
    /// verify the observer does not leak handles across re-subscriptions.
    #[must_use]
    pub fn watched(&self) -> usize {
        self.watch.as_ref().map_or(0, |w| w.spans.len())
    }

    /// Process a scroll signal.
    ///
    /// `offset_rows` is the viewport's top row in document coordinates and
    /// `viewport_rows` its height. Returns the new focus when it differs
    /// from the previously reported one; duplicate reports are suppressed.
    pub fn on_scroll(&mut self, offset_rows: u32, viewport_rows: u32) -> Option<ScrollFocus> {
        let watch = self.watch.as_ref()?;
        if viewport_rows == 0 {
            return None;
        }
        let viewport = viewport_rows as f32;
        let band_top = offset_rows as f32 + viewport * self.band.top;
        let band_bottom = offset_rows as f32 + viewport * self.band.bottom;

        let focus = Self::focus_in_band(&watch.spans, band_top, band_bottom)?;
        if self.last_focus == Some(focus) {
            return None;
        }
        self.last_focus = Some(focus);
        let section = watch.section;
        emit_log(
            LogLevel::Debug,
            &format!("scroll-sync: focus section={section} subsection={focus}"),
        );
        Some(ScrollFocus {
            section,
            subsection: focus,
        })
    }

    /// Topmost span intersecting the band wins; when none intersects, the
    /// last span starting above the band is still the one being read.
    fn focus_in_band(spans: &[AnchorSpan], band_top: f32, band_bottom: f32) -> Option<usize> {
        for span in spans {
            let top = span.top_row as f32;
            let end = span.end_row() as f32;
            if top < band_bottom && end > band_top {
                return Some(span.subsection);
            }
        }
        spans
            .iter()
            .rev()
            .find(|span| (span.top_row as f32) <= band_top)
            .map(|span| span.subsection)
    }
}
