//! Presenter façade: wires intents, scroll signals, and fragment signals
//! into the position controller, and owns the scroll observer's lifecycle.
//!
//! Front-ends feed [`Presenter::handle`], [`Presenter::on_scroll`], and
//! [`Presenter::on_fragment_changed`], report the active section's layout
//! through [`Presenter::set_anchor_spans`], and read back panel rows, the
//! content frame, and the transition state. All writes to the position go
//! through the navigator's four operations; nothing else mutates it.

use crate::content::{ContentFrame, Transition, TransitionKind, frame};
use crate::deeplink::{FragmentHost, apply_fragment, select_subsection};
use crate::event::{LogLevel, emit_log};
use crate::intent::Intent;
use crate::outline::Outline;
use crate::panel::{NavPanel, PanelRow, Progress};
use crate::position::{Navigator, Position};
use crate::scroll::{AnchorSpan, ScrollSync};

const TRANSITION_SLIDE_MS: u16 = 220;
const TRANSITION_FADE_MS: u16 = 160;

/// Integration point between front-ends and the navigation core.
pub struct Presenter<H: FragmentHost> {
    nav: Navigator,
    panel: NavPanel,
    scroll: ScrollSync,
    host: H,
    transition: Option<Transition>,
}

impl<H: FragmentHost> Presenter<H> {
    /// Create a presenter over a validated outline.
    ///
    /// A fragment already present on the host (a deep-linked load) is
    /// applied before the panel's initial expansion state is derived, so the
    /// section containing the deep-link target starts expanded.
    #[must_use]
    pub fn new(outline: Outline, mut host: H) -> Self {
        let mut nav = Navigator::new(outline);
        apply_fragment(&mut nav, &mut host);
        let panel = NavPanel::new(&nav);
        Self {
            nav,
            panel,
            scroll: ScrollSync::new(),
            host,
            transition: None,
        }
    }

    /// The navigator (read access for front-ends).
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.nav.position()
    }

    /// The fragment host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handle a user intent at `now_ms` (for transition timing).
    pub fn handle(&mut self, intent: Intent, now_ms: u64) {
        let before = self.nav.position();
        let kind = match intent {
            Intent::SelectSection(section) => {
                self.panel.select_section(&mut self.nav, section);
                TransitionKind::Fade
            }
            Intent::SelectSubsection {
                section,
                subsection,
            } => {
                select_subsection(&mut self.nav, &mut self.host, section, subsection);
                TransitionKind::Fade
            }
            Intent::Next => {
                self.nav.next();
                TransitionKind::SlideLeft
            }
            Intent::Previous => {
                self.nav.previous();
                TransitionKind::SlideRight
            }
        };
        self.after_move(before, kind, intent.is_jump(), now_ms);
    }

    /// Handle an external fragment change at `now_ms`.
    pub fn on_fragment_changed(&mut self, now_ms: u64) {
        let before = self.nav.position();
        if apply_fragment(&mut self.nav, &mut self.host) {
            self.after_move(before, TransitionKind::Fade, true, now_ms);
        }
    }

    /// Report the active section's anchor layout after rendering.
    ///
    /// Spans for a section other than the active one are rejected: a stale
    /// layout report must not resurrect observation of a section the reader
    /// has already left.
    pub fn set_anchor_spans(&mut self, section: usize, spans: Vec<AnchorSpan>) {
        if section != self.nav.position().section {
            emit_log(
                LogLevel::Warn,
                &format!("presenter: dropping anchor spans for inactive section {section}"),
            );
            return;
        }
        self.scroll.observe(section, spans);
    }

    /// Apply a scroll signal from the front-end.
    ///
    /// Focus reports are forwarded to the navigator's scroll operation,
    /// which only ever moves the subsection component. Reports from an
    /// observer that no longer matches the active section are dropped.
    pub fn on_scroll(&mut self, offset_rows: u32, viewport_rows: u32) {
        let Some(focus) = self.scroll.on_scroll(offset_rows, viewport_rows) else {
            return;
        };
        if focus.section != self.nav.position().section {
            return;
        }
        self.nav.set_subsection_from_scroll(focus.subsection);
    }

    /// The content frame at the current position.
    #[must_use]
    pub fn frame(&self) -> ContentFrame<'_> {
        frame(&self.nav)
    }

    /// The running content transition, as `(kind, eased progress)`.
    #[must_use]
    pub fn transition(&self, now_ms: u64) -> Option<(TransitionKind, f32)> {
        self.transition
            .and_then(|t| t.frame(now_ms).map(|p| (t.kind(), p)))
    }

    /// Rendered panel rows.
    #[must_use]
    pub fn rows(&self) -> Vec<PanelRow> {
        self.panel.rows(&self.nav)
    }

    /// Whether a section's subsection list is visible in the panel.
    #[must_use]
    pub fn is_expanded(&self, section: usize) -> bool {
        self.panel.is_expanded(section)
    }

    /// Reading progress.
    #[must_use]
    pub fn progress(&self) -> Progress {
        NavPanel::progress(&self.nav)
    }

    /// Number of anchors currently observed (leak check for embedders).
    #[must_use]
    pub fn watched_anchors(&self) -> usize {
        self.scroll.watched()
    }

    /// Post-move bookkeeping: transition start and observer lifecycle.
    fn after_move(&mut self, before: Position, kind: TransitionKind, jump: bool, now_ms: u64) {
        let after = self.nav.position();
        if after.section != before.section {
            // Leaving a section always tears down its observation; the
            // front-end re-reports spans once the new section is rendered.
            self.scroll.detach();
            let kind = if jump { TransitionKind::Fade } else { kind };
            self.transition = Some(Transition::new(kind, now_ms, TRANSITION_SLIDE_MS));
        } else if after != before && !jump {
            self.transition = Some(Transition::new(
                TransitionKind::Fade,
                now_ms,
                TRANSITION_FADE_MS,
            ));
        }
        // Same-section jumps scroll to their anchor instead of swapping
        // content; no transition starts for those.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deeplink::MemoryHost;
    use crate::outline::{Section, Subsection};

    fn outline() -> Outline {
        Outline::new(vec![
            Section::new("a", "A").with_content("alpha"),
            Section::new("b", "B")
                .with_subsection(Subsection::new("b1", "B one", "b-one"))
                .with_subsection(Subsection::new("b2", "B two", "b-two")),
        ])
        .expect("valid outline")
    }

    #[test]
    fn test_deep_linked_load() {
        let presenter = Presenter::new(outline(), MemoryHost::with_fragment("b2"));
        assert_eq!(presenter.position(), Position::new(1, Some(1)));
        assert!(presenter.is_expanded(1));
        assert!(!presenter.is_expanded(0));
    }

    #[test]
    fn test_section_change_detaches_observer() {
        let mut presenter = Presenter::new(outline(), MemoryHost::new());
        presenter.handle(Intent::SelectSection(1), 0);
        presenter.set_anchor_spans(1, vec![AnchorSpan::new(0, 0, 10), AnchorSpan::new(1, 10, 10)]);
        assert_eq!(presenter.watched_anchors(), 2);

        presenter.handle(Intent::SelectSection(0), 100);
        assert_eq!(presenter.watched_anchors(), 0);
    }

    #[test]
    fn test_spans_for_inactive_section_rejected() {
        let mut presenter = Presenter::new(outline(), MemoryHost::new());
        presenter.set_anchor_spans(1, vec![AnchorSpan::new(0, 0, 10)]);
        assert_eq!(presenter.watched_anchors(), 0);
    }

    #[test]
    fn test_scroll_moves_subsection_only() {
        let mut presenter = Presenter::new(outline(), MemoryHost::new());
        presenter.handle(Intent::SelectSection(1), 0);
        presenter.set_anchor_spans(1, vec![AnchorSpan::new(0, 0, 40), AnchorSpan::new(1, 40, 40)]);

        presenter.on_scroll(45, 20);
        assert_eq!(presenter.position(), Position::new(1, Some(1)));
    }

    #[test]
    fn test_next_starts_slide_transition() {
        let mut presenter = Presenter::new(outline(), MemoryHost::new());
        presenter.handle(Intent::Next, 1_000);
        let (kind, progress) = presenter.transition(1_010).expect("transition running");
        assert_eq!(kind, TransitionKind::SlideLeft);
        assert!(progress < 0.5);
        assert_eq!(presenter.transition(2_000), None);
    }

    #[test]
    fn test_same_section_subsection_jump_has_no_transition() {
        let mut presenter = Presenter::new(outline(), MemoryHost::new());
        presenter.handle(Intent::SelectSubsection { section: 1, subsection: 0 }, 0);
        assert!(presenter.transition(1).is_some()); // cross-section jump fades

        presenter.handle(Intent::SelectSubsection { section: 1, subsection: 1 }, 5_000);
        assert_eq!(presenter.transition(5_001), None);
    }

    #[test]
    fn test_fragment_change_navigates() {
        let mut presenter = Presenter::new(outline(), MemoryHost::new());
        presenter.host.set_fragment("b1");
        presenter.on_fragment_changed(0);
        assert_eq!(presenter.position(), Position::new(1, Some(0)));
    }
}
