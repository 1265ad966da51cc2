//! Navigation panel presenter.
//!
//! Renders the outline as a collapsible tree keyed off the current position
//! and turns row clicks into controller calls. The panel owns only the
//! expansion state; expansion and position are independent — collapsing the
//! section being read never moves the reader.

use std::collections::BTreeSet;

use bitflags::bitflags;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::position::Navigator;

/// Default display-width budget for row titles.
const DEFAULT_TITLE_BUDGET: usize = 28;

bitflags! {
    /// Packed display state of one panel row.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct RowFlags: u8 {
        /// The row covers the current reading position.
        const ACTIVE       = 0x01;
        /// The section row's subsection list is currently visible.
        const EXPANDED     = 0x02;
        /// The section row shows a toggle affordance.
        const HAS_CHILDREN = 0x04;
        /// The row is a subsection (indented one level).
        const SUBSECTION   = 0x08;
    }
}

/// One row of the rendered panel tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelRow {
    /// Section index this row belongs to.
    pub section: usize,
    /// Subsection index for subsection rows, `None` for section rows.
    pub subsection: Option<usize>,
    /// Title, truncated grapheme-safely to the panel's width budget.
    pub title: String,
    pub flags: RowFlags,
}

/// Overall reading progress: `current` out of `total` flat pages, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// The collapsible navigation tree.
#[derive(Clone, Debug)]
pub struct NavPanel {
    expanded: BTreeSet<usize>,
    title_budget: usize,
}

impl NavPanel {
    /// Create a panel; the section containing the current position starts
    /// expanded.
    #[must_use]
    pub fn new(nav: &Navigator) -> Self {
        let mut expanded = BTreeSet::new();
        expanded.insert(nav.position().section);
        Self {
            expanded,
            title_budget: DEFAULT_TITLE_BUDGET,
        }
    }

    /// Override the display-width budget for row titles.
    #[must_use]
    pub fn with_title_budget(mut self, columns: usize) -> Self {
        self.title_budget = columns;
        self
    }

    /// Whether a section's subsection list is visible.
    #[must_use]
    pub fn is_expanded(&self, section: usize) -> bool {
        self.expanded.contains(&section)
    }

    /// Handle a click on a section row.
    ///
    /// With subsections: toggles expansion, and when the section was not
    /// already expanded also navigates to its landing position. Without
    /// subsections: always navigates.
    pub fn select_section(&mut self, nav: &mut Navigator, section: usize) {
        let Some(target) = nav.outline().section(section) else {
            return;
        };
        if target.has_subsections() {
            let was_expanded = !self.expanded.insert(section);
            if was_expanded {
                self.expanded.remove(&section);
            } else {
                nav.go_to(section, None);
            }
        } else {
            nav.go_to(section, None);
        }
    }

    /// Handle a click on a subsection row: always navigates to that exact
    /// pair, regardless of expansion state.
    pub fn select_subsection(&self, nav: &mut Navigator, section: usize, subsection: usize) {
        nav.go_to(section, Some(subsection));
    }

    /// Render the tree: one row per section, plus one per subsection of
    /// each expanded section.
    #[must_use]
    pub fn rows(&self, nav: &Navigator) -> Vec<PanelRow> {
        let position = nav.position();
        let mut rows = Vec::new();
        for (si, section) in nav.outline().sections().iter().enumerate() {
            let mut flags = RowFlags::empty();
            if section.has_subsections() {
                flags |= RowFlags::HAS_CHILDREN;
            }
            if self.is_expanded(si) {
                flags |= RowFlags::EXPANDED;
            }
            if position.section == si {
                flags |= RowFlags::ACTIVE;
            }
            rows.push(PanelRow {
                section: si,
                subsection: None,
                title: truncate_title(section.title(), self.title_budget),
                flags,
            });

            if !self.is_expanded(si) {
                continue;
            }
            for (ssi, subsection) in section.subsections().iter().enumerate() {
                let mut flags = RowFlags::SUBSECTION;
                if position.section == si && position.subsection == Some(ssi) {
                    flags |= RowFlags::ACTIVE;
                }
                rows.push(PanelRow {
                    section: si,
                    subsection: Some(ssi),
                    title: truncate_title(subsection.title(), self.title_budget),
                    flags,
                });
            }
        }
        rows
    }

    /// Reading progress over the flattened page sequence.
    ///
    /// One counting rule is applied everywhere: the flattener's. The
    /// numerator is the current flat index plus one, the denominator the
    /// flat page count.
    #[must_use]
    pub fn progress(nav: &Navigator) -> Progress {
        Progress {
            current: nav.flat_index() + 1,
            total: nav.page_count(),
        }
    }
}

/// Truncate a title to `budget` display columns at a grapheme boundary,
/// appending an ellipsis when anything was cut.
fn truncate_title(title: &str, budget: usize) -> String {
    if title.width() <= budget {
        return title.to_string();
    }
    let keep = budget.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for grapheme in title.graphemes(true) {
        let w = grapheme.width();
        if used + w > keep {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out.push('…');
    out
}
