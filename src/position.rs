//! Position state controller.
//!
//! [`Navigator`] owns the single `Position` value for the session and is its
//! only writer. The four operations here are the complete set of permitted
//! transitions: panel clicks and deep-link jumps land in [`Navigator::go_to`],
//! linear traversal in [`Navigator::next`] / [`Navigator::previous`], and
//! scroll tracking in [`Navigator::set_subsection_from_scroll`]. Presenters
//! read the position; they never mutate it.

use crate::event::{emit_event, names};
use crate::flatten::{FlatIndex, FlatPage};
use crate::outline::Outline;

/// The current reading location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Index of the active section. Always a valid outline index.
    pub section: usize,
    /// Index of the active subsection within the section, when the reader
    /// is inside one.
    pub subsection: Option<usize>,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(section: usize, subsection: Option<usize>) -> Self {
        Self {
            section,
            subsection,
        }
    }

    /// The initial reading position: first section, no subsection.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(0, None)
    }
}

/// Owns the outline, its flattening, and the current position.
///
/// Navigation is cyclic: [`Navigator::next`] wraps from the last flat page
/// to the first, and [`Navigator::previous`] wraps the other way, so linear
/// traversal is always available. Out-of-range input to any operation is a
/// silent no-op, never a panic.
#[derive(Clone, Debug)]
pub struct Navigator {
    outline: Outline,
    index: FlatIndex,
    position: Position,
}

impl Navigator {
    /// Create a navigator over a validated outline, starting at the first
    /// section with no subsection.
    #[must_use]
    pub fn new(outline: Outline) -> Self {
        let index = FlatIndex::new(&outline);
        Self {
            outline,
            index,
            position: Position::start(),
        }
    }

    /// The document outline.
    #[must_use]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The flattened page sequence.
    #[must_use]
    pub fn pages(&self) -> &FlatIndex {
        &self.index
    }

    /// Total number of flat pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.index.len()
    }

    /// Flat index derived from the current position.
    #[must_use]
    pub fn flat_index(&self) -> usize {
        self.index.index_of(self.position).unwrap_or(0)
    }

    /// The flat page at the current position.
    #[must_use]
    pub fn current_page(&self) -> FlatPage {
        self.index
            .get(self.flat_index())
            .copied()
            .unwrap_or(FlatPage {
                section: self.position.section,
                subsection: self.position.subsection,
            })
    }

    /// Jump to an absolute position.
    ///
    /// Used for panel clicks and deep-link jumps. Out-of-range input is
    /// ignored; internal callers always pass indices taken from the outline
    /// itself.
    pub fn go_to(&mut self, section: usize, subsection: Option<usize>) {
        let Some(target) = self.outline.section(section) else {
            return;
        };
        if let Some(ssi) = subsection {
            if ssi >= target.subsections().len() {
                return;
            }
        }
        self.apply(Position::new(section, subsection));
    }

    /// Advance one flat page, wrapping past the last page to the first.
    pub fn next(&mut self) {
        self.step(1);
    }

    /// Step back one flat page, wrapping from the first page to the last.
    pub fn previous(&mut self) {
        self.step(-1);
    }

    /// Update only the subsection component from scroll tracking.
    ///
    /// The section component is never touched here: scroll tracking only
    /// operates within the active section's rendered anchors. Out-of-range
    /// indices for the active section are ignored.
    pub fn set_subsection_from_scroll(&mut self, subsection: usize) {
        let Some(section) = self.outline.section(self.position.section) else {
            return;
        };
        if subsection >= section.subsections().len() {
            return;
        }
        self.apply(Position::new(self.position.section, Some(subsection)));
    }

    fn step(&mut self, delta: isize) {
        let len = self.index.len();
        if len == 0 {
            return;
        }
        let current = self.flat_index();
        let target = (current as isize + delta).rem_euclid(len as isize) as usize;
        if let Some(position) = self.index.position_of(target) {
            self.apply(position);
        }
    }

    fn apply(&mut self, position: Position) {
        if position == self.position {
            return;
        }
        self.position = position;
        emit_event(
            names::NAVIGATE,
            &format!(
                "section={} subsection={}",
                position.section,
                position
                    .subsection
                    .map_or_else(|| "-".to_string(), |i| i.to_string()),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{Section, Subsection};

    fn navigator() -> Navigator {
        let outline = Outline::new(vec![
            Section::new("a", "A").with_content("alpha"),
            Section::new("b", "B")
                .with_subsection(Subsection::new("b1", "B one", "b-one"))
                .with_subsection(Subsection::new("b2", "B two", "b-two")),
        ])
        .expect("valid outline");
        Navigator::new(outline)
    }

    #[test]
    fn test_initial_position() {
        let nav = navigator();
        assert_eq!(nav.position(), Position::start());
        assert_eq!(nav.flat_index(), 0);
        assert_eq!(nav.page_count(), 3);
    }

    #[test]
    fn test_next_walks_and_wraps() {
        let mut nav = navigator();
        nav.next();
        assert_eq!(nav.position(), Position::new(1, Some(0)));
        nav.next();
        assert_eq!(nav.position(), Position::new(1, Some(1)));
        nav.next();
        assert_eq!(nav.position(), Position::start());
    }

    #[test]
    fn test_previous_wraps_backward() {
        let mut nav = navigator();
        nav.previous();
        assert_eq!(nav.position(), Position::new(1, Some(1)));
    }

    #[test]
    fn test_previous_inverts_next() {
        let mut nav = navigator();
        nav.go_to(1, Some(1));
        nav.previous();
        assert_eq!(nav.position(), Position::new(1, Some(0)));
    }

    #[test]
    fn test_go_to_out_of_range_is_noop() {
        let mut nav = navigator();
        nav.go_to(7, None);
        assert_eq!(nav.position(), Position::start());
        nav.go_to(1, Some(9));
        assert_eq!(nav.position(), Position::start());
        nav.go_to(0, Some(0));
        assert_eq!(nav.position(), Position::start());
    }

    #[test]
    fn test_scroll_update_keeps_section() {
        let mut nav = navigator();
        nav.go_to(1, Some(0));
        nav.set_subsection_from_scroll(1);
        assert_eq!(nav.position(), Position::new(1, Some(1)));
        nav.set_subsection_from_scroll(99);
        assert_eq!(nav.position(), Position::new(1, Some(1)));
    }

    #[test]
    fn test_scroll_update_on_plain_section_is_noop() {
        let mut nav = navigator();
        nav.set_subsection_from_scroll(0);
        assert_eq!(nav.position(), Position::start());
    }

    #[test]
    fn test_next_from_container_landing() {
        let mut nav = navigator();
        // Landing on a container-only section resolves to its first page,
        // so next() moves to the second subsection.
        nav.go_to(1, None);
        assert_eq!(nav.flat_index(), 1);
        nav.next();
        assert_eq!(nav.position(), Position::new(1, Some(1)));
    }
}
