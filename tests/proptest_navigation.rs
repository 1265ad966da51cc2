//! Property-based tests for the flattener and position controller.
//!
//! Uses proptest to verify the structural laws: flatten length, index
//! round-trips, cyclic closure of next(), previous() as its inverse, and
//! scroll updates never moving the section component.

use lectern::{FlatIndex, Navigator, Outline, Section, Subsection, flatten};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Shape of one generated section: (has landing content, subsection count).
type SectionShape = (bool, usize);

fn outline_strategy() -> impl Strategy<Value = Outline> {
    prop::collection::vec((any::<bool>(), 0usize..5), 1..6).prop_map(build_outline)
}

/// Like `outline_strategy`, but guaranteed to flatten to at least one page.
fn nonempty_outline_strategy() -> impl Strategy<Value = Outline> {
    outline_strategy().prop_filter("outline must have at least one page", |outline| {
        !flatten(outline).is_empty()
    })
}

fn build_outline(shapes: Vec<SectionShape>) -> Outline {
    let mut sections = Vec::new();
    for (si, (has_content, sub_count)) in shapes.into_iter().enumerate() {
        let mut section = Section::new(format!("s{si}"), format!("Section {si}"));
        if has_content {
            section = section.with_content(format!("landing {si}"));
        }
        for ssi in 0..sub_count {
            section = section.with_subsection(Subsection::new(
                format!("s{si}-{ssi}"),
                format!("Sub {si}.{ssi}"),
                format!("body {si}.{ssi}"),
            ));
        }
        sections.push(section);
    }
    Outline::new(sections).expect("generated ids are unique")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Flatten length equals the per-section sum of landing pages and
    /// subsections.
    #[test]
    fn flatten_length_formula(outline in outline_strategy()) {
        let expected: usize = outline
            .sections()
            .iter()
            .map(|s| usize::from(s.content().is_some()) + s.subsections().len())
            .sum();
        prop_assert_eq!(flatten(&outline).len(), expected);
    }

    /// Every flat page's position maps back to its own unique index.
    #[test]
    fn index_of_roundtrip(outline in outline_strategy()) {
        let index = FlatIndex::new(&outline);
        for (i, page) in index.pages().iter().enumerate() {
            prop_assert_eq!(index.index_of(page.position()), Some(i));
            prop_assert_eq!(index.position_of(i), Some(page.position()));
        }
    }

    /// Flattening preserves document order: section indices are
    /// non-decreasing, subsection indices increase within a section, and a
    /// landing page precedes its section's subsections.
    #[test]
    fn flatten_preserves_order(outline in outline_strategy()) {
        let pages = flatten(&outline);
        for pair in pages.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.section <= b.section);
            if a.section == b.section {
                match (a.subsection, b.subsection) {
                    (None, Some(_)) => {}
                    (Some(x), Some(y)) => prop_assert!(x < y),
                    _ => prop_assert!(false, "landing page after subsection"),
                }
            }
        }
    }

    /// next() composed page-count times returns to the starting position.
    #[test]
    fn next_is_cyclic(outline in nonempty_outline_strategy(), seed in any::<prop::sample::Index>()) {
        let index = FlatIndex::new(&outline);
        let start = index.pages()[seed.index(index.len())].position();

        let mut nav = Navigator::new(outline);
        nav.go_to(start.section, start.subsection);
        for _ in 0..index.len() {
            nav.next();
        }
        prop_assert_eq!(nav.position(), start);
    }

    /// previous() undoes next() from any page position.
    #[test]
    fn previous_inverts_next(outline in nonempty_outline_strategy(), seed in any::<prop::sample::Index>()) {
        let index = FlatIndex::new(&outline);
        let start = index.pages()[seed.index(index.len())].position();

        let mut nav = Navigator::new(outline);
        nav.go_to(start.section, start.subsection);
        nav.next();
        nav.previous();
        prop_assert_eq!(nav.position(), start);
    }

    /// Scroll updates can move the subsection component only.
    #[test]
    fn scroll_never_changes_section(
        outline in nonempty_outline_strategy(),
        seed in any::<prop::sample::Index>(),
        scroll_target in 0usize..16,
    ) {
        let index = FlatIndex::new(&outline);
        let start = index.pages()[seed.index(index.len())].position();

        let mut nav = Navigator::new(outline);
        nav.go_to(start.section, start.subsection);
        nav.set_subsection_from_scroll(scroll_target);
        prop_assert_eq!(nav.position().section, start.section);
    }

    /// go_to with indices taken from the outline always lands exactly
    /// there; anything out of range leaves the position untouched.
    #[test]
    fn go_to_is_exact_or_noop(
        outline in outline_strategy(),
        section in 0usize..8,
        subsection in prop::option::of(0usize..8),
    ) {
        let mut nav = Navigator::new(outline);
        let before = nav.position();
        nav.go_to(section, subsection);

        let in_range = nav
            .outline()
            .section(section)
            .is_some_and(|s| subsection.is_none_or(|ssi| ssi < s.subsections().len()));
        if in_range {
            prop_assert_eq!(nav.position().section, section);
            prop_assert_eq!(nav.position().subsection, subsection);
        } else {
            prop_assert_eq!(nav.position(), before);
        }
    }
}
