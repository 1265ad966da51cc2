//! Deep-link adapter: bidirectional sync between the address fragment and
//! the current position, scoped to subsections.
//!
//! The address bar and the scroll surface live outside this core, so both
//! are reached through the [`FragmentHost`] trait. Selecting a subsection of
//! the *active* section writes its id to the fragment and scrolls its anchor
//! into view; selecting one in a *different* section is a plain jump (the
//! destination section is about to be freshly rendered, so there is nothing
//! to scroll). Applying a fragment resolves it against the outline's
//! document-wide anchor ids, which are unique by construction.

use crate::event::{emit_event, names};
use crate::position::Navigator;

/// Host-environment surface for the address fragment and anchor scrolling.
pub trait FragmentHost {
    /// Current fragment value, without any leading separator.
    fn fragment(&self) -> Option<String>;

    /// Replace the fragment.
    fn set_fragment(&mut self, fragment: &str);

    /// Scroll the anchor with this id into view (smooth, aligned to top).
    ///
    /// Returns false when no such anchor is mounted; callers treat that as
    /// a silent no-op, since the element may simply not be rendered yet.
    fn scroll_to_anchor(&mut self, id: &str) -> bool;
}

/// In-memory host for tests and headless embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    fragment: Option<String>,
    mounted: Vec<String>,
    last_scroll: Option<String>,
}

impl MemoryHost {
    /// Create an empty host with no fragment and no mounted anchors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host whose fragment is already set, as on a deep-linked
    /// page load.
    #[must_use]
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            mounted: Vec::new(),
            last_scroll: None,
        }
    }

    /// Mark an anchor as mounted in the rendered tree.
    pub fn mount_anchor(&mut self, id: impl Into<String>) {
        self.mounted.push(id.into());
    }

    /// Unmount all anchors (a fresh section render).
    pub fn clear_anchors(&mut self) {
        self.mounted.clear();
    }

    /// The last anchor scrolled to, if any.
    #[must_use]
    pub fn last_scroll(&self) -> Option<&str> {
        self.last_scroll.as_deref()
    }
}

impl FragmentHost for MemoryHost {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
    }

    fn scroll_to_anchor(&mut self, id: &str) -> bool {
        if self.mounted.iter().any(|m| m == id) {
            self.last_scroll = Some(id.to_string());
            true
        } else {
            false
        }
    }
}

/// Select a subsection on the user's behalf.
///
/// For a subsection of the currently active section this writes the
/// fragment, scrolls to its anchor, and updates the position immediately so
/// the panel highlight does not wait for the scroll observer to catch up.
/// For a subsection of a different section it is a plain
/// [`Navigator::go_to`]. Out-of-range indices are ignored.
pub fn select_subsection<H: FragmentHost>(
    nav: &mut Navigator,
    host: &mut H,
    section: usize,
    subsection: usize,
) {
    let Some(id) = nav
        .outline()
        .section(section)
        .and_then(|s| s.subsections().get(subsection))
        .map(|sub| sub.id().to_string())
    else {
        return;
    };

    let same_section = nav.position().section == section;
    nav.go_to(section, Some(subsection));
    if same_section {
        host.set_fragment(&id);
        // Missing anchor means the element is not mounted yet; not an error.
        let _ = host.scroll_to_anchor(&id);
        emit_event(names::FRAGMENT, &format!("write id={id}"));
    }
}

/// Apply the host's current fragment, as on load or an external fragment
/// change.
///
/// When the fragment matches a known subsection id the anchor is scrolled
/// into view and the position jumps to match. Unknown or absent fragments
/// are silently ignored. Returns whether navigation occurred.
pub fn apply_fragment<H: FragmentHost>(nav: &mut Navigator, host: &mut H) -> bool {
    let Some(fragment) = host.fragment() else {
        return false;
    };
    let Some((section, subsection)) = nav.outline().resolve_anchor(&fragment) else {
        return false;
    };
    let _ = host.scroll_to_anchor(&fragment);
    nav.go_to(section, Some(subsection));
    emit_event(names::FRAGMENT, &format!("apply id={fragment}"));
    true
}
