//! Flattening of the two-level outline into one traversable page sequence.
//!
//! Flattening is pure and deterministic: walking sections in document order,
//! a section's own landing content (if present) is emitted before its
//! subsections. [`FlatIndex`] caches the result and answers position lookups
//! in both directions.

use crate::outline::{Outline, Payload, Subsection};
use crate::position::Position;

/// One linearized, traversable unit of the document.
///
/// A flat page is either a section's landing content
/// (`subsection == None`) or one of its subsections. Titles and payloads
/// are resolved through the outline rather than duplicated here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatPage {
    /// Index of the owning section in the outline.
    pub section: usize,
    /// Index of the subsection within the section, or `None` for the
    /// section's own landing page.
    pub subsection: Option<usize>,
}

impl FlatPage {
    /// The position this page corresponds to.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position {
            section: self.section,
            subsection: self.subsection,
        }
    }

    /// Display title of the page.
    ///
    /// Falls back to the empty string if the page indices do not exist in
    /// `outline`; pages produced by [`flatten`] always resolve.
    #[must_use]
    pub fn title<'a>(&self, outline: &'a Outline) -> &'a str {
        let Some(section) = outline.section(self.section) else {
            return "";
        };
        match self.subsection {
            Some(i) => section.subsections().get(i).map_or("", |s| s.title()),
            None => section.title(),
        }
    }

    /// Content payload of the page, if the indices resolve.
    #[must_use]
    pub fn payload<'a>(&self, outline: &'a Outline) -> Option<&'a Payload> {
        let section = outline.section(self.section)?;
        match self.subsection {
            Some(i) => section.subsections().get(i).map(Subsection::content),
            None => section.content(),
        }
    }
}

/// Flatten an outline into its ordered page list.
#[must_use]
pub fn flatten(outline: &Outline) -> Vec<FlatPage> {
    let mut pages = Vec::new();
    for (si, section) in outline.sections().iter().enumerate() {
        if section.content().is_some() {
            pages.push(FlatPage {
                section: si,
                subsection: None,
            });
        }
        for ssi in 0..section.subsections().len() {
            pages.push(FlatPage {
                section: si,
                subsection: Some(ssi),
            });
        }
    }
    pages
}

/// Cached flattening of an outline with lookups in both directions.
#[derive(Clone, Debug)]
pub struct FlatIndex {
    pages: Vec<FlatPage>,
    /// First page index of each section, used for the landing-page
    /// fallback in [`FlatIndex::index_of`].
    section_starts: Vec<Option<usize>>,
}

impl FlatIndex {
    /// Flatten `outline` and build the index.
    #[must_use]
    pub fn new(outline: &Outline) -> Self {
        let pages = flatten(outline);
        let mut section_starts = vec![None; outline.len()];
        for (i, page) in pages.iter().enumerate() {
            let slot = &mut section_starts[page.section];
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        Self {
            pages,
            section_starts,
        }
    }

    /// Number of flat pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether there are no pages. Never true for a validated outline with
    /// at least one content-carrying section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages in document order.
    #[must_use]
    pub fn pages(&self) -> &[FlatPage] {
        &self.pages
    }

    /// Page at flat index `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&FlatPage> {
        self.pages.get(i)
    }

    /// Flat index of `position`.
    ///
    /// For a valid position this never returns `None`. A landing position
    /// (`subsection == None`) on a container-only section has no page of its
    /// own; it maps to the section's first page so every reachable position
    /// resolves.
    #[must_use]
    pub fn index_of(&self, position: Position) -> Option<usize> {
        let exact = self.pages.iter().position(|page| {
            page.section == position.section && page.subsection == position.subsection
        });
        if exact.is_some() {
            return exact;
        }
        if position.subsection.is_none() {
            return self.section_starts.get(position.section).copied().flatten();
        }
        None
    }

    /// Position corresponding to flat index `i`.
    #[must_use]
    pub fn position_of(&self, i: usize) -> Option<Position> {
        self.pages.get(i).map(FlatPage::position)
    }
}
