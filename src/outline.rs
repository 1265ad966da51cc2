//! Document outline: sections, subsections, and opaque content payloads.
//!
//! The outline is constructed once at startup and is immutable for the
//! session. Construction validates the two structural rules everything
//! downstream relies on: the outline is non-empty, and subsection ids are
//! unique document-wide (they double as scroll-anchor identifiers and
//! address-fragment values).

use std::collections::HashMap;

use crate::error::{Error, Result};

/// An opaque renderable unit supplied by content collaborators.
///
/// The navigation core never inspects or transforms payloads; it only hands
/// them to presenters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payload(String);

impl Payload {
    /// Create a payload from renderable text.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// Borrow the raw content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the payload, returning the raw content.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A child unit of a section, always carrying content.
///
/// The id doubles as the subsection's scroll-anchor identifier and its
/// address-fragment value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subsection {
    id: String,
    title: String,
    content: Payload,
}

impl Subsection {
    /// Create a subsection.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<Payload>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Stable identifier (anchor id / fragment value).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Content payload.
    #[must_use]
    pub fn content(&self) -> &Payload {
        &self.content
    }
}

/// A top-level document chapter.
///
/// A section either carries its own landing content, or is purely a
/// container for subsections, or both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    id: String,
    title: String,
    content: Option<Payload>,
    subsections: Vec<Subsection>,
}

impl Section {
    /// Create a section with no content and no subsections.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: None,
            subsections: Vec::new(),
        }
    }

    /// Attach landing content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<Payload>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append a subsection.
    #[must_use]
    pub fn with_subsection(mut self, subsection: Subsection) -> Self {
        self.subsections.push(subsection);
        self
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Landing content, if the section has its own page.
    #[must_use]
    pub fn content(&self) -> Option<&Payload> {
        self.content.as_ref()
    }

    /// Ordered subsections.
    #[must_use]
    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }

    /// Whether the section has any subsections.
    #[must_use]
    pub fn has_subsections(&self) -> bool {
        !self.subsections.is_empty()
    }
}

/// The validated, immutable document outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outline {
    sections: Vec<Section>,
}

impl Outline {
    /// Build an outline, validating structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOutline`] when `sections` is empty, and
    /// [`Error::DuplicateAnchor`] when a subsection id appears more than
    /// once anywhere in the document.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::EmptyOutline);
        }
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (section_index, section) in sections.iter().enumerate() {
            for subsection in &section.subsections {
                if let Some(&first) = seen.get(subsection.id.as_str()) {
                    return Err(Error::DuplicateAnchor {
                        id: subsection.id.clone(),
                        first_section: first,
                        second_section: section_index,
                    });
                }
                seen.insert(subsection.id.as_str(), section_index);
            }
        }
        Ok(Self { sections })
    }

    /// All sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section at `index`, if in range.
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Number of sections. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false for a constructed outline; present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Resolve an anchor id to its `(section, subsection)` indices.
    ///
    /// Ids are unique document-wide (enforced at construction), so the
    /// lookup is unambiguous.
    #[must_use]
    pub fn resolve_anchor(&self, id: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section
                .subsections
                .iter()
                .position(|sub| sub.id == id)
                .map(|ssi| (si, ssi))
        })
    }
}
