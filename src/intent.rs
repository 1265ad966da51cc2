//! User intents emitted by front-ends toward the navigation core.

/// A navigation intent, as produced by panel clicks or key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Click on a section row.
    SelectSection(usize),
    /// Click on a subsection row.
    SelectSubsection { section: usize, subsection: usize },
    /// Advance one flat page (wraps past the end).
    Next,
    /// Step back one flat page (wraps past the start).
    Previous,
}

impl Intent {
    /// Whether this intent is a direct jump (as opposed to linear
    /// traversal).
    #[must_use]
    pub const fn is_jump(&self) -> bool {
        matches!(self, Self::SelectSection(_) | Self::SelectSubsection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_jump() {
        assert!(Intent::SelectSection(0).is_jump());
        assert!(Intent::SelectSubsection { section: 1, subsection: 0 }.is_jump());
        assert!(!Intent::Next.is_jump());
        assert!(!Intent::Previous.is_jump());
    }
}
