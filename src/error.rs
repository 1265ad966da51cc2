//! Error types for lectern.

use std::fmt;

/// Result type alias for lectern operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for outline construction.
///
/// Navigation itself never fails: runtime operations degrade to
/// "no navigation change" instead of surfacing errors. The only
/// fallible surface is building the [`Outline`](crate::Outline).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The outline has no sections.
    EmptyOutline,
    /// A subsection id is reused somewhere else in the document.
    ///
    /// Subsection ids double as scroll-anchor and fragment values, so
    /// they must be unique document-wide, not just within a section.
    DuplicateAnchor {
        id: String,
        first_section: usize,
        second_section: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOutline => write!(f, "outline has no sections"),
            Self::DuplicateAnchor {
                id,
                first_section,
                second_section,
            } => {
                write!(
                    f,
                    "anchor id {id:?} appears in both section {first_section} and section {second_section}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyOutline;
        assert!(err.to_string().contains("no sections"));

        let err = Error::DuplicateAnchor {
            id: "intro".to_string(),
            first_section: 0,
            second_section: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"intro\""));
        assert!(msg.contains("section 0"));
        assert!(msg.contains("section 3"));
    }
}
