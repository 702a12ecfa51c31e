use crate::extractor::metrics::LengthMismatch;
use serde::Serialize;
use std::fmt;

/// A recoverable problem found while processing one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub source: String,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnreadableSource {
        message: String,
    },
    MissingDisplayName,
    MissingAffiliation,
    LengthMismatch {
        citations: usize,
        titles: usize,
        joint_authors: usize,
        venues: usize,
    },
    InvalidCitation {
        position: usize,
        token: String,
    },
}

impl Diagnostic {
    pub fn new(source: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            source: source.into(),
            kind,
        }
    }

    /// Conditions that leave an author without publication detail or drop
    /// the author entirely.
    pub fn is_warning(&self) -> bool {
        !matches!(
            self.kind,
            DiagnosticKind::MissingDisplayName | DiagnosticKind::MissingAffiliation
        )
    }
}

impl From<LengthMismatch> for DiagnosticKind {
    fn from(mismatch: LengthMismatch) -> Self {
        DiagnosticKind::LengthMismatch {
            citations: mismatch.citations,
            titles: mismatch.titles,
            joint_authors: mismatch.joint_authors,
            venues: mismatch.venues,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.source)?;
        match &self.kind {
            DiagnosticKind::UnreadableSource { message } => {
                write!(f, "could not read file ({})", message)
            }
            DiagnosticKind::MissingDisplayName => write!(f, "author name not found"),
            DiagnosticKind::MissingAffiliation => write!(f, "affiliation not found"),
            DiagnosticKind::LengthMismatch {
                citations,
                titles,
                joint_authors,
                venues,
            } => write!(
                f,
                "publication lists do not line up ({} citation counts, {} titles, {} joint-author entries, {} venues); zero-citation publications omitted",
                citations, titles, joint_authors, venues
            ),
            DiagnosticKind::InvalidCitation { position, token } => write!(
                f,
                "citation count {:?} in row {} is not a number; author skipped",
                token,
                position + 1
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_source() {
        let diagnostic = Diagnostic::new("ivanov.html", DiagnosticKind::MissingAffiliation);
        assert_eq!(diagnostic.to_string(), "ivanov.html: affiliation not found");
        assert!(!diagnostic.is_warning());
    }

    #[test]
    fn test_length_mismatch_conversion() {
        let kind = DiagnosticKind::from(LengthMismatch {
            citations: 4,
            titles: 3,
            joint_authors: 3,
            venues: 3,
        });
        let diagnostic = Diagnostic::new("a.html", kind);

        assert!(diagnostic.is_warning());
        assert!(diagnostic.to_string().contains("4 citation counts, 3 titles"));
    }

    #[test]
    fn test_invalid_citation_row_is_one_based() {
        let diagnostic = Diagnostic::new(
            "a.html",
            DiagnosticKind::InvalidCitation {
                position: 0,
                token: "—".to_string(),
            },
        );
        assert!(diagnostic.to_string().contains("row 1"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let diagnostic = Diagnostic::new(
            "a.html",
            DiagnosticKind::UnreadableSource {
                message: "denied".to_string(),
            },
        );
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"]["kind"], "unreadable_source");
        assert_eq!(json["source"], "a.html");
    }
}
