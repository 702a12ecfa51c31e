use crate::extractor::html::{FALLBACK_AFFILIATION, FALLBACK_DISPLAY_NAME};
use crate::extractor::metrics;
use serde::Serialize;

/// A publication that has not been cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRecord {
    pub title: String,
    pub joint_authors: String,
    pub venue: String,
}

impl PublicationRecord {
    pub fn new(
        title: impl Into<String>,
        joint_authors: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            joint_authors: joint_authors.into(),
            venue: venue.into(),
        }
    }
}

/// Everything reported for one profile export.
///
/// Metrics are derived from `citation_counts` when the record is built and the
/// record cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    source: String,
    display_name: String,
    affiliation: String,
    citation_counts: Vec<u32>,
    publications: Vec<PublicationRecord>,
    hirsch_index: usize,
    publication_count: usize,
    zero_citation_count: usize,
}

impl AuthorRecord {
    /// `publications` must already be the zero-citation subset of the profile,
    /// in profile order; see [`metrics::select_zero_citation_publications`].
    pub fn new(
        source: impl Into<String>,
        display_name: impl Into<String>,
        affiliation: impl Into<String>,
        citation_counts: Vec<u32>,
        publications: Vec<PublicationRecord>,
    ) -> Self {
        let hirsch_index = metrics::hirsch_index(&citation_counts);
        let publication_count = metrics::publication_count(&citation_counts);
        let zero_citation_count = metrics::zero_citation_count(&citation_counts);

        Self {
            source: source.into(),
            display_name: display_name.into(),
            affiliation: affiliation.into(),
            citation_counts,
            publications,
            hirsch_index,
            publication_count,
            zero_citation_count,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn affiliation(&self) -> &str {
        &self.affiliation
    }

    pub fn citation_counts(&self) -> &[u32] {
        &self.citation_counts
    }

    pub fn publications(&self) -> &[PublicationRecord] {
        &self.publications
    }

    pub fn hirsch_index(&self) -> usize {
        self.hirsch_index
    }

    pub fn publication_count(&self) -> usize {
        self.publication_count
    }

    pub fn zero_citation_count(&self) -> usize {
        self.zero_citation_count
    }

    /// True when nothing at all was found: both scalars fell back and there
    /// are no citation rows.
    pub fn is_blank(&self) -> bool {
        self.display_name == FALLBACK_DISPLAY_NAME
            && self.affiliation == FALLBACK_AFFILIATION
            && self.citation_counts.is_empty()
    }
}
