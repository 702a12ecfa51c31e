//! Citation metrics and the zero-citation pairing step.

use crate::extractor::author::PublicationRecord;
use std::fmt;

pub fn publication_count(citations: &[u32]) -> usize {
    citations.len()
}

pub fn zero_citation_count(citations: &[u32]) -> usize {
    citations.iter().filter(|&&count| count == 0).count()
}

/// Largest `h` such that at least `h` publications have `h` or more citations.
pub fn hirsch_index(citations: &[u32]) -> usize {
    let mut sorted = citations.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    sorted
        .iter()
        .enumerate()
        .find(|&(rank, &count)| (count as usize) < rank + 1)
        .map(|(rank, _)| rank)
        .unwrap_or(sorted.len())
}

/// Lengths of the four positional lists when they disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub citations: usize,
    pub titles: usize,
    pub joint_authors: usize,
    pub venues: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} citation counts, {} titles, {} joint-author entries, {} venues",
            self.citations, self.titles, self.joint_authors, self.venues
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZeroCitationSelection {
    pub publications: Vec<PublicationRecord>,
    /// Set when the lists could not be paired; `publications` is then empty.
    pub mismatch: Option<LengthMismatch>,
}

pub fn select_zero_citation_publications(
    citations: &[u32],
    titles: &[String],
    joint_authors: &[String],
    venues: &[String],
) -> ZeroCitationSelection {
    let expected = titles.len();
    if citations.len() != expected || joint_authors.len() != expected || venues.len() != expected
    {
        return ZeroCitationSelection {
            publications: Vec::new(),
            mismatch: Some(LengthMismatch {
                citations: citations.len(),
                titles: titles.len(),
                joint_authors: joint_authors.len(),
                venues: venues.len(),
            }),
        };
    }

    let publications = citations
        .iter()
        .zip(titles)
        .zip(joint_authors)
        .zip(venues)
        .filter(|&(((&count, _), _), _)| count == 0)
        .map(|(((_, title), authors), venue)| {
            PublicationRecord::new(title.clone(), authors.clone(), venue.clone())
        })
        .collect();

    ZeroCitationSelection {
        publications,
        mismatch: None,
    }
}

/// A citation cell that did not hold a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCitation {
    pub position: usize,
    pub token: String,
}

pub fn parse_citation_counts(tokens: &[String]) -> Result<Vec<u32>, InvalidCitation> {
    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            token.trim().parse::<u32>().map_err(|_| InvalidCitation {
                position,
                token: token.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hirsch_index_known_values() {
        assert_eq!(hirsch_index(&[]), 0);
        assert_eq!(hirsch_index(&[5, 5, 5, 5, 5]), 5);
        assert_eq!(hirsch_index(&[10, 0, 0, 0, 0]), 1);
        assert_eq!(hirsch_index(&[0, 0, 0]), 0);
        assert_eq!(hirsch_index(&[3, 0, 6, 1, 5]), 3);
        assert_eq!(hirsch_index(&[100]), 1);
    }

    #[test]
    fn test_hirsch_index_is_bounded_by_publication_count() {
        let samples: [&[u32]; 6] = [
            &[],
            &[0],
            &[1, 1, 1],
            &[50, 40, 30],
            &[2, 2, 2, 2],
            &[9, 7, 6, 2, 1, 0, 0],
        ];

        for citations in samples {
            let h = hirsch_index(citations);
            assert!(h <= citations.len(), "h={} for {:?}", h, citations);
            let qualifying = citations.iter().filter(|&&c| c as usize >= h).count();
            assert!(qualifying >= h, "h={} for {:?}", h, citations);
        }
    }

    #[test]
    fn test_counts() {
        let citations = [0, 0, 3, 5, 0];
        assert_eq!(zero_citation_count(&citations), 3);
        assert_eq!(publication_count(&citations), 5);
    }

    #[test]
    fn test_selects_zero_citation_positions_in_order() {
        let selection = select_zero_citation_publications(
            &[3, 0, 0, 7],
            &strings(&["A", "B", "C", "D"]),
            &strings(&["a", "b", "c", "d"]),
            &strings(&["va", "vb", "vc", "vd"]),
        );

        assert!(selection.mismatch.is_none());
        assert_eq!(
            selection.publications,
            vec![
                PublicationRecord::new("B", "b", "vb"),
                PublicationRecord::new("C", "c", "vc"),
            ]
        );
    }

    #[test]
    fn test_mismatched_lengths_yield_empty_selection() {
        let selection = select_zero_citation_publications(
            &[0, 0, 1],
            &strings(&["A", "B", "C"]),
            &strings(&["a", "b"]),
            &strings(&["va", "vb", "vc"]),
        );

        assert!(selection.publications.is_empty());
        assert_eq!(
            selection.mismatch,
            Some(LengthMismatch {
                citations: 3,
                titles: 3,
                joint_authors: 2,
                venues: 3,
            })
        );
    }

    #[test]
    fn test_parse_citation_counts() {
        assert_eq!(
            parse_citation_counts(&strings(&["0", "12", " 3 "])).unwrap(),
            vec![0, 12, 3]
        );

        let err = parse_citation_counts(&strings(&["4", "n/a", "x"])).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.token, "n/a");
    }
}
