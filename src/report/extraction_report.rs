use crate::extractor::{AuthorRecord, Diagnostic, PipelineOutput};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one run, as handed back to the command line.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub authors: Vec<AuthorRecord>,
    pub sources: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// `None` when the report was only printed.
    pub output_path: Option<PathBuf>,
    pub generated_at: DateTime<Utc>,
}

impl ExtractionReport {
    pub fn new(sources: Vec<String>, output: PipelineOutput, output_path: Option<PathBuf>) -> Self {
        Self {
            authors: output.authors,
            sources,
            diagnostics: output.diagnostics,
            output_path,
            generated_at: Utc::now(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_warning)
    }

    pub fn total_zero_citation_publications(&self) -> usize {
        self.authors.iter().map(|a| a.publications().len()).sum()
    }
}
