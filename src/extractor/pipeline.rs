//! Per-document extraction and the run over all sources.

use crate::config::{CitationPolicy, ParserConfig};
use crate::error::{ReportError, Result};
use crate::extractor::author::AuthorRecord;
use crate::extractor::diagnostics::{Diagnostic, DiagnosticKind};
use crate::extractor::html::{self, FALLBACK_AFFILIATION, FALLBACK_DISPLAY_NAME};
use crate::extractor::metrics::{self, InvalidCitation};
use crate::scanner::{Source, SourceSet};
use scraper::Html;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The raw positional lists of one document, before any pairing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawExtraction {
    pub display_name: Option<String>,
    pub affiliation: Option<String>,
    pub titles: Vec<String>,
    pub joint_authors: Vec<String>,
    pub venues: Vec<String>,
    pub citation_tokens: Vec<String>,
}

impl RawExtraction {
    pub fn from_document(doc: &Html) -> Self {
        let rows = html::extract_table_rows(doc);

        Self {
            display_name: html::find_display_name(doc),
            affiliation: html::find_affiliation(doc),
            titles: html::extract_titles(&rows),
            joint_authors: html::extract_joint_authors(&rows),
            venues: html::extract_venues(&rows),
            citation_tokens: html::extract_citation_counts(&rows),
        }
    }
}

/// Result of processing a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub author: AuthorRecord,
    pub diagnostics: Vec<DiagnosticKind>,
}

/// Turns one parsed profile into an author record.
///
/// Fails only when a citation cell is not a number; deciding what that means
/// for the run is left to the caller.
pub fn process_document(
    source: &str,
    doc: &Html,
) -> std::result::Result<DocumentOutcome, InvalidCitation> {
    let raw = RawExtraction::from_document(doc);
    let mut diagnostics = Vec::new();

    let citations = metrics::parse_citation_counts(&raw.citation_tokens)?;

    let display_name = raw.display_name.unwrap_or_else(|| {
        diagnostics.push(DiagnosticKind::MissingDisplayName);
        FALLBACK_DISPLAY_NAME.to_string()
    });
    let affiliation = raw.affiliation.unwrap_or_else(|| {
        diagnostics.push(DiagnosticKind::MissingAffiliation);
        FALLBACK_AFFILIATION.to_string()
    });

    let selection = metrics::select_zero_citation_publications(
        &citations,
        &raw.titles,
        &raw.joint_authors,
        &raw.venues,
    );
    if let Some(mismatch) = selection.mismatch {
        diagnostics.push(mismatch.into());
    }

    Ok(DocumentOutcome {
        author: AuthorRecord::new(
            source,
            display_name,
            affiliation,
            citations,
            selection.publications,
        ),
        diagnostics,
    })
}

#[derive(Debug, Clone)]
pub struct PipelineProgress {
    pub sources_processed: usize,
    pub total_sources: usize,
    pub current_source: Option<String>,
    pub start_time: Instant,
    pub diagnostics: usize,
}

impl PipelineProgress {
    pub fn new(total_sources: usize) -> Self {
        Self {
            sources_processed: 0,
            total_sources,
            current_source: None,
            start_time: Instant::now(),
            diagnostics: 0,
        }
    }

    pub fn update_source(&mut self, source: &str, diagnostics: usize) {
        self.sources_processed += 1;
        self.diagnostics += diagnostics;
        self.current_source = Some(source.to_string());
    }

    pub fn percentage(&self) -> f64 {
        if self.total_sources == 0 {
            0.0
        } else {
            (self.sources_processed as f64 / self.total_sources as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        if self.sources_processed == 0 {
            return Duration::from_secs(0);
        }

        let rate = self.sources_processed as f64 / self.elapsed().as_secs_f64();
        let remaining = self.total_sources.saturating_sub(self.sources_processed);

        if rate.is_finite() && rate > 0.0 {
            Duration::from_secs_f64(remaining as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// One record per distinct source that produced one, in source order.
    pub authors: Vec<AuthorRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PipelineOutput {
    pub fn has_reportable_content(&self) -> bool {
        self.authors.iter().any(|author| !author.is_blank())
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

pub struct AuthorPipeline {
    sources: SourceSet,
    citation_policy: CitationPolicy,
}

// Per-source step result: a record (or none when skipped) plus diagnostics.
type SourceResult = std::result::Result<(Option<AuthorRecord>, Vec<Diagnostic>), ReportError>;

impl AuthorPipeline {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            sources: SourceSet::new(),
            citation_policy: config.on_invalid_citation,
        }
    }

    pub fn with_sources(mut self, sources: SourceSet) -> Self {
        self.sources = sources;
        self
    }

    /// Returns `false` if the source was already added.
    pub fn add_source<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.sources.add(path)
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn run(&self) -> Result<PipelineOutput> {
        self.run_with_progress(None)
    }

    pub fn run_with_progress(
        &self,
        progress_callback: Option<&dyn Fn(&PipelineProgress)>,
    ) -> Result<PipelineOutput> {
        let mut progress = PipelineProgress::new(self.sources.len());
        let mut output = PipelineOutput::default();

        for result in self.process_all() {
            let (author, diagnostics) = result?;

            if let Some(callback) = progress_callback {
                let current = author
                    .as_ref()
                    .map(|a| a.source().to_string())
                    .or_else(|| diagnostics.first().map(|d| d.source.clone()))
                    .unwrap_or_default();
                progress.update_source(&current, diagnostics.len());
                callback(&progress);
            }

            output.authors.extend(author);
            output.diagnostics.extend(diagnostics);
        }

        Ok(output)
    }

    #[cfg(not(feature = "parallel"))]
    fn process_all(&self) -> impl Iterator<Item = SourceResult> + '_ {
        self.sources.iter().map(move |source| self.process_source(source))
    }

    #[cfg(feature = "parallel")]
    fn process_all(&self) -> impl Iterator<Item = SourceResult> + '_ {
        let results: Vec<SourceResult> = self
            .sources
            .as_slice()
            .par_iter()
            .map(|source| self.process_source(source))
            .collect();
        results.into_iter()
    }

    fn process_source(&self, source: &Source) -> SourceResult {
        let mut diagnostics = Vec::new();

        let markup = match fs::read(&source.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    &source.id,
                    DiagnosticKind::UnreadableSource {
                        message: err.to_string(),
                    },
                ));
                String::new()
            }
        };

        let doc = html::parse_document(&markup);

        match process_document(&source.id, &doc) {
            Ok(outcome) => {
                diagnostics.extend(
                    outcome
                        .diagnostics
                        .into_iter()
                        .map(|kind| Diagnostic::new(&source.id, kind)),
                );
                Ok((Some(outcome.author), diagnostics))
            }
            Err(invalid) => match self.citation_policy {
                CitationPolicy::AbortRun => Err(ReportError::InvalidCitation {
                    source_id: source.id.clone(),
                    token: invalid.token,
                }),
                CitationPolicy::SkipDocument => {
                    diagnostics.push(Diagnostic::new(
                        &source.id,
                        DiagnosticKind::InvalidCitation {
                            position: invalid.position,
                            token: invalid.token,
                        },
                    ));
                    Ok((None, diagnostics))
                }
            },
        }
    }
}
