pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod report;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{
    CitationPolicy, CliOverrides, Config, InputConfig, OutputConfig, ParserConfig, ReportFormat,
};
pub use error::{ReportError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    AuthorPipeline, AuthorRecord, Diagnostic, DiagnosticKind, PipelineOutput, PipelineProgress,
    PublicationRecord,
};
pub use report::{ExtractionReport, ReportWriter};
pub use scanner::{ScanOutcome, Source, SourceScanner, SourceSet};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main library interface: scan inputs, extract authors, write the report.
pub struct ElibraryReport {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    print_authors: bool,
}

impl ElibraryReport {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            print_authors: false,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(
            Self::new(config, cli_args.output_mode(), cli_args.verbose, cli_args.quiet)
                .with_console_listing(cli_args.print),
        )
    }

    /// Also print the author summaries to the console after extraction.
    pub fn with_console_listing(mut self, print_authors: bool) -> Self {
        self.print_authors = print_authors;
        self
    }

    /// Expands the command-line inputs into the distinct profile sources.
    pub fn collect_sources(&self, inputs: &[PathBuf]) -> Result<SourceSet> {
        self.output_formatter.start_operation("Scanning input files");

        let spinner = self.progress_manager.create_spinner("Looking for profile pages...");
        let scanner = SourceScanner::new(&self.config.input);
        let outcome = scanner.collect(inputs);
        spinner.finish_and_clear();
        let outcome = outcome?;

        for scan_error in &outcome.scan_errors {
            warn!(error = %scan_error, "input scan problem");
            self.output_formatter.warning(scan_error);
        }

        if outcome.skipped_files > 0 {
            self.output_formatter.debug(&format!(
                "Skipped {} files above the size limit",
                outcome.skipped_files
            ));
        }

        info!(
            sources = outcome.sources.len(),
            skipped = outcome.skipped_files,
            "collected input sources"
        );
        self.output_formatter
            .info(&format!("Found {} profile pages", outcome.sources.len()));

        Ok(outcome.sources)
    }

    /// Runs the whole extraction for `inputs` and writes the report file.
    pub fn generate(&self, inputs: &[PathBuf]) -> Result<ExtractionReport> {
        let sources = self.collect_sources(inputs)?;
        let source_ids: Vec<String> = sources.iter().map(|s| s.id.clone()).collect();

        let output = self.extract_authors(sources)?;

        self.report_diagnostics(&output.diagnostics);

        if !output.has_reportable_content() {
            return Err(ReportError::NothingToReport);
        }

        if self.print_authors {
            self.output_formatter.print_authors(&output.authors);
        }

        let output_path = self.write_report(&output.authors)?;

        Ok(ExtractionReport::new(source_ids, output, Some(output_path)))
    }

    fn extract_authors(&self, sources: SourceSet) -> Result<PipelineOutput> {
        self.output_formatter.start_operation("Extracting author data");

        let start = Instant::now();
        let source_progress = self.progress_manager.create_source_progress(sources.len() as u64);
        let progress_callback = {
            let pb = source_progress.clone();
            move |progress: &PipelineProgress| {
                ui::progress::update_source_progress(&pb, progress);
            }
        };

        let pipeline = AuthorPipeline::new(&self.config.parser).with_sources(sources);
        let result = pipeline.run_with_progress(Some(&progress_callback));

        match result {
            Ok(output) => {
                ui::progress::finish_progress_with_summary(
                    &source_progress,
                    &format!("Extracted {} authors", output.authors.len()),
                    start.elapsed(),
                );
                info!(
                    authors = output.authors.len(),
                    diagnostics = output.diagnostics.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "extraction finished"
                );
                Ok(output)
            }
            Err(e) => {
                source_progress.abandon();
                Err(e)
            }
        }
    }

    fn report_diagnostics(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            if diagnostic.is_warning() {
                warn!(source = %diagnostic.source, "{}", diagnostic);
            } else {
                debug!(source = %diagnostic.source, "{}", diagnostic);
            }
        }

        self.output_formatter.print_diagnostics(diagnostics);
    }

    fn write_report(&self, authors: &[AuthorRecord]) -> Result<PathBuf> {
        let output = &self.config.output;
        let writer = ReportWriter::new(&output.directory, &output.file_name, output.format)
            .with_force_overwrite(output.overwrite);

        let path = writer.write(authors)?;

        info!(path = %path.display(), authors = authors.len(), "report written");
        self.output_formatter
            .success(&format!("Report written to {}", path.display()));

        Ok(path)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ReportError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function: extract `inputs` with default settings into `output_dir`.
pub fn generate_report_simple(inputs: &[PathBuf], output_dir: &Path) -> Result<ExtractionReport> {
    let mut config = Config::default();
    config.output.directory = output_dir.to_path_buf();

    ElibraryReport::new(config, OutputMode::Plain, 0, true).generate(inputs)
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
