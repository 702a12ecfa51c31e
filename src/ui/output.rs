use crate::error::{ReportError, UserFriendlyError};
use crate::extractor::{AuthorRecord, Diagnostic};
use crate::report::ExtractionReport;
use crate::scanner::Source;
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &ReportError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// Shows diagnostics that leave data out of the report; the purely
    /// informational ones only with `-v`.
    pub fn print_diagnostics(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            if self.mode == OutputMode::Json {
                self.print_json_object(&serde_json::json!({
                    "type": "diagnostic",
                    "warning": diagnostic.is_warning(),
                    "diagnostic": diagnostic
                }));
            } else if diagnostic.is_warning() {
                self.warning(&diagnostic.to_string());
            } else {
                self.info(&diagnostic.to_string());
            }
        }
    }

    /// Console rendering of the author records, independent of the report file.
    pub fn print_authors(&self, authors: &[AuthorRecord]) {
        if self.mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::to_string_pretty(authors).unwrap_or_else(|_| "[]".to_string())
            );
            return;
        }

        if authors.is_empty() {
            println!("No authors were added");
            return;
        }

        for author in authors {
            if self.use_colors {
                println!("{}", style(author.display_name()).bold());
                println!("{}", style(author.affiliation()).italic());
            } else {
                println!("{}", author.display_name());
                println!("{}", author.affiliation());
            }
            println!("Индекс Хирша: {}", author.hirsch_index());
            println!("Количество статей: {}", author.publication_count());
            println!(
                "Количество статей с нулевым цитированием: {}",
                author.zero_citation_count()
            );

            for publication in author.publications() {
                println!("  {}", publication.title);
                println!("  {}", publication.joint_authors);
                println!("  {}", publication.venue);
            }
            self.print_separator();
        }
    }

    pub fn print_source_list(&self, sources: &[Source]) {
        match self.mode {
            OutputMode::Json => {
                let ids: Vec<_> = sources.iter().map(|s| s.id.as_str()).collect();
                self.print_json_object(&serde_json::json!({
                    "type": "sources",
                    "sources": ids
                }));
            }
            _ => {
                for source in sources {
                    println!("  {}", source.id);
                }
            }
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport, duration: Duration) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_report(report, duration);
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                if !self.quiet {
                    self.print_plain_report(report, duration);
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_separator(&self) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn highlight(&self, value: String) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value
        }
    }

    fn print_human_report(&self, report: &ExtractionReport, duration: Duration) {
        println!();
        self.print_separator();

        if self.use_colors {
            println!("{} {}", style("Report completed!").green().bold(), CHECKMARK);
        } else {
            println!("✓ Report completed!");
        }

        println!();
        println!(
            "  Profiles read:        {}",
            self.highlight(report.sources.len().to_string())
        );
        println!(
            "  Authors reported:     {}",
            self.highlight(report.authors.len().to_string())
        );
        println!(
            "  Uncited publications: {}",
            self.highlight(report.total_zero_citation_publications().to_string())
        );
        println!(
            "  Time taken:           {}",
            self.highlight(format_duration(duration))
        );

        if let Some(ref path) = report.output_path {
            println!("  Written to:           {}", self.highlight(path.display().to_string()));
        }

        let warnings = report.diagnostics.iter().filter(|d| d.is_warning()).count();
        if warnings > 0 {
            println!("  Warnings:             {}", warnings);
        }

        self.print_separator();
    }

    fn print_plain_report(&self, report: &ExtractionReport, duration: Duration) {
        println!("COMPLETED: Report");
        println!("Profiles: {}", report.sources.len());
        println!("Authors: {}", report.authors.len());
        println!(
            "Uncited publications: {}",
            report.total_zero_citation_publications()
        );
        println!("Duration: {:?}", duration);
        if let Some(ref path) = report.output_path {
            println!("Output: {}", path.display());
        }
        if !report.diagnostics.is_empty() {
            println!("Diagnostics: {}", report.diagnostics.len());
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}
