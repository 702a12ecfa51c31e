use crate::config::{CitationPolicy, CliOverrides, Config, ReportFormat};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "elibrary-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarise elibrary.ru author profiles saved as HTML")]
#[command(
    long_about = "elibrary-report reads author profile pages saved from elibrary.ru, computes \
                  each author's Hirsch index, publication count and zero-citation count, and \
                  writes a report listing the publications nobody has cited yet."
)]
#[command(before_help = "📚 elibrary-report - Author Profile Summaries")]
#[command(after_help = "EXAMPLES:\n  \
    elibrary-report ivanov.html petrov.html\n  \
    elibrary-report profiles/ --output-dir reports --name faculty\n  \
    elibrary-report profiles/ --format json --on-invalid-citation abort-run\n  \
    elibrary-report ivanov.html --print --dry-run\n  \
    elibrary-report --generate-config --config elibrary-report.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Saved profile pages, or directories containing them
    #[arg(required_unless_present = "generate_config")]
    pub inputs: Vec<PathBuf>,

    /// Directory the report is written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Report file name without extension
    #[arg(short, long)]
    pub name: Option<String>,

    /// Report file format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Configuration file path
    #[arg(
        short,
        long,
        env = "ELIBRARY_REPORT_CONFIG",
        help = "Path to TOML configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Output format for console messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// What to do with a profile whose citation counts are not numbers
    #[arg(long, value_enum)]
    pub on_invalid_citation: Option<CitationPolicy>,

    /// Also print the author summaries to the console
    #[arg(long)]
    pub print: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite an existing report file
    #[arg(long, help = "Overwrite an existing report file")]
    pub force: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "List the profiles that would be read without writing a report")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_dir(self.output_dir.clone())
            .with_file_name(self.name.clone())
            .with_format(self.format)
            .with_force(self.force)
            .with_citation_policy(self.on_invalid_citation)
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
