use crate::error::{ReportError, Result};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub extensions: Vec<String>,
    pub max_file_size: u64,
    pub exclude_patterns: Vec<String>,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_name: String,
    pub format: ReportFormat,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParserConfig {
    pub on_invalid_citation: CitationPolicy,
}

/// File format of the written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Markdown document, one section per author
    #[default]
    Markdown,
    /// Plain text
    Text,
    /// JSON array of author records
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// What to do when a citation cell does not hold a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CitationPolicy {
    /// Drop the affected author and keep going
    #[default]
    SkipDocument,
    /// Stop the whole run
    AbortRun,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["html".to_string(), "htm".to_string()],
            max_file_size: 20 * 1024 * 1024, // 20MB
            exclude_patterns: vec![r"^~\$".to_string(), r"\.part$".to_string()],
            max_depth: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            file_name: "Output".to_string(),
            format: ReportFormat::Markdown,
            overwrite: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ReportError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ReportError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ReportError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["elibrary-report.toml", ".elibrary-report.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref directory) = cli_args.output_dir {
            self.output.directory = directory.clone();
        }

        if let Some(ref name) = cli_args.file_name {
            self.output.file_name = name.clone();
        }

        if let Some(format) = cli_args.format {
            self.output.format = format;
        }

        if cli_args.force {
            self.output.overwrite = true;
        }

        if let Some(policy) = cli_args.citation_policy {
            self.parser.on_invalid_citation = policy;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ReportError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ReportError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.extensions.is_empty() {
            return Err(ReportError::Config {
                message: "At least one input file extension must be specified".to_string(),
            });
        }

        if self.input.max_file_size == 0 {
            return Err(ReportError::Config {
                message: "Maximum file size must be greater than 0".to_string(),
            });
        }

        if self.input.max_depth == 0 {
            return Err(ReportError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        for pattern in &self.input.exclude_patterns {
            if let Err(e) = Regex::new(pattern) {
                return Err(ReportError::Config {
                    message: format!("Invalid exclude pattern {:?}: {}", pattern, e),
                });
            }
        }

        if let Some(parent) = self.output.directory.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ReportError::Config {
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub file_name: Option<String>,
    pub format: Option<ReportFormat>,
    pub force: bool,
    pub citation_policy: Option<CitationPolicy>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_file_name(mut self, name: Option<String>) -> Self {
        self.file_name = name;
        self
    }

    pub fn with_format(mut self, format: Option<ReportFormat>) -> Self {
        self.format = format;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_citation_policy(mut self, policy: Option<CitationPolicy>) -> Self {
        self.citation_policy = policy;
        self
    }
}
