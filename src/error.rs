use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("No input sources found")]
    NoSourcesFound { searched_extensions: Vec<String> },

    #[error("Non-numeric citation count {token:?} in {source_id}")]
    InvalidCitation { source_id: String, token: String },

    #[error("Nothing to report: no author data could be extracted")]
    NothingToReport,

    #[error("Report is empty and was not written: {path}")]
    EmptyReport { path: String },

    #[error("Output file already exists: {path}")]
    OutputFileExists { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Failed to serialize report: {message}")]
    Serialization { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ReportError {
    fn user_message(&self) -> String {
        match self {
            ReportError::NoSourcesFound { searched_extensions } => {
                format!(
                    "No profile exports found with extensions: {}",
                    searched_extensions.join(", ")
                )
            }
            ReportError::InvalidCitation { source_id, token } => {
                format!(
                    "Citation count {:?} in {} is not a number",
                    token, source_id
                )
            }
            ReportError::NothingToReport => {
                "None of the input files contained author data".to_string()
            }
            ReportError::EmptyReport { path } => {
                format!("Refusing to write an empty report: {}", path)
            }
            ReportError::OutputFileExists { path } => {
                format!("Output file already exists: {}", path)
            }
            ReportError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ReportError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ReportError::NoSourcesFound { .. } => Some(
                "Pass one or more saved elibrary.ru profile pages (.html) or a directory containing them.".to_string()
            ),
            ReportError::InvalidCitation { .. } => Some(
                "Re-export the profile page, or use --on-invalid-citation skip-document to drop the affected author.".to_string()
            ),
            ReportError::NothingToReport => Some(
                "Check that the files are complete HTML exports of an author's publication list.".to_string()
            ),
            ReportError::EmptyReport { .. } => Some(
                "There was no author data to render. Check the input files.".to_string()
            ),
            ReportError::OutputFileExists { .. } => Some(
                "Choose a different name with --name, another directory with --output-dir, or use --force to overwrite.".to_string()
            ),
            ReportError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            ReportError::Permission { .. } => Some(
                "Ensure you have the necessary read/write permissions for the target directory.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(error: toml::de::Error) -> Self {
        ReportError::Config {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(error: serde_json::Error) -> Self {
        ReportError::Serialization {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
