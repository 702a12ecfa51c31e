use crate::config::ReportFormat;
use crate::error::{ReportError, Result};
use crate::extractor::AuthorRecord;
use std::fmt::{self, Write};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FILE_NAME: &str = "Output";

const HIRSCH_INDEX_LABEL: &str = "Индекс Хирша";
const PUBLICATION_COUNT_LABEL: &str = "Количество статей";
const ZERO_CITATION_LABEL: &str = "Количество статей с нулевым цитированием";

pub struct ReportWriter {
    directory: PathBuf,
    file_name: String,
    format: ReportFormat,
    force_overwrite: bool,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(directory: P, file_name: &str, format: ReportFormat) -> Self {
        let file_name = if file_name.is_empty() || file_name.starts_with(' ') {
            DEFAULT_FILE_NAME.to_string()
        } else {
            file_name.to_string()
        };

        Self {
            directory: directory.into(),
            file_name,
            format,
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.file_name, self.format.extension()))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Makes sure the output directory exists and is writable.
    pub fn validate_paths(&self) -> Result<()> {
        if !self.directory.exists() {
            fs::create_dir_all(&self.directory).map_err(|e| ReportError::Permission {
                path: format!(
                    "Cannot create output directory {}: {}",
                    self.directory.display(),
                    e
                ),
            })?;
        }

        let test_file = self.directory.join(".elibrary-report_write_test");
        match fs::File::create(&test_file) {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                return Err(ReportError::Permission {
                    path: format!(
                        "No write permission for directory {}: {}",
                        self.directory.display(),
                        e
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn render(&self, authors: &[AuthorRecord]) -> Result<String> {
        let content = match self.format {
            ReportFormat::Markdown => render_with(authors, render_markdown)?,
            ReportFormat::Text => render_with(authors, render_text)?,
            ReportFormat::Json => serde_json::to_string_pretty(authors)?,
        };
        Ok(content)
    }

    /// Writes the report and returns the path of the written file.
    ///
    /// Nothing is written when there are no authors or the rendered content is blank.
    pub fn write(&self, authors: &[AuthorRecord]) -> Result<PathBuf> {
        let path = self.output_path();

        if authors.is_empty() {
            return Err(ReportError::EmptyReport {
                path: path.display().to_string(),
            });
        }

        let content = self.render(authors)?;
        if content.trim().is_empty() {
            return Err(ReportError::EmptyReport {
                path: path.display().to_string(),
            });
        }

        if path.exists() && !self.force_overwrite {
            return Err(ReportError::OutputFileExists {
                path: path.display().to_string(),
            });
        }

        self.validate_paths()?;
        fs::write(&path, content)?;

        Ok(path)
    }
}

fn render_with(
    authors: &[AuthorRecord],
    render: fn(&mut String, &[AuthorRecord]) -> fmt::Result,
) -> Result<String> {
    let mut out = String::new();
    render(&mut out, authors).map_err(|e| ReportError::Serialization {
        message: e.to_string(),
    })?;
    Ok(out)
}

fn render_markdown(out: &mut String, authors: &[AuthorRecord]) -> fmt::Result {
    for (index, author) in authors.iter().enumerate() {
        if index > 0 {
            writeln!(out, "---")?;
            writeln!(out)?;
        }

        writeln!(out, "## {}", author.display_name())?;
        writeln!(out)?;
        writeln!(out, "*{}*", author.affiliation())?;
        writeln!(out)?;
        writeln!(out, "- **{}:** {}", HIRSCH_INDEX_LABEL, author.hirsch_index())?;
        writeln!(
            out,
            "- **{}:** {}",
            PUBLICATION_COUNT_LABEL,
            author.publication_count()
        )?;
        writeln!(
            out,
            "- **{}:** {}",
            ZERO_CITATION_LABEL,
            author.zero_citation_count()
        )?;
        writeln!(out)?;

        for publication in author.publications() {
            writeln!(out, "### {}", publication.title)?;
            writeln!(out)?;
            writeln!(out, "{}", publication.joint_authors)?;
            writeln!(out)?;
            writeln!(out, "{}", publication.venue)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn render_text(out: &mut String, authors: &[AuthorRecord]) -> fmt::Result {
    let separator = "-".repeat(40);

    for author in authors {
        writeln!(out, "{}", author.display_name())?;
        writeln!(out, "{}", author.affiliation())?;
        writeln!(out)?;
        writeln!(out, "{}: {}", HIRSCH_INDEX_LABEL, author.hirsch_index())?;
        writeln!(out, "{}: {}", PUBLICATION_COUNT_LABEL, author.publication_count())?;
        writeln!(out, "{}: {}", ZERO_CITATION_LABEL, author.zero_citation_count())?;
        writeln!(out)?;

        for publication in author.publications() {
            writeln!(out, "  {}", publication.title)?;
            writeln!(out, "  {}", publication.joint_authors)?;
            writeln!(out, "  {}", publication.venue)?;
            writeln!(out)?;
        }

        writeln!(out, "{}", separator)?;
    }

    Ok(())
}
