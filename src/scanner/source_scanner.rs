use crate::config::InputConfig;
use crate::error::{ReportError, Result};
use crate::scanner::input_filter::InputFilter;
use crate::scanner::source_set::SourceSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Sources found for a set of command-line inputs.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub sources: SourceSet,
    /// Problems met while walking directories; none of them stop the scan.
    pub scan_errors: Vec<String>,
    pub skipped_files: usize,
}

pub struct SourceScanner {
    filter: InputFilter,
    max_depth: usize,
}

impl SourceScanner {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            filter: InputFilter::new(config),
            max_depth: config.max_depth,
        }
    }

    /// Expands `inputs` into profile sources.
    ///
    /// Files named directly are taken as they are, whatever their extension;
    /// a file that turns out to be unreadable is reported later by the
    /// pipeline. Directories are walked and filtered; a directory that cannot
    /// be read only adds to `scan_errors`.
    pub fn collect<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();

        for input in inputs {
            let input = input.as_ref();

            if input.is_dir() {
                let found = self.scan_directory(input, &mut outcome);
                outcome.sources.extend(found);
            } else {
                outcome.sources.add(input);
            }
        }

        if outcome.sources.is_empty() {
            return Err(ReportError::NoSourcesFound {
                searched_extensions: self.filter.get_extensions().clone(),
            });
        }

        Ok(outcome)
    }

    fn scan_directory(&self, root: &Path, outcome: &mut ScanOutcome) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .max_depth(self.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err
                        .io_error()
                        .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
                    {
                        outcome.scan_errors.push(format!("Permission denied: {}", err));
                    } else {
                        outcome.scan_errors.push(format!("Scan error: {}", err));
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.filter.is_profile_file(entry.path()) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) if self.filter.is_size_allowed(metadata.len()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => outcome.skipped_files += 1,
                Err(err) => outcome.scan_errors.push(format!(
                    "Error processing {}: {}",
                    entry.path().display(),
                    err
                )),
            }
        }

        files.sort();
        files
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || entry.file_type().is_file() {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }

        // Symlinks are not followed
        false
    }
}
