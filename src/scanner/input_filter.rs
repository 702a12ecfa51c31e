use crate::config::InputConfig;
use regex::Regex;
use std::path::Path;

pub struct InputFilter {
    extensions: Vec<String>,
    max_file_size: u64,
    exclude_patterns: Vec<Regex>,
}

impl InputFilter {
    pub fn new(config: &InputConfig) -> Self {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect();

        Self {
            extensions: config
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            max_file_size: config.max_file_size,
            exclude_patterns,
        }
    }

    /// Whether a file found while walking a directory looks like a saved profile page.
    pub fn is_profile_file(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|s| s.to_str()) else {
            return false;
        };

        if !self.extensions.contains(&extension.to_lowercase()) {
            return false;
        }

        match path.file_name().and_then(|s| s.to_str()) {
            Some(filename) => !self.matches_any_pattern(filename),
            None => false,
        }
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            // Browsers save page assets next to the page in "<name>_files"
            if dir_name.ends_with("_files") {
                return false;
            }

            if dir_name.starts_with('.') && dir_name != "." && dir_name != ".." {
                return false;
            }

            if self.matches_any_pattern(dir_name) {
                return false;
            }
        }

        true
    }

    pub fn is_size_allowed(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    pub fn get_extensions(&self) -> &Vec<String> {
        &self.extensions
    }

    pub fn matches_any_pattern(&self, text: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(text))
    }
}

impl Default for InputFilter {
    fn default() -> Self {
        let config = InputConfig::default();
        Self::new(&config)
    }
}
