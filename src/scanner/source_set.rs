use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One profile export to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Identifier used in records and diagnostics: the path as given.
    pub id: String,
    pub path: PathBuf,
}

impl Source {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self {
            id: path.display().to_string(),
            path,
        }
    }
}

/// Insertion-ordered set of sources.
///
/// Two paths naming the same existing file are the same source even when
/// spelled differently; paths that do not resolve are compared verbatim.
#[derive(Debug, Default, Clone)]
pub struct SourceSet {
    sources: Vec<Source>,
    seen: HashSet<PathBuf>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the path was already present.
    pub fn add<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        let key = dedup_key(path);

        if !self.seen.insert(key) {
            return false;
        }

        self.sources.push(Source::new(path));
        true
    }

    pub fn extend<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().filter(|p| self.add(p)).count()
    }

    pub fn as_slice(&self) -> &[Source] {
        &self.sources
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn dedup_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
