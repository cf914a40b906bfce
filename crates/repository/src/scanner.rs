use crate::error::Result;
use docsample_extractor::Language;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Scanner for finding Kotlin and Java sources under a directory
pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Supported source files, sorted by path within each directory.
    ///
    /// Fails on the first entry the walk cannot read.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder.filter_entry(move |entry| !FileScanner::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            let entry = result.map_err(|e| {
                log::error!("Failed to read entry under {}: {e}", self.root.display());
                e
            })?;
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if Language::from_path(path).is_none() {
                log::debug!("Skipping unsupported file {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        log::info!("Found {} source files in {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Path of `path` relative to the scanned root
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    fn is_ignored_scope(path: &Path, root: &Path) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let std::path::Component::Normal(name) = component {
                    let name = name.to_string_lossy();
                    if IGNORED_SCOPES.iter().any(|ignored| *ignored == name) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

/// Build and tool directories never holding sources
const IGNORED_SCOPES: &[&str] = &[".git", ".gradle", ".idea", "build", "out", "target"];
