use crate::config::ExtractorConfig;
use crate::language::Language;
use std::path::{Component, Path};

/// Decides which files are sample sources and in which language
#[derive(Debug, Clone)]
pub struct SourceClassifier {
    sample_directories: Vec<String>,
    file_suffix: String,
}

impl SourceClassifier {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            sample_directories: config.sample_directories.clone(),
            file_suffix: config.file_suffix.clone(),
        }
    }

    /// `path` is relative to the scanned root; only its directories count
    pub fn is_sample_source(&self, path: &Path) -> bool {
        let in_sample_tree = path
            .parent()
            .map(|parent| {
                parent.components().any(|component| match component {
                    Component::Normal(name) => self
                        .sample_directories
                        .iter()
                        .any(|dir| name.to_str() == Some(dir.as_str())),
                    _ => false,
                })
            })
            .unwrap_or(false);
        if !in_sample_tree {
            return false;
        }

        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(&self.file_suffix))
    }

    pub fn language_of(&self, path: &Path) -> Option<Language> {
        Language::from_path(path)
    }

    /// Language of a sample source, `None` for anything else
    pub fn classify(&self, path: &Path) -> Option<Language> {
        if !self.is_sample_source(path) {
            return None;
        }
        let language = self.language_of(path);
        if language.is_none() {
            log::debug!("Skipping sample file with unsupported extension {}", path.display());
        }
        language
    }
}

impl Default for SourceClassifier {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}
