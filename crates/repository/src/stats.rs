use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics about an extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Number of source files visited
    pub files: usize,

    /// Number of files classified as sample sources
    pub sample_sources: usize,

    /// Number of artifacts written
    pub samples: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Sample sources per language
    pub languages: BTreeMap<String, usize>,
}

impl ExtractStats {
    pub fn new() -> Self {
        Self {
            files: 0,
            sample_sources: 0,
            samples: 0,
            time_ms: 0,
            languages: BTreeMap::new(),
        }
    }

    pub fn add_sample_source(&mut self, language: &str) {
        self.sample_sources += 1;
        *self.languages.entry(language.to_string()).or_insert(0) += 1;
    }

    pub fn add_samples(&mut self, count: usize) {
        self.samples += count;
    }
}

impl Default for ExtractStats {
    fn default() -> Self {
        Self::new()
    }
}
