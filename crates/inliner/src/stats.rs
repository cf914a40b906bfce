use serde::{Deserialize, Serialize};

/// Statistics about an inlining run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineStats {
    /// Number of source files visited
    pub files: usize,

    /// Files containing at least one marker
    pub rewritten_files: usize,

    /// Markers replaced by a sample
    pub references: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,
}
