//! # Docsample Repository
//!
//! Source-tree level operations on samples.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> File Scanner (Kotlin/Java sources, sorted)
//!     │      └─> Sample sources (classifier)
//!     │
//!     ├──> Structural Scanner per file
//!     │      └─> Samples, or one error line per bad file
//!     │
//!     └──> Artifacts
//!            └─> <output>/package/Class/function.md
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use docsample_repository::SampleRepository;
//! use std::path::Path;
//!
//! fn main() -> docsample_repository::Result<()> {
//!     let repository = SampleRepository::default();
//!     let stats = repository.extract_into(Path::new("src"), Path::new("build/samples"))?;
//!
//!     println!("Extracted {} samples from {} files", stats.samples, stats.files);
//!     Ok(())
//! }
//! ```

mod backup;
mod error;
mod repository;
mod scanner;
mod stats;

pub use backup::{backup_sources, restore_sources, DEFAULT_BACKUP_EXCLUDES};
pub use error::{RepositoryError, Result};
pub use repository::SampleRepository;
pub use scanner::FileScanner;
pub use stats::ExtractStats;
