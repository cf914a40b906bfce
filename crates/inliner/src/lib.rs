//! # Docsample Inliner
//!
//! Resolves `SAMPLE: [identifier]` markers in documentation comments and
//! replaces them with the extracted Markdown samples.
//!
//! ## Pipeline
//!
//! ```text
//! Primary sources
//!     │
//!     ├──> ReferenceScanner
//!     │      └─> every marker resolves to <artifacts>/a/B/c.md, or fail
//!     │
//!     └──> Inliner
//!            └─> <output>/<same relative path> with fenced blocks in KDoc
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use docsample_inliner::{Inliner, ReferenceScanner};
//! use std::path::Path;
//!
//! fn main() -> docsample_inliner::Result<()> {
//!     let artifacts = Path::new("build/samples");
//!     ReferenceScanner::new(artifacts).check_tree(Path::new("src/main"))?;
//!
//!     let stats = Inliner::new(artifacts).inline_tree(Path::new("src/main"), Path::new("build/inlined"))?;
//!     println!("Inlined {} samples", stats.references);
//!     Ok(())
//! }
//! ```

mod error;
mod inliner;
mod references;
mod stats;

pub use error::{InlinerError, Result};
pub use inliner::Inliner;
pub use references::{parse_reference, references_in, Reference, ReferenceScanner, MARKER};
pub use stats::InlineStats;
