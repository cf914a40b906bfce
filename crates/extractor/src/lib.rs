//! # Docsample Extractor
//!
//! Recognizes sample sources and turns their member functions into
//! Markdown code blocks.
//!
//! ## Pipeline
//!
//! ```text
//! Source file
//!     │
//!     ├──> SourceClassifier (sample directory + `Sample` suffix, extension)
//!     │
//!     ├──> StructuralScanner (line based, brace depth)
//!     │    ├─> package segments
//!     │    ├─> single class
//!     │    └─> parameterless member functions → bodies
//!     │
//!     └──> Sample
//!          ├─> SampleIdentifier  package.Class.function
//!          ├─> SamplePath        package/Class/function.md
//!          └─> Markdown          ```kotlin … ```
//! ```
//!
//! ## Example
//!
//! ```rust
//! use docsample_extractor::{ExtractorConfig, Language, StructuralScanner};
//! use std::path::Path;
//!
//! let scanner = StructuralScanner::new(Language::Kotlin, &ExtractorConfig::default());
//! let code = "class IntSample { fun addition(): Unit = check(1 + 2 == 3) }";
//!
//! let samples = scanner.scan(Path::new("sample/IntSample.kt"), code).unwrap();
//! assert_eq!(samples[0].identifier().as_str(), "IntSample.addition");
//! assert_eq!(samples[0].markdown_content(), "```kotlin\ncheck(1 + 2 == 3)\n```");
//! ```

mod classifier;
mod config;
mod error;
mod identifier;
mod language;
mod sample;
mod scanner;

pub use classifier::SourceClassifier;
pub use config::{ExtractorConfig, DEFAULT_PLACEHOLDER};
pub use error::{Result, SampleError};
pub use identifier::{SampleIdentifier, SamplePath, SAMPLE_EXTENSION};
pub use language::{FunctionHeader, FunctionShape, Language};
pub use sample::Sample;
pub use scanner::StructuralScanner;
