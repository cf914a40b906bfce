use thiserror::Error;

/// Result type for sample extraction
pub type Result<T> = std::result::Result<T, SampleError>;

/// Errors raised while classifying, scanning or persisting samples
#[derive(Error, Debug)]
pub enum SampleError {
    /// Identifier text is empty, has an empty segment or a non-letter character
    #[error("Invalid sample identifier (was '{0}').")]
    MalformedIdentifier(String),

    /// Sample path text without the Markdown extension
    #[error("Sample path should end with '.md' (was '{0}').")]
    InvalidSamplePath(String),

    /// More than one class header in a sample source
    #[error("Multiple classes found in '{path}'.")]
    MultipleClasses { path: String },

    /// Function header outside of any class
    #[error("Top-level function found in '{path}'.")]
    TopLevelFunction { path: String },

    /// Sample source without exactly one class header
    #[error("Expected a single class in '{path}' (found {count}).")]
    NotSingleClass { path: String, count: usize },

    /// Sample source without a public class declaration
    #[error("No public class found in '{path}'.")]
    NoPublicClass { path: String },

    /// Invalid conventions
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SampleError {
    /// Create a malformed identifier error
    pub fn malformed(text: impl Into<String>) -> Self {
        Self::MalformedIdentifier(text.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for violations of the single-class sample convention
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MultipleClasses { .. }
                | Self::TopLevelFunction { .. }
                | Self::NotSingleClass { .. }
                | Self::NoPublicClass { .. }
        )
    }
}
