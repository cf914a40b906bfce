use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Sample error: {0}")]
    SampleError(#[from] docsample_extractor::SampleError),

    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Scan error: {0}")]
    ScanError(#[from] ignore::Error),

    /// One message per sample source that could not be scanned
    #[error("{}", .0.join("\n"))]
    Extraction(Vec<String>),

    /// One message per convention violation
    #[error("{}", .0.join("\n"))]
    Check(Vec<String>),

    #[error("Invalid source tree: {0}")]
    InvalidPath(String),
}

impl RepositoryError {
    /// Individual failure lines, for reporting one per line
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Extraction(messages) | Self::Check(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
