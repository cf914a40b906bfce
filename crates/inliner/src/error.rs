use thiserror::Error;

pub type Result<T> = std::result::Result<T, InlinerError>;

#[derive(Error, Debug)]
pub enum InlinerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    SampleError(#[from] docsample_extractor::SampleError),

    #[error("{0}")]
    RepositoryError(#[from] docsample_repository::RepositoryError),

    /// One `'<id>' sample not found.` line per missing identifier
    #[error("{}", .0.join("\n"))]
    MissingSamples(Vec<String>),
}

impl InlinerError {
    pub(crate) fn missing(identifier: impl std::fmt::Display) -> String {
        format!("'{identifier}' sample not found.")
    }

    /// Individual failure lines, for reporting one per line
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::MissingSamples(messages) => messages.clone(),
            Self::RepositoryError(err) => err.messages(),
            other => vec![other.to_string()],
        }
    }
}
