use crate::error::{Result, SampleError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Extension of every sample artifact
pub const SAMPLE_EXTENSION: &str = ".md";

/// Dotted name of a sample: package segments, class name, function name.
///
/// Every segment is made of ASCII letters only, so `a.B.c` maps onto the
/// artifact path `a/B/c.md` and back without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleIdentifier(String);

impl SampleIdentifier {
    /// Validate `text` as a dotted identifier
    pub fn parse(text: &str) -> Result<Self> {
        let valid = !text.is_empty()
            && text.split('.').all(|segment| {
                !segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_alphabetic())
            });
        if valid {
            Ok(Self(text.to_string()))
        } else {
            Err(SampleError::malformed(text))
        }
    }

    /// Join already split segments
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        let joined = segments
            .iter()
            .map(|segment| segment.as_ref())
            .collect::<Vec<_>>()
            .join(".");
        Self::parse(&joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn to_sample_path(&self) -> SamplePath {
        SamplePath(format!("{}{SAMPLE_EXTENSION}", self.0.replace('.', "/")))
    }
}

impl FromStr for SampleIdentifier {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SampleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relative, `/`-separated location of a sample artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SamplePath(String);

impl SamplePath {
    pub fn parse(text: &str) -> Result<Self> {
        if text.ends_with(SAMPLE_EXTENSION) && text.len() > SAMPLE_EXTENSION.len() {
            Ok(Self(text.to_string()))
        } else {
            Err(SampleError::InvalidSamplePath(text.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_identifier(&self) -> Result<SampleIdentifier> {
        let stem = self
            .0
            .strip_suffix(SAMPLE_EXTENSION)
            .unwrap_or(self.0.as_str());
        SampleIdentifier::parse(&stem.replace('/', "."))
    }

    /// Platform path of the artifact, relative to an artifact root
    pub fn to_path_buf(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl FromStr for SamplePath {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SamplePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
