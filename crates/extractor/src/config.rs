use crate::error::{Result, SampleError};
use serde::{Deserialize, Serialize};

/// Body emitted for a sample function with nothing inside
pub const DEFAULT_PLACEHOLDER: &str = "TODO(\"Sample is not yet implemented.\")";

/// Naming and placement conventions for sample sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Directory names that hold sample sources (any depth)
    pub sample_directories: Vec<String>,

    /// Required suffix of a sample source's file stem
    pub file_suffix: String,

    /// Body used for empty sample functions
    pub placeholder: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sample_directories: vec!["sample".to_string()],
            file_suffix: "Sample".to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.sample_directories.is_empty() {
            return Err(SampleError::invalid_config(
                "sample_directories must name at least one directory",
            ));
        }

        if let Some(bad) = self
            .sample_directories
            .iter()
            .find(|dir| dir.is_empty() || dir.contains(['/', '\\']))
        {
            return Err(SampleError::invalid_config(format!(
                "sample directory '{bad}' must be a single non-empty path component"
            )));
        }

        if self.file_suffix.is_empty() {
            return Err(SampleError::invalid_config("file_suffix must not be empty"));
        }

        if self.placeholder.trim().is_empty() {
            return Err(SampleError::invalid_config("placeholder must not be blank"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sample_directories, vec!["sample".to_string()]);
        assert_eq!(config.file_suffix, "Sample");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ExtractorConfig::default();

        config.sample_directories.clear();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SampleError::InvalidConfig(_)), "{err:?}");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: sample_directories must name at least one directory"
        );

        config.sample_directories = vec!["src/sample".to_string()];
        assert!(config.validate().is_err());

        config.sample_directories = vec!["samples".to_string()];
        config.file_suffix.clear();
        assert!(config.validate().is_err());

        config.file_suffix = "Example".to_string();
        config.placeholder = "   ".to_string();
        assert!(config.validate().is_err());

        config.placeholder = "TODO()".to_string();
        assert!(config.validate().is_ok());
    }
}
