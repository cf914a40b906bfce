use anyhow::{Context as AnyhowContext, Result};
use docsample_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the project root when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "docsample.toml";

/// Contents of `docsample.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsampleConfig {
    pub paths: PathsConfig,
    pub conventions: ExtractorConfig,
}

/// Directories of the pipeline, relative to the project root unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Tree scanned for sample sources
    pub sources: PathBuf,

    /// Tree holding the documented sources
    pub main: PathBuf,

    /// Markdown artifacts
    pub extracted: PathBuf,

    /// Rewritten copies of the documented sources
    pub inlined: PathBuf,

    /// Snapshot taken before an in-place rewrite
    pub backup: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: PathBuf::from("src"),
            main: PathBuf::from("src/main"),
            extracted: PathBuf::from("build/docsample/extracted"),
            inlined: PathBuf::from("build/docsample/inlined"),
            backup: PathBuf::from("build/docsample/sources-backup"),
        }
    }
}

impl PathsConfig {
    /// Same paths, made absolute against `root`
    pub fn resolve(&self, root: &Path) -> Self {
        let join = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        };
        Self {
            sources: join(&self.sources),
            main: join(&self.main),
            extracted: join(&self.extracted),
            inlined: join(&self.inlined),
            backup: join(&self.backup),
        }
    }
}

impl DocsampleConfig {
    /// Read `explicit`, or `<root>/docsample.toml` when present, or fall back to defaults
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = root.join(CONFIG_FILE_NAME);
                if !default.is_file() {
                    log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("Invalid {}", path.display()))?;
        config
            .conventions
            .validate()
            .with_context(|| format!("Invalid {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
