use crate::error::{RepositoryError, Result};
use crate::scanner::FileScanner;
use crate::stats::ExtractStats;
use docsample_extractor::{
    ExtractorConfig, Language, Sample, SampleIdentifier, SourceClassifier, StructuralScanner,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extracts the samples of a whole source tree and persists them as Markdown
pub struct SampleRepository {
    config: ExtractorConfig,
    classifier: SourceClassifier,
}

impl SampleRepository {
    pub fn new(config: ExtractorConfig) -> Self {
        let classifier = SourceClassifier::new(&config);
        Self { config, classifier }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Sample sources of `tree` with their language, in walk order
    pub fn sample_sources(&self, tree: &Path) -> Result<Vec<(PathBuf, Language)>> {
        if !tree.is_dir() {
            return Err(RepositoryError::InvalidPath(tree.display().to_string()));
        }
        let scanner = FileScanner::new(tree);
        Ok(scanner
            .scan()?
            .into_iter()
            .filter_map(|path| {
                let language = self.classifier.classify(scanner.relative(&path))?;
                Some((path, language))
            })
            .collect())
    }

    /// Scan every sample source of `tree`.
    ///
    /// A bad file does not stop the walk: every failure is collected and the
    /// whole extraction fails afterwards with one message per file. IO errors
    /// abort immediately.
    pub fn extract_all(&self, tree: &Path) -> Result<Vec<Sample>> {
        let mut stats = ExtractStats::new();
        self.extract_with_stats(tree, &mut stats)
    }

    fn extract_with_stats(&self, tree: &Path, stats: &mut ExtractStats) -> Result<Vec<Sample>> {
        let sources = self.sample_sources(tree)?;
        let mut samples = Vec::new();
        let mut seen: HashSet<SampleIdentifier> = HashSet::new();
        let mut errors = Vec::new();

        for (path, language) in sources {
            stats.add_sample_source(language.as_str());
            let text = fs::read_to_string(&path)?;
            let display = path.strip_prefix(tree).unwrap_or(&path);
            let scanner = StructuralScanner::new(language, &self.config);
            match scanner.scan(display, &text) {
                Ok(found) => {
                    for sample in found {
                        if seen.insert(sample.identifier().clone()) {
                            samples.push(sample);
                        } else {
                            log::warn!(
                                "Duplicate sample {} in {}, keeping the first one",
                                sample.identifier(),
                                display.display()
                            );
                        }
                    }
                }
                Err(err) => {
                    log::error!("{err}");
                    errors.push(err.to_string());
                }
            }
        }

        if !errors.is_empty() {
            return Err(RepositoryError::Extraction(errors));
        }
        log::info!("Extracted {} samples from {}", samples.len(), tree.display());
        Ok(samples)
    }

    /// Write each sample's artifact under `output`
    pub fn save_all(&self, samples: &[Sample], output: &Path) -> Result<usize> {
        fs::create_dir_all(output)?;
        for sample in samples {
            sample.save_to(output)?;
        }
        log::info!("Saved {} samples to {}", samples.len(), output.display());
        Ok(samples.len())
    }

    /// Extract and save in one step
    pub fn extract_into(&self, tree: &Path, output: &Path) -> Result<ExtractStats> {
        let started = Instant::now();
        let mut stats = ExtractStats::new();
        let samples = self.extract_with_stats(tree, &mut stats)?;
        stats.files = FileScanner::new(tree).scan()?.len();
        stats.add_samples(self.save_all(&samples, output)?);
        stats.time_ms = started.elapsed().as_millis() as u64;
        Ok(stats)
    }

    /// Check every sample source against the single public class convention.
    ///
    /// Returns the number of sources checked.
    pub fn check_all(&self, tree: &Path) -> Result<usize> {
        let sources = self.sample_sources(tree)?;
        let mut errors = Vec::new();

        for (path, language) in &sources {
            let text = fs::read_to_string(path)?;
            let display = path.strip_prefix(tree).unwrap_or(path);
            let scanner = StructuralScanner::new(*language, &self.config);
            for violation in scanner.check_source(display, &text) {
                log::error!("{violation}");
                errors.push(violation.to_string());
            }
        }

        if !errors.is_empty() {
            return Err(RepositoryError::Check(errors));
        }
        log::info!("Checked {} sample sources", sources.len());
        Ok(sources.len())
    }
}

impl Default for SampleRepository {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}
