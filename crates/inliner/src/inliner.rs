use crate::error::{InlinerError, Result};
use crate::references::{parse_reference, Reference};
use crate::stats::InlineStats;
use docsample_extractor::SampleIdentifier;
use docsample_repository::FileScanner;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Replaces sample markers with the Markdown artifacts they name.
///
/// Two comment shapes are handled:
///
/// ```text
/// /** SAMPLE: [IntSample.addition] */      /**
///                                     ──>   * ```kotlin
///                                           * check(1 + 2 == 3)
///                                           * ```
///                                           */
///
/// /**                                      /**
///  * SAMPLE: [IntSample.addition]     ──>   * ```kotlin
///  */                                       * check(1 + 2 == 3)
///                                           * ```
///                                           */
/// ```
///
/// Artifacts are read once per inliner.
pub struct Inliner {
    artifact_dir: PathBuf,
    cache: HashMap<SampleIdentifier, Vec<String>>,
}

impl Inliner {
    pub fn new(artifact_dir: impl AsRef<Path>) -> Self {
        Self {
            artifact_dir: artifact_dir.as_ref().to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// Rewrite `text`; the result always ends with a newline
    pub fn inline_text(&mut self, text: &str) -> Result<String> {
        self.rewrite(text).map(|(content, _)| content)
    }

    /// Rewrite `src` into `dest` with a single write.
    ///
    /// Returns the number of markers replaced.
    pub fn inline_file(&mut self, src: &Path, dest: &Path) -> Result<usize> {
        let text = fs::read_to_string(src)?;
        let (content, references) = self.rewrite(&text)?;
        write_whole(dest, &content)?;
        Ok(references)
    }

    /// Rewrite every source file of `main_dir` to the same relative path under `output_dir`.
    ///
    /// When both directories are the same, files without markers are left untouched.
    pub fn inline_tree(&mut self, main_dir: &Path, output_dir: &Path) -> Result<InlineStats> {
        let started = Instant::now();
        let in_place = main_dir == output_dir;
        let scanner = FileScanner::new(main_dir);
        let mut stats = InlineStats::default();

        for path in scanner.scan()? {
            stats.files += 1;
            let relative = scanner.relative(&path);
            let text = fs::read_to_string(&path)?;
            let (content, references) = self.rewrite(&text).map_err(|err| {
                log::error!("{}: {err}", relative.display());
                err
            })?;

            if references > 0 {
                stats.rewritten_files += 1;
                stats.references += references;
                log::debug!("Inlined {references} samples into {}", relative.display());
            } else if in_place {
                continue;
            }
            write_whole(&output_dir.join(relative), &content)?;
        }

        stats.time_ms = started.elapsed().as_millis() as u64;
        log::info!(
            "Inlined {} samples into {} of {} files",
            stats.references,
            stats.rewritten_files,
            stats.files
        );
        Ok(stats)
    }

    fn rewrite(&mut self, text: &str) -> Result<(String, usize)> {
        if text.is_empty() {
            return Ok(("\n".to_string(), 0));
        }
        let mut output = String::with_capacity(text.len());
        let mut references = 0;

        for line in text.lines() {
            match parse_reference(line)? {
                Some(reference) => {
                    references += 1;
                    self.expand(&reference, &mut output)?;
                }
                None => {
                    output.push_str(line);
                    output.push('\n');
                }
            }
        }
        Ok((output, references))
    }

    fn expand(&mut self, reference: &Reference<'_>, output: &mut String) -> Result<()> {
        let single_line = reference.prefix.contains("/**") && reference.suffix.contains("*/");
        let artifact = self.artifact_lines(&reference.identifier)?;

        if !single_line {
            for line in artifact {
                push_comment_line(output, reference.prefix, line);
            }
            return Ok(());
        }

        let opening = reference.prefix.find("/**").unwrap_or(0);
        let indent = &reference.prefix[..opening];
        let line_prefix = format!("{indent} * ");
        let leading = reference.prefix[opening + 3..].trim();
        let trailing = reference
            .suffix
            .split("*/")
            .next()
            .unwrap_or_default()
            .trim();

        output.push_str(indent);
        output.push_str("/**\n");
        if !leading.is_empty() {
            push_comment_line(output, &line_prefix, leading);
        }
        for line in artifact {
            push_comment_line(output, &line_prefix, line);
        }
        if !trailing.is_empty() {
            push_comment_line(output, &line_prefix, trailing);
        }
        output.push_str(indent);
        output.push_str(" */\n");
        Ok(())
    }

    fn artifact_lines(&mut self, identifier: &SampleIdentifier) -> Result<&[String]> {
        if !self.cache.contains_key(identifier) {
            let path = self
                .artifact_dir
                .join(identifier.to_sample_path().to_path_buf());
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Err(InlinerError::MissingSamples(vec![InlinerError::missing(
                        identifier,
                    )]));
                }
                Err(err) => return Err(err.into()),
            };
            let lines = content.lines().map(str::to_string).collect();
            self.cache.insert(identifier.clone(), lines);
        }
        Ok(self
            .cache
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }
}

/// `prefix` + `line`, without trailing whitespace on empty lines
fn push_comment_line(output: &mut String, prefix: &str, line: &str) {
    if line.is_empty() {
        output.push_str(prefix.trim_end());
    } else {
        output.push_str(prefix);
        output.push_str(line);
    }
    output.push('\n');
}

fn write_whole(dest: &Path, content: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, content)?;
    Ok(())
}
