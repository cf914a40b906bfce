use crate::error::{InlinerError, Result};
use docsample_extractor::{SampleError, SampleIdentifier};
use docsample_repository::FileScanner;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Text introducing a sample reference in a documentation comment
pub const MARKER: &str = "SAMPLE: [";

/// A marker found on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Everything before the marker
    pub prefix: &'a str,
    pub identifier: SampleIdentifier,
    /// Everything after the closing bracket
    pub suffix: &'a str,
}

/// Parse the marker of `line`, if any.
///
/// A marker whose bracketed text is not a valid identifier, or that has no
/// closing bracket, is an error.
pub fn parse_reference(line: &str) -> Result<Option<Reference<'_>>> {
    let Some(start) = line.find(MARKER) else {
        return Ok(None);
    };
    let after = &line[start + MARKER.len()..];
    let Some(end) = after.find(']') else {
        return Err(SampleError::malformed(after).into());
    };
    let identifier = SampleIdentifier::parse(&after[..end])?;
    Ok(Some(Reference {
        prefix: &line[..start],
        identifier,
        suffix: &after[end + 1..],
    }))
}

/// Referenced identifiers of `text`, in order of first appearance
pub fn references_in(text: &str) -> Result<Vec<SampleIdentifier>> {
    let mut seen = HashSet::new();
    let mut identifiers = Vec::new();
    for line in text.lines() {
        if let Some(reference) = parse_reference(line)? {
            if seen.insert(reference.identifier.clone()) {
                identifiers.push(reference.identifier);
            }
        }
    }
    Ok(identifiers)
}

/// Verifies that references point at extracted samples
pub struct ReferenceScanner {
    artifact_dir: PathBuf,
}

impl ReferenceScanner {
    pub fn new(artifact_dir: impl AsRef<Path>) -> Self {
        Self {
            artifact_dir: artifact_dir.as_ref().to_path_buf(),
        }
    }

    pub fn artifact_path(&self, identifier: &SampleIdentifier) -> PathBuf {
        self.artifact_dir
            .join(identifier.to_sample_path().to_path_buf())
    }

    pub fn resolves(&self, identifier: &SampleIdentifier) -> bool {
        self.artifact_path(identifier).is_file()
    }

    /// Check every reference of every file.
    ///
    /// Missing samples are reported once each, after all files were read.
    /// Returns the number of distinct references.
    pub fn check_all_resolve(&self, files: &[PathBuf]) -> Result<usize> {
        let mut seen = HashSet::new();
        let mut missing = Vec::new();

        for file in files {
            let text = fs::read_to_string(file)?;
            let identifiers = references_in(&text).map_err(|err| {
                log::error!("{}: {err}", file.display());
                err
            })?;
            for identifier in identifiers {
                if !seen.insert(identifier.clone()) {
                    continue;
                }
                if !self.resolves(&identifier) {
                    let message = InlinerError::missing(&identifier);
                    log::error!("{message}");
                    missing.push(message);
                }
            }
        }

        if !missing.is_empty() {
            return Err(InlinerError::MissingSamples(missing));
        }
        log::info!("All {} sample references resolved", seen.len());
        Ok(seen.len())
    }

    /// Same as [`Self::check_all_resolve`] over every source file of `main_dir`
    pub fn check_tree(&self, main_dir: &Path) -> Result<usize> {
        self.check_all_resolve(&FileScanner::new(main_dir).scan()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_reference_shapes() {
        let reference = parse_reference("/** SAMPLE: [IntSample.addition] */")
            .unwrap()
            .unwrap();
        assert_eq!(reference.prefix, "/** ");
        assert_eq!(reference.identifier.as_str(), "IntSample.addition");
        assert_eq!(reference.suffix, " */");

        let reference = parse_reference("     * SAMPLE: [test.IntSample.addition]")
            .unwrap()
            .unwrap();
        assert_eq!(reference.prefix, "     * ");
        assert_eq!(reference.suffix, "");

        assert_eq!(parse_reference(" * Adds two integers.").unwrap(), None);
    }

    #[test]
    fn test_malformed_references_fail() {
        for line in [
            " * SAMPLE: [IntSample.addition",
            " * SAMPLE: [Int-Sample.addition]",
            " * SAMPLE: []",
            " * SAMPLE: [IntSample..addition]",
        ] {
            let err = parse_reference(line).unwrap_err();
            assert!(
                matches!(err, InlinerError::SampleError(SampleError::MalformedIdentifier(_))),
                "{line:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_references_in_keeps_first_appearance_order() {
        let text = "\
/** SAMPLE: [test.IntSample.subtraction] */
fun subtraction(x: Int, y: Int): Int = x - y

/**
 * SAMPLE: [test.IntSample.addition]
 */
fun addition(x: Int, y: Int): Int = x + y

/** SAMPLE: [test.IntSample.subtraction] */
fun minus(x: Int, y: Int): Int = x - y
";
        let identifiers: Vec<String> = references_in(text)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            identifiers,
            vec![
                "test.IntSample.subtraction".to_string(),
                "test.IntSample.addition".to_string()
            ]
        );
    }

    #[test]
    fn test_check_all_resolve_reports_each_missing_sample_once() {
        let temp = tempdir().unwrap();
        let artifacts = temp.path().join("extracted");
        fs::create_dir_all(artifacts.join("IntSample")).unwrap();
        fs::write(artifacts.join("IntSample/addition.md"), "```kotlin\nx\n```\n").unwrap();

        let first = temp.path().join("Int.kt");
        let second = temp.path().join("Long.kt");
        fs::write(&first, "/** SAMPLE: [IntSample.addition] */\n/** SAMPLE: [IntSample.subtraction] */\n").unwrap();
        fs::write(&second, "/** SAMPLE: [IntSample.subtraction] */\n/** SAMPLE: [LongSample.addition] */\n").unwrap();

        let scanner = ReferenceScanner::new(&artifacts);
        assert!(scanner.check_all_resolve(&[first.clone()]).is_err());

        let err = scanner.check_all_resolve(&[first, second]).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "'IntSample.subtraction' sample not found.".to_string(),
                "'LongSample.addition' sample not found.".to_string(),
            ]
        );
    }

    #[test]
    fn test_check_tree_passes_when_all_resolve() {
        let temp = tempdir().unwrap();
        let main = temp.path().join("main");
        let artifacts = temp.path().join("extracted");
        fs::create_dir_all(&main).unwrap();
        fs::create_dir_all(artifacts.join("IntSample")).unwrap();
        fs::write(artifacts.join("IntSample/addition.md"), "```kotlin\nx\n```\n").unwrap();
        fs::write(main.join("Int.kt"), "/** SAMPLE: [IntSample.addition] */\nfun a() = 1\n").unwrap();
        fs::write(main.join("Plain.kt"), "fun b() = 2\n").unwrap();

        assert_eq!(ReferenceScanner::new(&artifacts).check_tree(&main).unwrap(), 1);
    }

    #[test]
    fn test_check_tree_fails_on_missing_main_directory() {
        let temp = tempdir().unwrap();
        let err = ReferenceScanner::new(temp.path())
            .check_tree(&temp.path().join("missing"))
            .unwrap_err();
        assert!(
            matches!(
                err,
                InlinerError::RepositoryError(docsample_repository::RepositoryError::ScanError(_))
            ),
            "{err:?}"
        );
    }
}
