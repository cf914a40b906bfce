use crate::error::Result;
use crate::identifier::SampleIdentifier;
use crate::language::Language;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// One extracted sample body
#[derive(Debug, Clone)]
pub struct Sample {
    identifier: SampleIdentifier,
    body: String,
    language: Language,
}

impl Sample {
    /// Build a sample; a blank body is replaced with `placeholder`
    pub fn new(
        identifier: SampleIdentifier,
        body: impl Into<String>,
        language: Language,
        placeholder: &str,
    ) -> Self {
        let body = body.into();
        let body = if body.trim().is_empty() {
            placeholder.to_string()
        } else {
            body
        };
        Self {
            identifier,
            body,
            language,
        }
    }

    pub fn identifier(&self) -> &SampleIdentifier {
        &self.identifier
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Fenced code block with the language tag
    pub fn markdown_content(&self) -> String {
        format!("```{}\n{}\n```", self.language.markdown_tag(), self.body)
    }

    /// Write the artifact under `dir`, replacing any previous content
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.identifier.to_sample_path().to_path_buf());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = self.markdown_content();
        content.push('\n');
        fs::write(&path, content)?;
        log::debug!("Saved sample {} to {}", self.identifier, path.display());
        Ok(path)
    }
}

impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Sample {}

impl Hash for Sample {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PLACEHOLDER;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn sample(id: &str, body: &str) -> Sample {
        Sample::new(
            SampleIdentifier::parse(id).unwrap(),
            body,
            Language::Kotlin,
            DEFAULT_PLACEHOLDER,
        )
    }

    #[test]
    fn test_markdown_content() {
        let sample = sample("IntSample.addition", "val x = 1\ncheck(x == 1)");
        assert_eq!(
            sample.markdown_content(),
            "```kotlin\nval x = 1\ncheck(x == 1)\n```"
        );
    }

    #[test]
    fn test_blank_body_uses_placeholder() {
        let sample = sample("IntSample.addition", "  \n ");
        assert_eq!(sample.body(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_equality_ignores_body() {
        let first = sample("IntSample.addition", "check(true)");
        let second = sample("IntSample.addition", "check(false)");
        assert_eq!(first, second);

        let set: HashSet<Sample> = [first, second].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_save_to_creates_parents_and_is_idempotent() {
        let temp = tempdir().unwrap();
        let sample = sample("test.IntSample.addition", "check(1 + 2 == 3)");

        let path = sample.save_to(temp.path()).unwrap();
        assert_eq!(path, temp.path().join("test/IntSample/addition.md"));
        let first = fs::read_to_string(&path).unwrap();
        assert_eq!(first, "```kotlin\ncheck(1 + 2 == 3)\n```\n");

        sample.save_to(temp.path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_java_sample_uses_java_tag() {
        let sample = Sample::new(
            SampleIdentifier::parse("StringSample.concat").unwrap(),
            "String s = \"a\" + \"b\";",
            Language::Java,
            DEFAULT_PLACEHOLDER,
        );
        assert!(sample.markdown_content().starts_with("```java\n"));
    }
}
