use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Source language of a sample source or a documented file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Kotlin,
    Java,
}

/// Shape of a parameterless function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionShape {
    /// `fun name() {` with whatever follows the opening brace
    Block { rest: String },
    /// `fun name(): Unit = expr` with the expression text
    Expression { expr: String },
}

/// A matched function header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHeader {
    pub name: String,
    pub shape: FunctionShape,
}

/// Per-language header patterns, compiled once
struct Grammar {
    class_header: Regex,
    block_function: Regex,
    expression_function: Option<Regex>,
    package: Regex,
    non_public_modifiers: &'static [&'static str],
    public_modifier: Option<&'static str>,
}

const PACKAGE_PATTERN: &str = r"^package\s+([A-Za-z_][\w]*(?:\.[A-Za-z_][\w]*)*)\s*;?\s*$";

/// Annotations written on the declaration line, e.g. `@Test` or `@Suppress("unused")`
const ANNOTATIONS: &str = r"(?:@[\w.]+(?:\([^)]*\))?\s+)*";

fn class_header_pattern() -> Regex {
    Regex::new(&format!(
        r"^{ANNOTATIONS}((?:[a-z]+\s+)*)class\s+([A-Z][A-Za-z0-9_]*)"
    ))
    .unwrap()
}

static KOTLIN: Lazy<Grammar> = Lazy::new(|| Grammar {
    class_header: class_header_pattern(),
    block_function: Regex::new(&format!(
        r"^{ANNOTATIONS}(?:[a-z]+\s+)*fun\s+([A-Za-z]+)\s*\(\s*\)\s*(?::\s*[\w<>?,. ]+?\s*)?\{{(.*)$"
    ))
    .unwrap(),
    expression_function: Some(
        Regex::new(&format!(
            r"^{ANNOTATIONS}(?:[a-z]+\s+)*fun\s+([A-Za-z]+)\s*\(\s*\)\s*(?::\s*[\w<>?,. ]+?\s*)?=\s*(.+)$"
        ))
        .unwrap(),
    ),
    package: Regex::new(PACKAGE_PATTERN).unwrap(),
    non_public_modifiers: &["private", "internal", "protected"],
    public_modifier: None,
});

static JAVA: Lazy<Grammar> = Lazy::new(|| Grammar {
    class_header: class_header_pattern(),
    block_function: Regex::new(&format!(
        r"^{ANNOTATIONS}(?:[a-z]+\s+)*void\s+([A-Za-z]+)\s*\(\s*\)\s*\{{(.*)$"
    ))
    .unwrap(),
    expression_function: None,
    package: Regex::new(PACKAGE_PATTERN).unwrap(),
    non_public_modifiers: &["private", "protected"],
    public_modifier: Some("public"),
});

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "kt" | "kts" => Some(Language::Kotlin),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Kotlin => "kotlin",
            Language::Java => "java",
        }
    }

    /// Tag placed after the opening fence of a Markdown code block
    pub fn markdown_tag(self) -> &'static str {
        self.as_str()
    }

    fn grammar(self) -> &'static Grammar {
        match self {
            Language::Kotlin => &KOTLIN,
            Language::Java => &JAVA,
        }
    }

    /// Class name declared by `line`, if it is a class header
    pub fn class_name_of(self, line: &str) -> Option<String> {
        let line = line.trim();
        if is_comment(line) {
            return None;
        }
        self.grammar()
            .class_header
            .captures(line)
            .map(|caps| caps[2].to_string())
    }

    pub fn is_class_header(self, line: &str) -> bool {
        self.class_name_of(line).is_some()
    }

    /// Parameterless function declared by `line`.
    ///
    /// The single-expression form is tried first so that a lambda in the
    /// expression is never mistaken for a block opening.
    pub fn function_header(self, line: &str) -> Option<FunctionHeader> {
        let line = line.trim();
        if is_comment(line) {
            return None;
        }
        let grammar = self.grammar();
        if let Some(caps) = grammar
            .expression_function
            .as_ref()
            .and_then(|pattern| pattern.captures(line))
        {
            return Some(FunctionHeader {
                name: caps[1].to_string(),
                shape: FunctionShape::Expression {
                    expr: caps[2].trim().to_string(),
                },
            });
        }
        grammar
            .block_function
            .captures(line)
            .map(|caps| FunctionHeader {
                name: caps[1].to_string(),
                shape: FunctionShape::Block {
                    rest: caps[2].to_string(),
                },
            })
    }

    pub fn is_function_header(self, line: &str) -> bool {
        self.function_header(line).is_some()
    }

    /// Whether `line` declares a class visible outside its module.
    ///
    /// Kotlin classes are public unless a restricting modifier is present;
    /// Java classes need the explicit `public` keyword.
    pub fn is_public_class_declaration(self, line: &str) -> bool {
        let line = line.trim();
        if is_comment(line) {
            return false;
        }
        let grammar = self.grammar();
        let Some(caps) = grammar.class_header.captures(line) else {
            return false;
        };
        let modifiers: Vec<&str> = caps[1].split_whitespace().collect();
        if modifiers
            .iter()
            .any(|modifier| grammar.non_public_modifiers.contains(modifier))
        {
            return false;
        }
        match grammar.public_modifier {
            Some(keyword) => modifiers.contains(&keyword),
            None => true,
        }
    }

    /// Dotted package name of a package declaration line
    pub fn package_identifier_of(self, line: &str) -> Option<String> {
        self.grammar()
            .package
            .captures(line.trim())
            .map(|caps| caps[1].to_string())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line or block comment lines never carry declarations
pub(crate) fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("kt"), Some(Language::Kotlin));
        assert_eq!(Language::from_extension("KT"), Some(Language::Kotlin));
        assert_eq!(Language::from_extension("kts"), Some(Language::Kotlin));
        assert_eq!(Language::from_extension("java"), Some(Language::Java));
        assert_eq!(Language::from_extension("rs"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            Language::from_path("src/sample/IntSample.kt"),
            Some(Language::Kotlin)
        );
        assert_eq!(Language::from_path("Main.java"), Some(Language::Java));
        assert_eq!(Language::from_path("README.md"), None);
        assert_eq!(Language::from_path("no_extension"), None);
    }

    #[test]
    fn test_class_headers() {
        let kotlin = Language::Kotlin;
        assert_eq!(kotlin.class_name_of("class IntSample {"), Some("IntSample".into()));
        assert_eq!(
            kotlin.class_name_of("    internal data class Point(val x: Int)"),
            Some("Point".into())
        );
        assert!(!kotlin.is_class_header("// class IntSample {"));
        assert!(!kotlin.is_class_header(" * class IntSample"));
        assert!(!kotlin.is_class_header("val type = String::class.java"));
        assert!(!kotlin.is_class_header("class lowercase"));

        assert_eq!(
            Language::Java.class_name_of("public final class StringSample {"),
            Some("StringSample".into())
        );
    }

    #[test]
    fn test_kotlin_function_headers() {
        let header = Language::Kotlin.function_header("    fun addition() {").unwrap();
        assert_eq!(header.name, "addition");
        assert_eq!(header.shape, FunctionShape::Block { rest: String::new() });

        let header = Language::Kotlin
            .function_header("fun addition(): Unit = check(1 + 2 == 3)")
            .unwrap();
        assert_eq!(
            header.shape,
            FunctionShape::Expression {
                expr: "check(1 + 2 == 3)".into()
            }
        );

        let header = Language::Kotlin
            .function_header("fun mapping(): List<Int> = listOf(1).map { it + 1 }")
            .unwrap();
        assert_eq!(header.name, "mapping");
        assert!(matches!(header.shape, FunctionShape::Expression { .. }));

        let header = Language::Kotlin
            .function_header("fun empty(): Unit {}")
            .unwrap();
        assert_eq!(header.shape, FunctionShape::Block { rest: "}".into() });

        assert!(!Language::Kotlin.is_function_header("fun withArg(x: Int) {"));
        assert!(!Language::Kotlin.is_function_header("// fun commented() {"));
    }

    #[test]
    fn test_java_function_headers() {
        let header = Language::Java
            .function_header("    public void concatenation() {")
            .unwrap();
        assert_eq!(header.name, "concatenation");
        assert!(!Language::Java.is_function_header("void run() = go()"));
        assert!(!Language::Java.is_function_header("fun addition() {"));
    }

    #[test]
    fn test_public_class_declaration() {
        assert!(Language::Kotlin.is_public_class_declaration("class IntSample {"));
        assert!(Language::Kotlin.is_public_class_declaration("public class IntSample {"));
        assert!(!Language::Kotlin.is_public_class_declaration("internal class IntSample {"));
        assert!(!Language::Kotlin.is_public_class_declaration("private class IntSample {"));

        assert!(Language::Java.is_public_class_declaration("public class IntSample {"));
        assert!(!Language::Java.is_public_class_declaration("class IntSample {"));
        assert!(!Language::Java.is_public_class_declaration("private class IntSample {"));
    }

    #[test]
    fn test_package_identifier() {
        assert_eq!(
            Language::Kotlin.package_identifier_of("package org.kotools.types"),
            Some("org.kotools.types".into())
        );
        assert_eq!(
            Language::Java.package_identifier_of("package org.kotools.types;"),
            Some("org.kotools.types".into())
        );
        assert_eq!(Language::Kotlin.package_identifier_of("import kotlin.test"), None);
    }

    #[test]
    fn test_annotated_headers() {
        let header = Language::Kotlin
            .function_header("    @Test fun addition() {")
            .unwrap();
        assert_eq!(header.name, "addition");
        assert_eq!(header.shape, FunctionShape::Block { rest: String::new() });

        let header = Language::Kotlin
            .function_header("@Suppress(\"unused\") @Test fun addition(): Unit = check(true)")
            .unwrap();
        assert_eq!(
            header.shape,
            FunctionShape::Expression {
                expr: "check(true)".into()
            }
        );

        let header = Language::Java
            .function_header("    @Test public void concatenation() {")
            .unwrap();
        assert_eq!(header.name, "concatenation");

        assert_eq!(
            Language::Kotlin.class_name_of("@Suppress(\"unused\") class IntSample {"),
            Some("IntSample".into())
        );
        assert!(!Language::Kotlin.is_public_class_declaration("@Suppress(\"unused\") internal class IntSample {"));
        assert!(Language::Java.is_public_class_declaration("@Deprecated public class StringSample {"));
        assert!(!Language::Kotlin.is_function_header("@Test"));
    }

    #[test]
    fn test_markdown_tag() {
        assert_eq!(Language::Kotlin.markdown_tag(), "kotlin");
        assert_eq!(Language::Java.markdown_tag(), "java");
    }
}
