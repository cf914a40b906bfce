use crate::config::ExtractorConfig;
use crate::error::{Result, SampleError};
use crate::identifier::SampleIdentifier;
use crate::language::{is_comment, FunctionShape, Language};
use crate::sample::Sample;
use std::collections::HashSet;
use std::path::Path;

/// Line-oriented recognizer for single-class sample sources.
///
/// The scanner understands a narrow subset of Kotlin and Java: an optional
/// package declaration, one class, and parameterless member functions whose
/// bodies become samples. Everything else at class level is only brace-counted.
#[derive(Debug, Clone)]
pub struct StructuralScanner {
    language: Language,
    placeholder: String,
}

impl StructuralScanner {
    pub fn new(language: Language, config: &ExtractorConfig) -> Self {
        Self {
            language,
            placeholder: config.placeholder.clone(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Extract every member function of the file as a sample.
    ///
    /// Samples keep source order; a repeated identifier keeps its first body.
    pub fn scan(&self, path: &Path, text: &str) -> Result<Vec<Sample>> {
        let mut state = ScanState::new(self, path);
        for line in text.lines() {
            state.line(line)?;
        }
        if state.in_function {
            log::warn!(
                "Unterminated function body at end of {}",
                path.display()
            );
        }
        log::debug!("Found {} samples in {}", state.samples.len(), path.display());
        Ok(state.samples)
    }

    /// Fails unless exactly one class header exists in the file
    pub fn check_single_class(&self, path: &Path, text: &str) -> Result<()> {
        let count = text
            .lines()
            .filter(|line| self.language.is_class_header(line))
            .count();
        if count == 1 {
            Ok(())
        } else {
            Err(SampleError::NotSingleClass {
                path: path.display().to_string(),
                count,
            })
        }
    }

    /// Fails unless some class header is public for the language
    pub fn check_public_class(&self, path: &Path, text: &str) -> Result<()> {
        if text
            .lines()
            .any(|line| self.language.is_public_class_declaration(line))
        {
            Ok(())
        } else {
            Err(SampleError::NoPublicClass {
                path: path.display().to_string(),
            })
        }
    }

    /// Every convention violation of one source, in a stable order
    pub fn check_source(&self, path: &Path, text: &str) -> Vec<SampleError> {
        let mut violations = Vec::new();
        if let Err(err) = self.check_single_class(path, text) {
            violations.push(err);
        }
        if let Err(err) = self.check_public_class(path, text) {
            violations.push(err);
        }
        violations
    }
}

struct ScanState<'a> {
    scanner: &'a StructuralScanner,
    path: &'a Path,
    segments: Vec<String>,
    class_open: bool,
    class_depth: usize,
    classes_seen: usize,
    in_function: bool,
    function_depth: usize,
    /// The open body is a Kotlin expression whose closing brace belongs to the sample
    expression_body: bool,
    in_block_comment: bool,
    body: Vec<String>,
    seen: HashSet<SampleIdentifier>,
    samples: Vec<Sample>,
}

impl<'a> ScanState<'a> {
    fn new(scanner: &'a StructuralScanner, path: &'a Path) -> Self {
        Self {
            scanner,
            path,
            segments: Vec::new(),
            class_open: false,
            class_depth: 0,
            classes_seen: 0,
            in_function: false,
            function_depth: 0,
            expression_body: false,
            in_block_comment: false,
            body: Vec::new(),
            seen: HashSet::new(),
            samples: Vec::new(),
        }
    }

    fn line(&mut self, line: &str) -> Result<()> {
        if self.in_function {
            self.body_fragment(line)
        } else {
            self.class_level(line)
        }
    }

    /// Text outside any function body; may be a tail left by a header or a closing brace.
    fn class_level(&mut self, fragment: &str) -> Result<()> {
        let trimmed = fragment.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            return Ok(());
        }
        let language = self.scanner.language;

        if let Some(package) = language.package_identifier_of(trimmed) {
            self.segments
                .extend(package.split('.').map(str::to_string));
            return Ok(());
        }

        if let Some(name) = language.class_name_of(trimmed) {
            if self.classes_seen > 0 {
                return Err(SampleError::MultipleClasses {
                    path: self.path_text(),
                });
            }
            self.classes_seen += 1;
            self.segments.push(name);
            self.class_open = true;
            if let Some(index) = trimmed.find('{') {
                self.class_depth = 1;
                return self.class_level(&trimmed[index + 1..]);
            }
            return Ok(());
        }

        if let Some(header) = language.function_header(trimmed) {
            if self.class_depth == 0 {
                return Err(SampleError::TopLevelFunction {
                    path: self.path_text(),
                });
            }
            self.segments.push(header.name);
            return match header.shape {
                FunctionShape::Block { rest } => {
                    self.in_function = true;
                    self.function_depth = 1;
                    self.body_fragment(&rest)
                }
                FunctionShape::Expression { expr } => {
                    let (expr, closed) = strip_unbalanced_closers(&expr);
                    let open = unclosed_braces(expr);
                    if open > 0 {
                        // header indentation anchors the de-indent of the following lines
                        let indent = &fragment[..fragment.len() - fragment.trim_start().len()];
                        self.body.push(format!("{indent}{expr}"));
                        self.in_function = true;
                        self.expression_body = true;
                        self.function_depth = open;
                        return Ok(());
                    }
                    self.body.push(expr.to_string());
                    self.emit()?;
                    for _ in 0..closed {
                        self.close_class_brace();
                    }
                    Ok(())
                }
            };
        }

        for ch in trimmed.chars() {
            match ch {
                '{' if self.class_open => self.class_depth += 1,
                '}' => self.close_class_brace(),
                _ => {}
            }
        }
        Ok(())
    }

    fn body_fragment(&mut self, fragment: &str) -> Result<()> {
        if self.body_comment(fragment.trim()) {
            self.body.push(fragment.trim_end().to_string());
            return Ok(());
        }

        for (index, ch) in fragment.char_indices() {
            match ch {
                '{' => self.function_depth += 1,
                '}' => {
                    self.function_depth -= 1;
                    if self.function_depth == 0 {
                        let end = if self.expression_body { index + 1 } else { index };
                        let kept = &fragment[..end];
                        if !kept.trim().is_empty() {
                            self.body.push(kept.trim_end().to_string());
                        }
                        self.in_function = false;
                        self.expression_body = false;
                        self.emit()?;
                        return self.class_level(&fragment[index + 1..]);
                    }
                }
                _ => {}
            }
        }

        if !(self.body.is_empty() && fragment.trim().is_empty()) {
            self.body.push(fragment.trim_end().to_string());
        }
        Ok(())
    }

    /// Whether a body line is a comment; its braces are not counted.
    ///
    /// A line starting with `*` is only a comment inside an open `/* */` block,
    /// elsewhere it continues an expression.
    fn body_comment(&mut self, trimmed: &str) -> bool {
        if self.in_block_comment {
            self.in_block_comment = !trimmed.contains("*/");
            return true;
        }
        if let Some(rest) = trimmed.strip_prefix("/*") {
            self.in_block_comment = !rest.contains("*/");
            return true;
        }
        trimmed.starts_with("//")
    }

    /// Turn the buffered body into a sample and pop the function segment
    fn emit(&mut self) -> Result<()> {
        let identifier = SampleIdentifier::from_segments(&self.segments)?;
        self.segments.pop();
        let body = trim_indent(&std::mem::take(&mut self.body));

        if !self.seen.insert(identifier.clone()) {
            log::warn!(
                "Duplicate sample {} in {}, keeping the first one",
                identifier,
                self.path.display()
            );
            return Ok(());
        }
        self.samples.push(Sample::new(
            identifier,
            body,
            self.scanner.language,
            &self.scanner.placeholder,
        ));
        Ok(())
    }

    fn close_class_brace(&mut self) {
        if self.class_depth == 0 {
            return;
        }
        self.class_depth -= 1;
        if self.class_depth == 0 && self.class_open {
            self.class_open = false;
            self.segments.pop();
        }
    }

    fn path_text(&self) -> String {
        self.path.display().to_string()
    }
}

/// Split trailing `}` that close enclosing scopes off an expression body
fn strip_unbalanced_closers(expr: &str) -> (&str, usize) {
    let mut expr = expr.trim_end();
    let mut closed = 0;
    loop {
        let opens = expr.matches('{').count();
        let closes = expr.matches('}').count();
        if closes <= opens || !expr.ends_with('}') {
            return (expr, closed);
        }
        expr = expr[..expr.len() - 1].trim_end();
        closed += 1;
    }
}

fn unclosed_braces(expr: &str) -> usize {
    let opens = expr.matches('{').count();
    let closes = expr.matches('}').count();
    opens.saturating_sub(closes)
}

/// Remove the common leading whitespace and the surrounding blank lines
fn trim_indent(lines: &[String]) -> String {
    let Some(first) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or(first);
    let lines = &lines[first..=last];

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indentation(line))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading spaces and tabs, in bytes
fn indentation(line: &str) -> usize {
    line.bytes()
        .take_while(|byte| *byte == b' ' || *byte == b'\t')
        .count()
}
