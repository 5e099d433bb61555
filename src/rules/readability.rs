use std::path::Path;

use regex::Regex;

use super::{
    Category, Rule, Severity, Violation, char_len, indent_width, is_blank, is_comment, lines,
    truncate_chars,
};

pub const DEFAULT_MAX_LINE_LENGTH: usize = 100;

const LONG_LINE_SNIPPET_WIDTH: usize = 50;
const INDENT_SNIPPET_WIDTH: usize = 30;

/// R001: lines longer than the configured maximum.
pub struct LineTooLongRule {
    max_length: usize,
}

impl Default for LineTooLongRule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LENGTH)
    }
}

impl LineTooLongRule {
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Rule for LineTooLongRule {
    fn id(&self) -> &'static str {
        "R001"
    }

    fn name(&self) -> &'static str {
        "Line Too Long"
    }

    fn description(&self) -> String {
        format!("Lines should not exceed {} characters", self.max_length)
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Readability
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (line_number, line) in lines(content) {
            // Comment lines often hold long URLs
            if is_comment(line) {
                continue;
            }

            let length = char_len(line);
            if length <= self.max_length {
                continue;
            }

            let snippet = if length > LONG_LINE_SNIPPET_WIDTH {
                format!("{}...", truncate_chars(line, LONG_LINE_SNIPPET_WIDTH))
            } else {
                line.to_string()
            };

            violations.push(
                Violation::new(
                    self,
                    path,
                    line_number,
                    format!(
                        "Line exceeds {} characters (found {length})",
                        self.max_length
                    ),
                )
                .with_snippet(snippet),
            );
        }

        violations
    }
}

/// Whether the next non-blank line after `index` is a comment.
fn has_doc_comment(all_lines: &[&str], index: usize) -> bool {
    all_lines
        .iter()
        .skip(index + 1)
        .find(|line| !is_blank(line))
        .is_some_and(|line| is_comment(line))
}

/// R002: `class` declarations not followed by a comment.
pub struct MissingClassDocstringRule {
    class_pattern: Regex,
}

impl Default for MissingClassDocstringRule {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingClassDocstringRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            class_pattern: Regex::new(r"(?i)^\s*class\s+(\w+)").expect("Invalid regex"),
        }
    }
}

impl Rule for MissingClassDocstringRule {
    fn id(&self) -> &'static str {
        "R002"
    }

    fn name(&self) -> &'static str {
        "Missing Class Docstring"
    }

    fn description(&self) -> String {
        "Classes should have docstrings".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::Readability
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let all_lines: Vec<&str> = content.split('\n').collect();
        let mut violations = Vec::new();

        for (i, line) in all_lines.iter().enumerate() {
            let Some(caps) = self.class_pattern.captures(line) else {
                continue;
            };

            if has_doc_comment(&all_lines, i) {
                continue;
            }

            let class_name = caps.get(1).map_or("", |m| m.as_str());
            violations.push(
                Violation::new(
                    self,
                    path,
                    i + 1,
                    format!("Class '{class_name}' is missing a docstring"),
                )
                .with_snippet(line.trim()),
            );
        }

        violations
    }
}

/// R003: public `func` declarations not followed by a comment.
///
/// Names starting with `_` are private or engine callbacks and are exempt.
pub struct MissingFunctionDocstringRule {
    func_pattern: Regex,
}

impl Default for MissingFunctionDocstringRule {
    fn default() -> Self {
        Self::new()
    }
}

impl MissingFunctionDocstringRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            func_pattern: Regex::new(r"(?i)^\s*func\s+(\w+)\s*\(").expect("Invalid regex"),
        }
    }
}

impl Rule for MissingFunctionDocstringRule {
    fn id(&self) -> &'static str {
        "R003"
    }

    fn name(&self) -> &'static str {
        "Missing Function Docstring"
    }

    fn description(&self) -> String {
        "Public functions should have docstrings".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::Readability
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let all_lines: Vec<&str> = content.split('\n').collect();
        let mut violations = Vec::new();

        for (i, line) in all_lines.iter().enumerate() {
            let Some(caps) = self.func_pattern.captures(line) else {
                continue;
            };

            let func_name = caps.get(1).map_or("", |m| m.as_str());
            if func_name.starts_with('_') || has_doc_comment(&all_lines, i) {
                continue;
            }

            violations.push(
                Violation::new(
                    self,
                    path,
                    i + 1,
                    format!("Function '{func_name}' is missing a docstring"),
                )
                .with_snippet(line.trim()),
            );
        }

        violations
    }
}

/// R004: tabs and spaces both used for indentation somewhere in the file.
///
/// Reports once, at the first line where both have been seen.
#[derive(Default)]
pub struct InconsistentIndentationRule;

impl Rule for InconsistentIndentationRule {
    fn id(&self) -> &'static str {
        "R004"
    }

    fn name(&self) -> &'static str {
        "Inconsistent Indentation"
    }

    fn description(&self) -> String {
        "Indentation should be consistent (tabs or spaces, not mixed)".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Readability
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let mut uses_tabs = false;
        let mut uses_spaces = false;

        for (line_number, line) in lines(content) {
            if !line.starts_with(char::is_whitespace) {
                continue;
            }

            let leading: String = line.chars().take(indent_width(line)).collect();
            uses_tabs |= leading.contains('\t');
            uses_spaces |= leading.contains(' ');

            if uses_tabs && uses_spaces {
                return vec![
                    Violation::new(
                        self,
                        path,
                        line_number,
                        "Mixing tabs and spaces for indentation".to_string(),
                    )
                    .with_snippet(truncate_chars(line, INDENT_SNIPPET_WIDTH)),
                ];
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
#[path = "readability_tests.rs"]
mod tests;
