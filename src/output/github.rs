//! GitHub Actions workflow-command annotations.

use std::fmt::Write;

use crate::engine::summarize;
use crate::error::Result;
use crate::rules::{Severity, Violation};

use super::OutputFormatter;

pub struct GithubFormatter;

const fn annotation_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "notice",
    }
}

/// Escapes the message part of a workflow command.
fn escape_data(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a `key=value` property, where `,` and `:` are also delimiters.
fn escape_property(text: &str) -> String {
    escape_data(text).replace(':', "%3A").replace(',', "%2C")
}

impl OutputFormatter for GithubFormatter {
    fn format(&self, violations: &[Violation]) -> Result<String> {
        if violations.is_empty() {
            return Ok("✓ No issues found!\n".to_string());
        }

        let mut output = String::new();
        for v in violations {
            let _ = writeln!(
                output,
                "::{} file={},line={},title={}::{}",
                annotation_level(v.severity),
                escape_property(&v.file_path.display().to_string()),
                v.line_number,
                escape_property(&format!("[{}] {}", v.rule_id, v.rule_name)),
                escape_data(&v.message),
            );
        }

        let summary = summarize(violations);
        let _ = writeln!(output, "\n📊 Analysis Summary:");
        let _ = writeln!(output, "- Total issues: {}", summary.total);
        let _ = writeln!(output, "- Errors: {}", summary.severity_count("error"));
        let _ = writeln!(output, "- Warnings: {}", summary.severity_count("warning"));
        let _ = writeln!(output, "- Info: {}", summary.severity_count("info"));

        Ok(output)
    }
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
