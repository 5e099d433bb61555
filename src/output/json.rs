use serde::Serialize;

use crate::engine::{Summary, summarize};
use crate::error::Result;
use crate::rules::Violation;

use super::OutputFormatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    violations: Vec<JsonViolation<'a>>,
    summary: Summary,
}

#[derive(Serialize)]
struct JsonViolation<'a> {
    rule_id: &'a str,
    rule_name: &'a str,
    severity: &'a str,
    category: &'a str,
    message: &'a str,
    file: String,
    line: usize,
    column: Option<usize>,
    code_snippet: Option<&'a str>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, violations: &[Violation]) -> Result<String> {
        let output = JsonOutput {
            violations: violations.iter().map(convert_violation).collect(),
            summary: summarize(violations),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_violation(violation: &Violation) -> JsonViolation<'_> {
    JsonViolation {
        rule_id: violation.rule_id,
        rule_name: violation.rule_name,
        severity: violation.severity.as_str(),
        category: violation.category.as_str(),
        message: &violation.message,
        file: violation.file_path.display().to_string(),
        line: violation.line_number,
        column: violation.column,
        code_snippet: violation.code_snippet.as_deref(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
