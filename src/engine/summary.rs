use indexmap::IndexMap;
use serde::Serialize;

use crate::rules::Violation;

/// Aggregate counts over a set of violations.
///
/// Each map lists its keys in order of first appearance in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub by_severity: IndexMap<String, usize>,
    pub by_category: IndexMap<String, usize>,
    pub by_file: IndexMap<String, usize>,
}

impl Summary {
    /// Count for a severity token such as `"error"`; zero when absent.
    #[must_use]
    pub fn severity_count(&self, severity: &str) -> usize {
        self.by_severity.get(severity).copied().unwrap_or(0)
    }
}

#[must_use]
pub fn summarize(violations: &[Violation]) -> Summary {
    let mut summary = Summary {
        total: violations.len(),
        ..Summary::default()
    };

    for violation in violations {
        *summary
            .by_severity
            .entry(violation.severity.as_str().to_string())
            .or_insert(0) += 1;
        *summary
            .by_category
            .entry(violation.category.as_str().to_string())
            .or_insert(0) += 1;
        *summary
            .by_file
            .entry(violation.file_path.display().to_string())
            .or_insert(0) += 1;
    }

    summary
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
