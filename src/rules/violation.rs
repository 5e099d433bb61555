use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Readability,
    Security,
    Performance,
    Maintainability,
    BestPractices,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Readability => "readability",
            Self::Security => "security",
            Self::Performance => "performance",
            Self::Maintainability => "maintainability",
            Self::BestPractices => "best_practices",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One detected issue, tied to the rule that found it and a 1-based line.
///
/// Rule identity fields are copied from the emitting rule by [`Violation::new`],
/// so they always agree with the rule's declared values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub file_path: PathBuf,
    pub line_number: usize,
    pub column: Option<usize>,
    pub code_snippet: Option<String>,
}

impl Violation {
    #[must_use]
    pub fn new(
        rule: &(impl Rule + ?Sized),
        path: &Path,
        line_number: usize,
        message: String,
    ) -> Self {
        Self {
            rule_id: rule.id(),
            rule_name: rule.name(),
            severity: rule.severity(),
            category: rule.category(),
            message,
            file_path: path.to_path_buf(),
            line_number,
            column: None,
            code_snippet: None,
        }
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.code_snippet = Some(snippet.into());
        self
    }

    #[must_use]
    pub const fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}
