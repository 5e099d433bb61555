use serde::{Deserialize, Serialize};

use crate::error::{GdsmellError, Result};
use crate::rules::DEFAULT_MAX_LINE_LENGTH;

/// Analyzer settings. Every key is optional in a config file; unknown keys
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Longest allowed line for R001, in characters.
    pub max_line_length: usize,

    /// Rule ids (e.g. `"R003"`) that are never run.
    pub disabled_rules: Vec<String>,

    /// File extensions picked up when scanning a directory.
    pub extensions: Vec<String>,

    /// Glob patterns for files to skip when scanning a directory.
    pub exclude: Vec<String>,

    /// Skip files ignored by `.gitignore` when scanning a directory.
    pub respect_gitignore: bool,

    /// Treat warnings as failures for the exit code.
    pub fail_on_warning: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            disabled_rules: Vec::new(),
            extensions: vec!["gd".to_string()],
            exclude: Vec::new(),
            respect_gitignore: false,
            fail_on_warning: false,
        }
    }
}

impl Config {
    /// Rule ids are compared case-insensitively.
    #[must_use]
    pub fn is_rule_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules
            .iter()
            .any(|id| id.trim().eq_ignore_ascii_case(rule_id))
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    /// Returns `Config` if `max_line_length` is zero or an extension is empty.
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == 0 {
            return Err(GdsmellError::Config(
                "max_line_length must be greater than 0".to_string(),
            ));
        }
        if self
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(GdsmellError::Config(
                "extensions must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
