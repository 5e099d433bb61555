mod summary;

pub use summary::{Summary, summarize};

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::Config;
use crate::error::{GdsmellError, Result};
use crate::rules::{
    GetNodeInProcessRule, HardcodedPasswordRule, InconsistentIndentationRule, InsecureRandomRule,
    LineTooLongRule, MissingClassDocstringRule, MissingFunctionDocstringRule, ProcessInLoopRule,
    Rule, SqlInjectionRiskRule, StringConcatenationInLoopRule, UnsafeEvalRule,
    UnusedSignalConnectionRule, Violation,
};
use crate::scanner::{DirectoryScanner, FileScanner, GlobFilter};

/// Every built-in rule, in reporting order.
fn builtin_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    vec![
        // Readability
        Box::new(LineTooLongRule::new(config.max_line_length)),
        Box::new(MissingClassDocstringRule::new()),
        Box::new(MissingFunctionDocstringRule::new()),
        Box::new(InconsistentIndentationRule),
        // Security
        Box::new(HardcodedPasswordRule::new()),
        Box::new(UnsafeEvalRule::new()),
        Box::new(SqlInjectionRiskRule::new()),
        Box::new(InsecureRandomRule::new()),
        // Performance
        Box::new(ProcessInLoopRule::new()),
        Box::new(StringConcatenationInLoopRule::new()),
        Box::new(UnusedSignalConnectionRule::new()),
        Box::new(GetNodeInProcessRule::new()),
    ]
}

/// Outcome of analyzing a file or directory.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub violations: Vec<Violation>,
    /// Files that could not be read or decoded; analysis continued without them.
    pub skipped: Vec<GdsmellError>,
    pub files_analyzed: usize,
}

/// Applies an ordered set of enabled rules to GDScript sources.
pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
    extensions: Vec<String>,
    exclude: Vec<String>,
    respect_gitignore: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let rules = builtin_rules(config)
            .into_iter()
            .filter(|rule| !config.is_rule_disabled(rule.id()))
            .collect();

        Self {
            rules,
            extensions: config.extensions.clone(),
            exclude: config.exclude.clone(),
            respect_gitignore: config.respect_gitignore,
        }
    }

    /// The enabled rules, in the order they are applied.
    #[must_use]
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Runs every enabled rule over one file's text and concatenates the results.
    #[must_use]
    pub fn check_content(&self, path: &Path, content: &str) -> Vec<Violation> {
        self.rules
            .iter()
            .filter(|rule| rule.is_enabled())
            .flat_map(|rule| rule.check(path, content))
            .collect()
    }

    /// Reads and checks a single file.
    ///
    /// # Errors
    /// Returns `FileRead` if the file cannot be read or is not valid UTF-8.
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>> {
        let content = std::fs::read_to_string(path).map_err(|source| GdsmellError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.check_content(path, &content))
    }

    /// Lists the source files under `path`: the path itself for a file, or a
    /// recursive, name-sorted walk for a directory.
    ///
    /// # Errors
    /// Returns `InvalidPath` if `path` is neither a file nor a directory, or
    /// `InvalidPattern` if an exclude glob is malformed.
    pub fn collect_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }
        if !path.is_dir() {
            return Err(GdsmellError::InvalidPath(path.to_path_buf()));
        }

        let filter = GlobFilter::new(self.extensions.clone(), &self.exclude)?;
        DirectoryScanner::with_gitignore(filter, self.respect_gitignore).scan(path)
    }

    /// Checks `files` in parallel, keeping the input order in the result.
    ///
    /// `on_file` is called once per file as it completes.
    pub fn analyze_files<F>(&self, files: &[PathBuf], on_file: F) -> AnalysisReport
    where
        F: Fn() + Sync,
    {
        let outcomes: Vec<Result<Vec<Violation>>> = files
            .par_iter()
            .map(|file| {
                let outcome = self.analyze_file(file);
                on_file();
                outcome
            })
            .collect();

        let mut report = AnalysisReport {
            files_analyzed: files.len(),
            ..AnalysisReport::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(violations) => report.violations.extend(violations),
                Err(err) => {
                    report.files_analyzed -= 1;
                    report.skipped.push(err);
                }
            }
        }

        report
    }

    /// Analyzes a file or a directory tree.
    ///
    /// A single unreadable file given directly is an error; inside a directory,
    /// unreadable files are skipped and listed in [`AnalysisReport::skipped`].
    ///
    /// # Errors
    /// Returns `InvalidPath` if `path` is neither a file nor a directory.
    pub fn analyze(&self, path: &Path) -> Result<AnalysisReport> {
        if path.is_file() {
            return Ok(AnalysisReport {
                violations: self.analyze_file(path)?,
                skipped: Vec::new(),
                files_analyzed: 1,
            });
        }

        let files = self.collect_files(path)?;
        Ok(self.analyze_files(&files, || {}))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
