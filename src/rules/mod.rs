//! Rule abstraction and the built-in GDScript checks.
//!
//! Every rule scans the raw file text line by line. Lines are produced by
//! splitting on `'\n'` only, so a stray `'\r'` from mixed line endings stays part
//! of the line and counts towards its length.

mod performance;
mod readability;
mod security;
mod violation;

pub use performance::{
    GetNodeInProcessRule, ProcessInLoopRule, StringConcatenationInLoopRule,
    UnusedSignalConnectionRule,
};
pub use readability::{
    DEFAULT_MAX_LINE_LENGTH, InconsistentIndentationRule, LineTooLongRule,
    MissingClassDocstringRule, MissingFunctionDocstringRule,
};
pub use security::{HardcodedPasswordRule, InsecureRandomRule, SqlInjectionRiskRule, UnsafeEvalRule};
pub use violation::{Category, Severity, Violation};

use std::path::Path;

/// Default snippet width, in characters.
const SNIPPET_WIDTH: usize = 50;

/// Capability shared by every check.
///
/// `check` must be a pure function of its input: each call starts from fresh
/// scan state and returns an empty list rather than failing on odd input.
pub trait Rule: Send + Sync {
    /// Stable short code, e.g. `"P004"`.
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> String;

    fn severity(&self) -> Severity;

    fn category(&self) -> Category;

    fn is_enabled(&self) -> bool {
        true
    }

    /// Scan one file's full text and report violations in discovery order.
    fn check(&self, path: &Path, content: &str) -> Vec<Violation>;
}

/// Splits file text on line feeds, keeping any carriage returns.
pub(crate) fn lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split('\n').enumerate().map(|(i, line)| (i + 1, line))
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.trim().starts_with('#')
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Number of leading whitespace characters.
pub(crate) fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

pub(crate) fn char_len(line: &str) -> usize {
    line.chars().count()
}

pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    text.char_indices().nth(max).map_or(text, |(idx, _)| &text[..idx])
}

/// Trimmed line cut to the default snippet width.
pub(crate) fn snippet(line: &str) -> String {
    truncate_chars(line.trim(), SNIPPET_WIDTH).to_string()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
