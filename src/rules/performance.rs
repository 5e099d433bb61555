//! Performance checks.
//!
//! These rules need more context than a single line. Function bodies are
//! tracked by watching for the next `func` declaration, and loop bodies by a
//! stack of loop-header indentation widths: a code line closes every open loop
//! whose header is indented at least as deep as the line itself.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;

use super::{
    Category, Rule, Severity, Violation, indent_width, is_blank, is_comment, lines, snippet,
};

/// Engine callbacks invoked once per rendered frame or physics step.
const FRAME_CALLBACKS: &[&str] = &["_process", "_physics_process"];

/// Lines mentioning this are event wiring, not node lookups.
const EVENT_MARKER: &str = "event";

fn is_frame_callback(name: &str) -> bool {
    FRAME_CALLBACKS
        .iter()
        .any(|callback| callback.eq_ignore_ascii_case(name))
}

/// Indentation widths of the currently open `for`/`while` headers.
#[derive(Debug, Default)]
struct LoopStack {
    widths: Vec<usize>,
}

impl LoopStack {
    /// Pops every loop whose header is indented at least `width` deep.
    fn close_scopes(&mut self, width: usize) {
        while self.widths.last().is_some_and(|&open| open >= width) {
            self.widths.pop();
        }
    }

    fn open(&mut self, width: usize) {
        self.widths.push(width);
    }

    fn clear(&mut self) {
        self.widths.clear();
    }

    fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Recognizes the structural lines the stateful rules care about.
struct ScopePatterns {
    func_decl: Regex,
    loop_header: Regex,
}

impl ScopePatterns {
    fn new() -> Self {
        Self {
            func_decl: Regex::new(r"(?i)^func\s+(\w+)\s*\(").expect("Invalid regex"),
            loop_header: Regex::new(r"(?i)^(for|while)\s+").expect("Invalid regex"),
        }
    }

    /// Name of the function declared on this (trimmed) line, if any.
    fn function_name<'a>(&self, trimmed: &'a str) -> Option<&'a str> {
        self.func_decl
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn is_loop_header(&self, trimmed: &str) -> bool {
        self.loop_header.is_match(trimmed)
    }
}

/// A non-blank, non-comment line with its indentation precomputed.
struct CodeLine<'a> {
    number: usize,
    text: &'a str,
    trimmed: &'a str,
    width: usize,
}

fn code_lines(content: &str) -> impl Iterator<Item = CodeLine<'_>> {
    lines(content)
        .filter(|(_, line)| !is_blank(line) && !is_comment(line))
        .map(|(number, text)| CodeLine {
            number,
            text,
            trimmed: text.trim(),
            width: indent_width(text),
        })
}

/// P001: node lookups and instancing inside loops of per-frame callbacks.
pub struct ProcessInLoopRule {
    scope: ScopePatterns,
    expensive_patterns: Vec<Regex>,
}

impl Default for ProcessInLoopRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessInLoopRule {
    #[must_use]
    pub fn new() -> Self {
        let expensive_patterns = [
            r"get_node\s*\(",
            r"\$",
            r"find_node\s*\(",
            r"get_tree\s*\(",
            r"\b(instance|instantiate)\s*\(",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect();

        Self {
            scope: ScopePatterns::new(),
            expensive_patterns,
        }
    }
}

impl Rule for ProcessInLoopRule {
    fn id(&self) -> &'static str {
        "P001"
    }

    fn name(&self) -> &'static str {
        "Process in Loop"
    }

    fn description(&self) -> String {
        "Avoid expensive operations in loops within _process() or _physics_process()".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut callback: Option<&str> = None;
        let mut loops = LoopStack::default();

        for line in code_lines(content) {
            if let Some(name) = self.scope.function_name(line.trimmed) {
                callback = is_frame_callback(name).then_some(name);
            }

            loops.close_scopes(line.width);

            if let Some(name) = callback
                && !loops.is_empty()
                && self.expensive_patterns.iter().any(|p| p.is_match(line.text))
            {
                violations.push(
                    Violation::new(
                        self,
                        path,
                        line.number,
                        format!(
                            "Expensive operation in loop within {name}(). Cache results outside the loop"
                        ),
                    )
                    .with_snippet(snippet(line.text)),
                );
            }

            // A header belongs to the loops around it, not to its own body
            if self.scope.is_loop_header(line.trimmed) {
                loops.open(line.width);
            }
        }

        violations
    }
}

/// P002: `+=` with a string literal inside a loop body.
pub struct StringConcatenationInLoopRule {
    scope: ScopePatterns,
    concat_pattern: Regex,
}

impl Default for StringConcatenationInLoopRule {
    fn default() -> Self {
        Self::new()
    }
}

impl StringConcatenationInLoopRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: ScopePatterns::new(),
            concat_pattern: Regex::new(r#"\w+\s*\+=\s*["']"#).expect("Invalid regex"),
        }
    }
}

impl Rule for StringConcatenationInLoopRule {
    fn id(&self) -> &'static str {
        "P002"
    }

    fn name(&self) -> &'static str {
        "String Concatenation in Loop"
    }

    fn description(&self) -> String {
        "Avoid string concatenation in loops. Use Array.join() or PackedStringArray instead"
            .to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut loops = LoopStack::default();

        for line in code_lines(content) {
            if self.scope.function_name(line.trimmed).is_some() {
                loops.clear();
            }

            loops.close_scopes(line.width);

            if !loops.is_empty() && self.concat_pattern.is_match(line.text) {
                violations.push(
                    Violation::new(
                        self,
                        path,
                        line.number,
                        "String concatenation in loop detected. Use Array and join() for better performance"
                            .to_string(),
                    )
                    .with_snippet(snippet(line.text)),
                );
            }

            if self.scope.is_loop_header(line.trimmed) {
                loops.open(line.width);
            }
        }

        violations
    }
}

/// P003: signals connected with no matching `disconnect` in the same file.
///
/// A subscription is identified by its dotted target and signal name, so
/// `timer.connect("timeout", ...)` is only satisfied by
/// `timer.disconnect("timeout", ...)`.
///
/// The pair is kept as a tuple rather than joined into one string, so
/// `a.b` + `c` and `a` + `b.c` never collide.
pub struct UnusedSignalConnectionRule {
    bind_pattern: Regex,
    unbind_pattern: Regex,
}

impl Default for UnusedSignalConnectionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl UnusedSignalConnectionRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bind_pattern: Regex::new(r#"([A-Za-z_][\w.]*)\.connect\(\s*["']([^"']+)["']"#)
                .expect("Invalid regex"),
            unbind_pattern: Regex::new(r#"([A-Za-z_][\w.]*)\.disconnect\(\s*["']([^"']+)["']"#)
                .expect("Invalid regex"),
        }
    }

    fn subscriptions<'a>(
        pattern: &'a Regex,
        line: &'a str,
    ) -> impl Iterator<Item = (String, String)> + 'a {
        pattern.captures_iter(line).filter_map(|caps| {
            let target = caps.get(1)?.as_str().to_string();
            let signal = caps.get(2)?.as_str().to_string();
            Some((target, signal))
        })
    }
}

impl Rule for UnusedSignalConnectionRule {
    fn id(&self) -> &'static str {
        "P003"
    }

    fn name(&self) -> &'static str {
        "Signal Not Disconnected"
    }

    fn description(&self) -> String {
        "Signals connected with connect() should be disconnected in cleanup to prevent memory leaks"
            .to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        // First bind site per (target, signal), in order of first appearance
        let mut bound: IndexMap<(String, String), (usize, String)> = IndexMap::new();
        let mut unbound: HashSet<(String, String)> = HashSet::new();

        for (line_number, line) in lines(content) {
            if is_comment(line) {
                continue;
            }

            for key in Self::subscriptions(&self.bind_pattern, line) {
                bound
                    .entry(key)
                    .or_insert_with(|| (line_number, snippet(line)));
            }
            unbound.extend(Self::subscriptions(&self.unbind_pattern, line));
        }

        bound
            .into_iter()
            .filter(|(key, _)| !unbound.contains(key))
            .map(|((target, signal), (line_number, code))| {
                Violation::new(
                    self,
                    path,
                    line_number,
                    format!(
                        "Signal '{signal}' connected on '{target}' but never disconnected. \
                         Consider disconnecting in _exit_tree() to prevent memory leaks"
                    ),
                )
                .with_snippet(code)
            })
            .collect()
    }
}

/// P004: node lookups anywhere in a per-frame callback.
pub struct GetNodeInProcessRule {
    scope: ScopePatterns,
    shorthand_pattern: Regex,
}

impl Default for GetNodeInProcessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl GetNodeInProcessRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: ScopePatterns::new(),
            shorthand_pattern: Regex::new(r#"\$[\w"%]"#).expect("Invalid regex"),
        }
    }

    fn is_node_lookup(&self, line: &str) -> bool {
        if line.contains("get_node(") {
            return true;
        }

        self.shorthand_pattern.is_match(line) && !line.to_lowercase().contains(EVENT_MARKER)
    }
}

impl Rule for GetNodeInProcessRule {
    fn id(&self) -> &'static str {
        "P004"
    }

    fn name(&self) -> &'static str {
        "Get Node in Process"
    }

    fn description(&self) -> String {
        "Cache node references in _ready() instead of calling get_node() in _process()".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut callback: Option<&str> = None;

        for line in code_lines(content) {
            if let Some(name) = self.scope.function_name(line.trimmed) {
                callback = is_frame_callback(name).then_some(name);
            }

            let Some(name) = callback else {
                continue;
            };

            if self.is_node_lookup(line.text) {
                violations.push(
                    Violation::new(
                        self,
                        path,
                        line.number,
                        format!(
                            "get_node() or $ called in {name}(). Cache the reference in _ready() for better performance"
                        ),
                    )
                    .with_snippet(snippet(line.text)),
                );
            }
        }

        violations
    }
}

#[cfg(test)]
#[path = "performance_tests.rs"]
mod tests;
