use std::path::Path;

use regex::Regex;

use super::{Category, Rule, Severity, Violation, is_comment, lines, snippet};

/// Literal values that are clearly placeholders, compared case-insensitively.
const PASSWORD_PLACEHOLDERS: &[&str] = &[
    "password",
    "your_password",
    "your_password_here",
    "changeme",
];

/// Words that mark a random value as security-relevant.
const SECURITY_KEYWORDS: &[&str] = &[
    "token", "key", "password", "secret", "salt", "nonce", "session",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect()
}

/// S001: password-like variables assigned a string literal.
pub struct HardcodedPasswordRule {
    patterns: Vec<Regex>,
}

impl Default for HardcodedPasswordRule {
    fn default() -> Self {
        Self::new()
    }
}

impl HardcodedPasswordRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: compile(&[
                r#"(?i)password\s*=\s*["'](.+)["']"#,
                r#"(?i)passwd\s*=\s*["'](.+)["']"#,
                r#"(?i)pwd\s*=\s*["'](.+)["']"#,
            ]),
        }
    }

    fn is_real_secret(value: &str) -> bool {
        let lower = value.to_lowercase();
        !lower.is_empty() && !PASSWORD_PLACEHOLDERS.contains(&lower.as_str())
    }
}

impl Rule for HardcodedPasswordRule {
    fn id(&self) -> &'static str {
        "S001"
    }

    fn name(&self) -> &'static str {
        "Hardcoded Password"
    }

    fn description(&self) -> String {
        "Avoid hardcoding passwords in the code".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (line_number, line) in lines(content) {
            if is_comment(line) {
                continue;
            }

            let found = self.patterns.iter().any(|pattern| {
                pattern
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .is_some_and(|value| Self::is_real_secret(value.as_str()))
            });

            if found {
                violations.push(
                    Violation::new(
                        self,
                        path,
                        line_number,
                        "Hardcoded password detected. Use environment variables or secure storage instead"
                            .to_string(),
                    )
                    .with_snippet(snippet(line)),
                );
            }
        }

        violations
    }
}

/// S002: dynamic expression evaluation.
pub struct UnsafeEvalRule {
    patterns: Vec<Regex>,
}

impl Default for UnsafeEvalRule {
    fn default() -> Self {
        Self::new()
    }
}

impl UnsafeEvalRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: compile(&[r"(?i)Expression\.parse\s*\(", r"(?i)\.execute\s*\("]),
        }
    }
}

impl Rule for UnsafeEvalRule {
    fn id(&self) -> &'static str {
        "S002"
    }

    fn name(&self) -> &'static str {
        "Unsafe Eval/Execute"
    }

    fn description(&self) -> String {
        "Avoid using Expression.parse() or execute() with untrusted input".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        lines(content)
            .filter(|(_, line)| !is_comment(line))
            .filter(|(_, line)| self.patterns.iter().any(|p| p.is_match(line)))
            .map(|(line_number, line)| {
                Violation::new(
                    self,
                    path,
                    line_number,
                    "Potentially unsafe use of Expression.parse() or execute(). Ensure input is sanitized"
                        .to_string(),
                )
                .with_snippet(snippet(line))
            })
            .collect()
    }
}

/// S003: SQL statements assembled with format placeholders or concatenation.
pub struct SqlInjectionRiskRule {
    sql_concat_pattern: Regex,
}

impl Default for SqlInjectionRiskRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlInjectionRiskRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sql_concat_pattern: Regex::new(
                r"(?i)(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE).*(%s|%d|\+\s*\w+)",
            )
            .expect("Invalid regex"),
        }
    }
}

impl Rule for SqlInjectionRiskRule {
    fn id(&self) -> &'static str {
        "S003"
    }

    fn name(&self) -> &'static str {
        "SQL Injection Risk"
    }

    fn description(&self) -> String {
        "Avoid string concatenation in SQL queries".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        lines(content)
            .filter(|(_, line)| !is_comment(line) && self.sql_concat_pattern.is_match(line))
            .map(|(line_number, line)| {
                Violation::new(
                    self,
                    path,
                    line_number,
                    "Potential SQL injection risk. Use parameterized queries instead of string concatenation"
                        .to_string(),
                )
                .with_snippet(snippet(line))
            })
            .collect()
    }
}

/// S004: non-cryptographic random numbers feeding secrets.
pub struct InsecureRandomRule {
    random_call: Regex,
}

impl Default for InsecureRandomRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsecureRandomRule {
    #[must_use]
    pub fn new() -> Self {
        Self {
            random_call: Regex::new(r"\b(randi|randf|rand_range)\s*\(").expect("Invalid regex"),
        }
    }

    fn mentions_secret(line: &str) -> bool {
        let lower = line.to_lowercase();
        SECURITY_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }
}

impl Rule for InsecureRandomRule {
    fn id(&self) -> &'static str {
        "S004"
    }

    fn name(&self) -> &'static str {
        "Insecure Random"
    }

    fn description(&self) -> String {
        "Use Crypto.random_bytes() for security-critical randomness, not randi()/randf()"
            .to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, path: &Path, content: &str) -> Vec<Violation> {
        lines(content)
            .filter(|(_, line)| !is_comment(line))
            .filter(|(_, line)| self.random_call.is_match(line) && Self::mentions_secret(line))
            .map(|(line_number, line)| {
                Violation::new(
                    self,
                    path,
                    line_number,
                    "Using insecure random function for security-critical purpose. Use Crypto.random_bytes() instead"
                        .to_string(),
                )
                .with_snippet(snippet(line))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "security_tests.rs"]
mod tests;
