use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use crate::engine::summarize;
use crate::error::Result;
use crate::rules::{Severity, Violation};

use super::{ColorMode, OutputFormatter, ansi};

/// Human-readable report grouped by file.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn severity_icon(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
        }
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
            Severity::Info => ansi::BLUE,
        }
    }

    fn colorize_with_color(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_violation(&self, violation: &Violation, output: &mut String) {
        let icon = self.colorize_with_color(
            Self::severity_icon(violation.severity),
            Self::severity_color(violation.severity),
        );
        let rule_id = self.colorize_with_color(violation.rule_id, ansi::CYAN);

        let _ = writeln!(
            output,
            "  {icon} Line {}: [{rule_id}] {}",
            violation.line_number, violation.message
        );
        let _ = writeln!(output, "    Category: {}", violation.category);
    }

    fn format_summary(&self, violations: &[Violation], output: &mut String) {
        let summary = summarize(violations);
        let errors = self.colorize_with_color(
            &summary.severity_count(Severity::Error.as_str()).to_string(),
            ansi::RED,
        );
        let warnings = self.colorize_with_color(
            &summary.severity_count(Severity::Warning.as_str()).to_string(),
            ansi::YELLOW,
        );
        let infos = self.colorize_with_color(
            &summary.severity_count(Severity::Info.as_str()).to_string(),
            ansi::BLUE,
        );

        let _ = writeln!(output, "Summary:");
        let _ = writeln!(output, "  Total issues: {}", summary.total);
        let _ = writeln!(output, "  Errors: {errors}");
        let _ = writeln!(output, "  Warnings: {warnings}");
        let _ = writeln!(output, "  Info: {infos}");
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, violations: &[Violation]) -> Result<String> {
        if violations.is_empty() {
            let check = self.colorize_with_color("✓", ansi::GREEN);
            return Ok(format!("{check} No issues found!\n"));
        }

        let mut by_file: BTreeMap<&Path, Vec<&Violation>> = BTreeMap::new();
        for violation in violations {
            by_file
                .entry(violation.file_path.as_path())
                .or_default()
                .push(violation);
        }

        let mut output = String::new();
        let _ = writeln!(output, "Found {} issue(s):", violations.len());

        for (path, mut file_violations) in by_file {
            // Stable: same-line violations keep rule order
            file_violations.sort_by_key(|v| v.line_number);

            let header = self.colorize_with_color(&format!("{}:", path.display()), ansi::BOLD);
            let _ = writeln!(output, "\n{header}");
            for violation in file_violations {
                self.format_violation(violation, &mut output);
            }
        }

        output.push('\n');
        self.format_summary(violations, &mut output);

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
