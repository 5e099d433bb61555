//! Operator diagnostics on stderr.
//!
//! Format: `✖ Type: message` or `⚠ Warning: message`, optionally followed by
//! `× detail` and `help: suggestion` lines.

use std::io::{IsTerminal, Write};

use crate::error::GdsmellError;

use super::ColorMode;
use super::ansi;

/// Writes errors and warnings to stderr, colored when the terminal allows.
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    /// Creates an error output formatter that auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            // Presence of NO_COLOR (any value) disables color, per https://no-color.org
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
            }
        }
    }

    /// Prints a crate error with its cause and a hint for fixing it.
    pub fn report(&self, err: &GdsmellError) {
        let mut stderr = std::io::stderr().lock();
        self.write_report(&mut stderr, err);
    }

    /// Prints a crate error as a warning, for problems the run recovers from.
    pub fn report_as_warning(&self, err: &GdsmellError) {
        let mut stderr = std::io::stderr().lock();
        let detail = err.detail();
        self.write_warning(
            &mut stderr,
            &err.to_string(),
            detail.as_deref(),
            suggestion_for(err),
        );
    }

    pub fn print_error(&self, error_type: &str, message: &str, suggestion: Option<&str>) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(&mut stderr, error_type, message, None, suggestion);
    }

    pub fn print_warning(&self, message: &str, suggestion: Option<&str>) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message, None, suggestion);
    }

    pub fn print_info(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        self.write_info(&mut stderr, message, None, None);
    }

    pub fn write_report<W: Write>(&self, w: &mut W, err: &GdsmellError) {
        let detail = err.detail();
        self.write_error(
            w,
            err.error_type(),
            &err.to_string(),
            detail.as_deref(),
            suggestion_for(err),
        );
    }

    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        let heading = format!("✖ {error_type}:");
        self.write_block(w, &heading, ansi::RED, message, detail, suggestion);
    }

    pub fn write_warning<W: Write>(
        &self,
        w: &mut W,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        self.write_block(w, "⚠ Warning:", ansi::YELLOW, message, detail, suggestion);
    }

    pub fn write_info<W: Write>(
        &self,
        w: &mut W,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        self.write_block(w, "ℹ", ansi::CYAN, message, detail, suggestion);
    }

    // Write failures on stderr are ignored: there is nowhere left to report them.
    fn write_block<W: Write>(
        &self,
        w: &mut W,
        heading: &str,
        color: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        if self.use_colors {
            let _ = writeln!(w, "{}{color}{heading}{} {message}", ansi::BOLD, ansi::RESET);
        } else {
            let _ = writeln!(w, "{heading} {message}");
        }

        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

const fn suggestion_for(err: &GdsmellError) -> Option<&'static str> {
    match err {
        GdsmellError::InvalidPath(_) => Some("Pass an existing .gd file or project directory"),
        GdsmellError::FileRead { .. } => Some("Check that the file exists and is UTF-8 encoded"),
        GdsmellError::ConfigLoad { .. } | GdsmellError::Config(_) => {
            Some("Run `gdsmell config validate` to check the configuration")
        }
        GdsmellError::InvalidPattern { .. } => {
            Some("Exclude patterns use glob syntax, e.g. \"**/addons/**\"")
        }
        GdsmellError::Io(_) | GdsmellError::JsonSerialize(_) => None,
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
