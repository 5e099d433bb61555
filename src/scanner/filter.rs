//! Decides which files a directory scan hands to the engine.
//!
//! GDScript sources use the `gd` extension by default. Godot keeps generated
//! copies of project files in its import cache (`.godot/` in Godot 4,
//! `.import/` in Godot 3); anything under those directories is never
//! analyzed, whatever the exclude globs say.

use std::path::{Component, Path};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{GdsmellError, Result};

/// Directories Godot fills with engine-generated files.
const IMPORT_CACHE_DIRS: &[&str] = &[".godot", ".import"];

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

fn in_import_cache(path: &Path) -> bool {
    path.components().any(|component| {
        matches!(component, Component::Normal(name)
            if name.to_str().is_some_and(|name| IMPORT_CACHE_DIRS.contains(&name)))
    })
}

/// Accepts script files by extension and rejects user excludes such as
/// `**/addons/**` for vendored plugins.
pub struct GlobFilter {
    extensions: Vec<String>,
    excludes: GlobSet,
}

impl GlobFilter {
    /// Extensions may be written with or without the leading dot; an empty
    /// list accepts every extension.
    ///
    /// # Errors
    /// Returns `InvalidPattern` naming the first exclude glob that fails to parse.
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| GdsmellError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let excludes = builder
            .build()
            .map_err(|source| GdsmellError::InvalidPattern {
                pattern: exclude_patterns.join(", "),
                source,
            })?;

        let extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            extensions,
            excludes,
        })
    }

    fn is_script(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.is_script(path) && !in_import_cache(path) && !self.excludes.is_match(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
