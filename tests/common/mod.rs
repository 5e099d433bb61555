#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the gdsmell binary.
#[macro_export]
macro_rules! gdsmell {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("gdsmell"))
    };
}

/// A clean GDScript file: only underscore-prefixed functions, tab indentation.
pub const CLEAN_SCRIPT: &str = "extends Node\n\nfunc _ready():\n\tpass\n";

/// Triggers exactly one Error-level violation (S001).
pub const SECRET_SCRIPT: &str = "var password = \"secret123\"\n";

/// Triggers exactly one Warning-level violation (P004).
pub const PROCESS_SCRIPT: &str = "func _process(delta):\n\tvar player = get_node(\"Player\")\n";

/// Triggers exactly one Info-level violation (R003).
pub const UNDOCUMENTED_SCRIPT: &str = "func jump():\n\tpass\n";

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a `.gdsmell.json` project config.
    pub fn create_config(&self, content: &str) {
        self.create_file(".gdsmell.json", content);
    }

    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
