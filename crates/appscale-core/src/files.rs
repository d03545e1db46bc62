//! File access seam for the deployment helpers
//!
//! Every helper that touches the filesystem reads through a [`FileReader`]
//! so tests can substitute an in-memory double without patching global
//! state. Two implementations are provided:
//!
//! - [`FsReader`]: real filesystem access
//! - [`MockFileReader`]: in-memory files for testing

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Trait for reading configuration files
pub trait FileReader: Send + Sync {
    /// Read the full contents of a file as a UTF-8 string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;
}

/// Filesystem-backed reader
///
/// This is the default reader used by the CLI. Each call is a fresh read;
/// nothing is cached between invocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Mock file reader for testing
///
/// Stores file contents in memory, keyed by path.
#[derive(Debug, Default, Clone)]
pub struct MockFileReader {
    files: HashMap<PathBuf, String>,
}

impl MockFileReader {
    /// Create a new empty mock reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock filesystem
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl FileReader for MockFileReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no mock file at {}", path.display()),
            )
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
