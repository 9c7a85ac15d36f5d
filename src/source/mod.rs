//! Source snapshots - immutable captures of a file at one instant

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Encoding marker used for every snapshot read from disk
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A file's root-relative path and text content at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    path: PathBuf,
    content: String,
    encoding: String,
    modified: bool,
}

impl SourceSnapshot {
    /// Create an unmodified UTF-8 snapshot
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            encoding: DEFAULT_ENCODING.to_string(),
            modified: false,
        }
    }

    /// Read `relative` under `root` as text.
    ///
    /// # Errors
    /// Returns `io::Error` if the file cannot be read, or an `InvalidData` error if it
    /// is not valid UTF-8.
    pub fn read(root: &Path, relative: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(root.join(relative))?;
        Ok(Self::new(relative, content))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Same path and same content
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.path == other.path && self.content == other.content
    }

    /// Derive an after-state with new content at the same path
    #[must_use]
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            path: self.path.clone(),
            content: content.into(),
            encoding: self.encoding.clone(),
            modified: true,
        }
    }

    /// Derive an after-state relocated to `path` with the same content
    #[must_use]
    pub fn with_path(&self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: self.content.clone(),
            encoding: self.encoding.clone(),
            modified: true,
        }
    }
}
