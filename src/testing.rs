//! Testing utilities for rewrite
//!
//! This module provides a `TempTree` wrapper for building throwaway project
//! directories and a `FileSystem` implementation that refuses renames.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::apply::{FileSystem, LocalFs};

/// A temporary project tree that is removed on drop
pub struct TempTree {
    dir: TempDir,
}

impl TempTree {
    /// Create an empty tree
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Root directory of the tree
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a relative entry
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a text file, creating parent directories
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file(&self, relative: impl AsRef<Path>, content: &str) -> PathBuf {
        self.bytes(relative, content.as_bytes())
    }

    /// Write raw bytes, creating parent directories
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn bytes(&self, relative: impl AsRef<Path>, content: &[u8]) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Create a directory (and its parents)
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).expect("Failed to create test dir");
        path
    }

    /// Read a file back as text
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.path(relative)).expect("Failed to read test file")
    }

    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.path(relative).exists()
    }
}

impl Default for TempTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Local filesystem whose `rename` always fails, as across devices
#[derive(Debug, Default)]
pub struct NoRenameFs;

impl FileSystem for NoRenameFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        LocalFs.create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        LocalFs.write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_file(path)
    }

    fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::CrossesDevices,
            "rename across devices",
        ))
    }

    fn is_empty_dir(&self, path: &Path) -> io::Result<bool> {
        LocalFs.is_empty_dir(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        LocalFs.remove_dir(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_file_and_read() {
        let tree = TempTree::new();
        tree.file("a/b/c.txt", "content");
        assert!(tree.exists("a/b"));
        assert_eq!(tree.read("a/b/c.txt"), "content");
    }

    #[test]
    fn test_tree_removed_on_drop() {
        let root = {
            let tree = TempTree::new();
            tree.file("x.txt", "x");
            tree.root().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_no_rename_fs_refuses_rename() {
        let tree = TempTree::new();
        let from = tree.file("a.txt", "a");
        let err = NoRenameFs.rename(&from, &tree.path("b.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::CrossesDevices);
        assert!(from.exists());
    }
}
