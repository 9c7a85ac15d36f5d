use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations the applicator and pruner depend on
pub trait FileSystem {
    /// Create `path` and any missing parents
    ///
    /// # Errors
    /// Returns the underlying `io::Error`.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replace the content of `path`, creating the file if needed
    ///
    /// # Errors
    /// Returns the underlying `io::Error`.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// # Errors
    /// Returns the underlying `io::Error`, including `NotFound`.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Atomically rename `from` to `to`
    ///
    /// # Errors
    /// Returns the underlying `io::Error`, e.g. when crossing devices.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// # Errors
    /// Returns the underlying `io::Error` if `path` cannot be listed.
    fn is_empty_dir(&self, path: &Path) -> io::Result<bool>;

    /// Remove an empty directory
    ///
    /// # Errors
    /// Returns the underlying `io::Error`.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// The real local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn is_empty_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(fs::read_dir(path)?.next().is_none())
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}
