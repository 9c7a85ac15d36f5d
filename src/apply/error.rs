//! Application errors
//!
//! Any of these aborts the remaining apply steps. Changes already written by earlier
//! steps are not rolled back. A missing file on delete is never an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to delete file {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A change points outside the project root
    #[error("Refusing to touch {}: path escapes the project root", path.display())]
    OutsideRoot { path: PathBuf },

    /// The copy half of a fallback move succeeded but the old file is still there
    #[error(
        "Moved {} to {} by copying, but the original could not be removed: {source}",
        from.display(),
        to.display()
    )]
    IncompleteMove {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
