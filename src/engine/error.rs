//! Per-file processing errors
//!
//! A `ProcessError` never aborts a pass. The first one is retained on the
//! [`ReconciliationResult`](crate::changes::ReconciliationResult) and surfaced once
//! every other file has been processed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// The before-state could not be read from disk
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A transformation failed on a file
    #[error("The recipe produced an error on {}: {reason}", path.display())]
    Transform { path: PathBuf, reason: String },
}

impl ProcessError {
    #[must_use]
    pub fn transform(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Transform {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
