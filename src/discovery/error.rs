//! Discovery errors

use std::path::PathBuf;

use thiserror::Error;

use crate::patterns::PatternError;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Walking the tree failed; no partial file list is returned
    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}
