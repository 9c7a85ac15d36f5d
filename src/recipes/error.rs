//! Recipe catalog errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Failed to read recipe catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse recipe catalog {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Requested active recipes that the catalog does not declare
    #[error("Active recipes not found in the catalog: {}", names.join(", "))]
    UnknownActiveRecipes { names: Vec<String> },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
