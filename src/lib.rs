//! Rewrite - discover, transform and reconcile source files in a project tree
//!
//! This library classifies before/after file snapshots into created, deleted, moved
//! and edited-in-place changes, applies them to the filesystem with a copy-and-delete
//! fallback for moves, and prunes directories left empty afterwards.

use thiserror::Error;

pub mod apply;
pub mod changes;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod logging;
pub mod output;
pub mod patterns;
pub mod recipes;
pub mod source;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RewriteError {
    /// File discovery error
    #[error("Discovery error: {0}")]
    DiscoveryError(#[from] discovery::DiscoveryError),
    /// A file failed to process
    #[error("Processing error: {0}")]
    ProcessError(#[from] engine::ProcessError),
    /// Applying changes to the filesystem failed
    #[error("Apply error: {0}")]
    ApplyError(#[from] apply::ApplyError),
    /// Recipe catalog error
    #[error("Recipe error: {0}")]
    RecipeError(#[from] recipes::RecipeError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output error
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
