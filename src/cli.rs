//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for rewrite using the `clap` crate.
//!
//! # Commands
//!
//! - **run**: Report, apply and prune (`--dry-run` previews instead)
//! - **dry-run**: Preview the changes without touching the tree (default)
//! - **discover**: List the recipes and styles loaded from the catalog
//!
//! Global flags override the layered configuration (see [`crate::config`]).
//!
//! # Examples
//!
//! ```
//! use rewrite::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["rewrite", "--active-recipes", "a.B,c.D", "run"]);
//! assert_eq!(cli.active_recipes, vec!["a.B", "c.D"]);
//! assert!(matches!(cli.get_command(), Commands::Run { dry_run: false }));
//! ```

use std::io;
use std::path::{self, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::RewriteConfig;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rewrite")]
#[command(about = "Apply transformation recipes to a project tree", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project directory to process (default is the current directory)
    #[arg(long = "base-dir", value_name = "DIR", global = true)]
    pub base_dir: Option<PathBuf>,

    /// Recipe catalog file (default is rewrite.yml in the base directory)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Comma-separated list of recipes to activate
    #[arg(long = "active-recipes", value_name = "RECIPES", value_delimiter = ',', global = true)]
    pub active_recipes: Vec<String>,

    /// Comma-separated list of styles to activate
    #[arg(long = "active-styles", value_name = "STYLES", value_delimiter = ',', global = true)]
    pub active_styles: Vec<String>,

    /// Skip execution
    #[arg(long = "skip", global = true)]
    pub skip: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long = "verbose", global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run recipes and apply changes
    Run {
        /// Preview changes without applying them
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Show what changes would be made without applying them (default)
    DryRun {
        /// Print the classified changes as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// List available recipes
    Discover,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to `dry-run` if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::DryRun { json: false })
    }

    /// Absolute base directory
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the current directory cannot be determined.
    pub fn base_dir(&self) -> io::Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => path::absolute(dir),
            None => std::env::current_dir(),
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut RewriteConfig) {
        if let Some(location) = &self.config {
            config.config_location.clone_from(location);
        }
        if !self.active_recipes.is_empty() {
            config.active_recipes.clone_from(&self.active_recipes);
        }
        if !self.active_styles.is_empty() {
            config.active_styles.clone_from(&self.active_styles);
        }
        if self.skip {
            config.skip = true;
        }
        if self.quiet {
            config.quiet = true;
        }
    }

    /// Log level implied by the flags, falling back to the configured one
    #[must_use]
    pub fn log_level<'a>(&self, config: &'a RewriteConfig) -> &'a str {
        if self.verbose {
            "debug"
        } else if self.quiet || config.quiet {
            "warn"
        } else {
            &config.log_level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_dry_run() {
        let cli = Cli::parse_from(["rewrite"]);
        assert_eq!(cli.get_command(), Commands::DryRun { json: false });
    }

    #[test]
    fn test_parse_run_with_dry_run() {
        let cli = Cli::parse_from(["rewrite", "run", "--dry-run"]);
        assert_eq!(cli.get_command(), Commands::Run { dry_run: true });
    }

    #[test]
    fn test_parse_dry_run_json() {
        let cli = Cli::parse_from(["rewrite", "dry-run", "--json"]);
        assert_eq!(cli.get_command(), Commands::DryRun { json: true });
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "rewrite",
            "discover",
            "--base-dir",
            "/tmp/project",
            "--active-styles",
            "s.One,s.Two",
            "-v",
        ]);
        assert_eq!(cli.get_command(), Commands::Discover);
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.active_styles, vec!["s.One", "s.Two"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["rewrite", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_apply_to_overrides_config() {
        let cli = Cli::parse_from([
            "rewrite",
            "--config",
            "custom.yml",
            "--active-recipes",
            "a.B",
            "--skip",
            "run",
        ]);
        let mut config = RewriteConfig {
            active_recipes: vec!["from.File".into()],
            ..RewriteConfig::default()
        };
        cli.apply_to(&mut config);

        assert_eq!(config.config_location, "custom.yml");
        assert_eq!(config.active_recipes, vec!["a.B"]);
        assert!(config.skip);
        assert!(!config.quiet);
    }

    #[test]
    fn test_apply_to_keeps_config_without_flags() {
        let cli = Cli::parse_from(["rewrite", "run"]);
        let mut config = RewriteConfig {
            active_styles: vec!["s.Kept".into()],
            ..RewriteConfig::default()
        };
        cli.apply_to(&mut config);
        assert_eq!(config.active_styles, vec!["s.Kept"]);
        assert_eq!(config.config_location, "rewrite.yml");
    }

    #[test]
    fn test_log_level() {
        let config = RewriteConfig::default();
        assert_eq!(Cli::parse_from(["rewrite"]).log_level(&config), "info");
        assert_eq!(Cli::parse_from(["rewrite", "-v"]).log_level(&config), "debug");
        assert_eq!(Cli::parse_from(["rewrite", "-q"]).log_level(&config), "warn");
    }

    #[test]
    fn test_base_dir_is_absolute() {
        let cli = Cli::parse_from(["rewrite", "--base-dir", "relative/dir"]);
        let dir = cli.base_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("relative/dir"));
    }
}
