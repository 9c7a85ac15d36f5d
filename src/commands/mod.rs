//! Command implementations
//!
//! Each command is a module with an execute function that takes a [`Session`]
//! and runs one operation against the project tree.

pub mod discover;
pub mod dry_run;
pub mod run;

pub use discover::execute as discover;
pub use dry_run::execute as dry_run;
pub use run::execute as run;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::changes::ReconciliationResult;
use crate::cli::Cli;
use crate::config::RewriteConfig;
use crate::discovery::Discovery;
use crate::engine;
use crate::output::Line;
use crate::recipes::Environment;
use crate::RewriteError;

type Result<T> = std::result::Result<T, RewriteError>;

/// Base directory and effective configuration shared by every command
#[derive(Debug, Clone)]
pub struct Session {
    base_dir: PathBuf,
    config: RewriteConfig,
}

impl Session {
    #[must_use]
    pub const fn new(base_dir: PathBuf, config: RewriteConfig) -> Self {
        Self { base_dir, config }
    }

    /// Load the layered configuration for the CLI's base directory and apply the
    /// command-line overrides on top
    ///
    /// # Errors
    /// Returns an error if the base directory cannot be resolved or a config layer
    /// is invalid.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base_dir = cli.base_dir()?;
        let mut config = RewriteConfig::load(&base_dir)?;
        cli.apply_to(&mut config);
        Ok(Self::new(base_dir, config))
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub const fn config(&self) -> &RewriteConfig {
        &self.config
    }

    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.config.quiet
    }

    /// Load the recipe catalog and keep the active recipes and styles
    ///
    /// # Errors
    /// Returns an error for remote catalog locations, unreadable or invalid
    /// catalogs, and unknown active recipes in strict mode.
    pub fn load_environment(&self) -> Result<Environment> {
        let location = self.config.recipe_location(&self.base_dir)?;
        debug!(path = %location.display(), "loading recipe catalog");

        let mut env = Environment::load(&location)?;
        env.activate(
            &self.config.active_recipes(),
            &self.config.active_styles(),
            self.config.fail_on_invalid_active_recipes,
        )?;
        Ok(env)
    }

    /// Discover candidate files under the base directory
    ///
    /// # Errors
    /// Returns an error if a pattern is invalid or the walk fails.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let discovery = Discovery::new(
            self.config.size_threshold_bytes(),
            &self.config.exclusions(),
            &self.config.plain_text_masks(),
        )?;
        Ok(discovery.discover(&self.base_dir)?)
    }

    /// Discover, transform and classify. `None` when no candidate file was found.
    ///
    /// # Errors
    /// See [`Session::load_environment`] and [`Session::discover`]. Per-file
    /// failures are retained on the result instead.
    pub fn collect(&self) -> Result<Option<ReconciliationResult>> {
        let env = self.load_environment()?;
        self.info(format!("Processing project at: {}", self.base_dir.display()));

        let files = self.discover()?;
        self.info(format!("Found {} source files to process", files.len()));
        if files.is_empty() {
            self.info("No source files found to process");
            return Ok(None);
        }

        Ok(Some(engine::process_files(&self.base_dir, &files, &env)))
    }

    /// Copy of this session with informational output suppressed
    #[must_use]
    pub fn quieted(&self) -> Self {
        let mut session = self.clone();
        session.config.quiet = true;
        session
    }

    /// Print an informational line unless quiet
    fn info(&self, message: impl AsRef<str>) {
        if !self.quiet() {
            println!("{}", message.as_ref());
        }
    }

    /// Returns `true` (after saying so) when the configuration asks to skip
    fn skipped(&self, what: &str) -> bool {
        if self.config.skip {
            info!("skip requested");
            self.info(format!("Skipping {what}"));
        }
        self.config.skip
    }
}

fn print_lines(lines: &[Line]) {
    for line in lines {
        println!("{}", line.render());
    }
}
