//! Rewrite CLI application entry point
//!
//! Discovers source files in a project, runs the active recipes over them, and
//! reconciles the results with the tree.
//!
//! # Usage
//!
//! ```bash
//! # Preview changes (default command)
//! rewrite
//! rewrite dry-run
//! rewrite dry-run --json
//!
//! # Apply changes and prune emptied directories
//! rewrite run
//! rewrite run --active-recipes com.example.A,com.example.B
//!
//! # List the recipes in rewrite.yml
//! rewrite discover --base-dir path/to/project
//! ```
//!
//! # Configuration
//!
//! Settings come from `~/.config/rewrite/config.toml`, `<base dir>/rewrite.toml`
//! and `REWRITE_*` environment variables, overridden by command-line flags.

use rewrite::{
    RewriteError,
    cli::{Cli, Commands},
    commands::{self, Session},
    logging,
};

type Result<T> = std::result::Result<T, RewriteError>;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let session = Session::from_cli(&cli)?;

    logging::init(cli.log_level(session.config()));

    match cli.get_command() {
        Commands::Run { dry_run } => commands::run(&session, dry_run),
        Commands::DryRun { json } => commands::dry_run(&session, json),
        Commands::Discover => commands::discover(&session),
    }
}
