//! Dry-run command - preview changes without touching the tree

use colored::Colorize;
use tracing::error;

use super::{Result, Session, print_lines};
use crate::changes::ReconciliationResult;
use crate::output;

/// Execute the dry-run command
///
/// With `json`, the classified result is printed as JSON and nothing else goes to
/// stdout.
///
/// # Errors
/// Returns an error if loading or discovery fails, or the first per-file
/// processing failure after the preview has been printed.
pub fn execute(session: &Session, json: bool) -> Result<()> {
    if session.skipped("dry run execution") {
        return Ok(());
    }

    let quieted;
    let session = if json {
        quieted = session.quieted();
        &quieted
    } else {
        session
    };

    if !session.quiet() {
        println!("{}", "=== Dry Run Mode ===".yellow().bold());
    }

    let mut result = match session.collect()? {
        Some(result) => result,
        None if json => ReconciliationResult::new(session.base_dir()),
        None => return Ok(()),
    };

    let failure = result.take_first_failure();
    if let Some(e) = &failure {
        error!(error = %e, "The recipe produced an error");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_empty() {
        session.info("No changes would be made");
    } else {
        print_lines(&output::preview_report(&result));
    }

    failure.map_or(Ok(()), |e| Err(e.into()))
}
