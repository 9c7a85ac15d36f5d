//! Run command - report, apply and prune

use colored::Colorize;
use tracing::error;

use super::{Result, Session, print_lines};
use crate::apply::Applicator;
use crate::output;

/// Execute the run command
///
/// Every successfully classified change is applied before a retained per-file
/// failure is returned, so one bad file does not hold back the rest.
///
/// # Errors
/// Returns an error if loading, discovery or the apply fails, or the first
/// per-file processing failure once everything else has been applied.
pub fn execute(session: &Session, dry_run: bool) -> Result<()> {
    if dry_run {
        return super::dry_run(session, false);
    }
    if session.skipped("execution") {
        return Ok(());
    }

    let Some(mut result) = session.collect()? else {
        return Ok(());
    };

    let failure = result.take_first_failure();
    if let Some(e) = &failure {
        error!(error = %e, "The recipe produced an error");
    }

    if result.is_empty() {
        session.info("No changes were made");
    } else {
        print_lines(&output::apply_report(&result));

        let outcome = Applicator::new().reconcile(session.base_dir(), &result)?;
        print_lines(&output::fallback_report(&outcome.fallback_moves));
        if !session.quiet() {
            print_lines(&output::pruned_report(&outcome.pruned));
            println!(
                "{}",
                format!(
                    "Applied {} created, {} deleted, {} moved, {} edited",
                    outcome.created, outcome.deleted, outcome.moved, outcome.edited
                )
                .green()
            );
        }
    }

    failure.map_or(Ok(()), |e| Err(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RewriteError;
    use crate::config::RewriteConfig;
    use crate::testing::TempTree;

    fn session(tree: &TempTree, skip: bool) -> Session {
        let config = RewriteConfig {
            quiet: true,
            skip,
            ..RewriteConfig::default()
        };
        Session::new(tree.root().to_path_buf(), config)
    }

    #[test]
    fn test_run_with_no_op_recipes_leaves_tree_alone() {
        let tree = TempTree::new();
        tree.file("src/Main.java", "class Main {}");
        tree.file("rewrite.yml", "recipeList:\n  - com.example.Noop\n");

        execute(&session(&tree, false), false).unwrap();
        assert_eq!(tree.read("src/Main.java"), "class Main {}");
    }

    #[test]
    fn test_run_skip() {
        let tree = TempTree::new();
        tree.file("rewrite.yml", "recipes: [\n");
        execute(&session(&tree, true), false).unwrap();
    }

    #[test]
    fn test_run_invalid_catalog_fails() {
        let tree = TempTree::new();
        tree.file("rewrite.yml", "recipes: [\n");
        let err = execute(&session(&tree, false), false).unwrap_err();
        assert!(matches!(err, RewriteError::RecipeError(_)));
    }

    #[test]
    fn test_run_missing_base_dir_fails() {
        let tree = TempTree::new();
        let session = Session::new(tree.path("missing"), RewriteConfig::default());
        let err = execute(&session, false).unwrap_err();
        assert!(matches!(err, RewriteError::DiscoveryError(_)));
    }
}
