//! Discover command - list the recipes and styles loaded from the catalog

use super::{Result, Session};
use crate::recipes::{Environment, Recipe};

/// Execute the discover command
///
/// # Errors
/// Returns an error if the recipe catalog cannot be loaded.
pub fn execute(session: &Session) -> Result<()> {
    let env = session.load_environment()?;

    if env.recipes().is_empty() && env.styles().is_empty() {
        let location = session.config().recipe_location(session.base_dir())?;
        session.info(format!("No recipes found in {}", location.display()));
        return Ok(());
    }

    for line in listing(&env) {
        println!("{line}");
    }
    Ok(())
}

fn recipe_line(recipe: &Recipe) -> String {
    let mut line = format!("  - {}", recipe.name);
    if let Some(display_name) = &recipe.display_name {
        line.push_str(&format!(" ({display_name})"));
    }
    if let Some(description) = &recipe.description {
        line.push_str(&format!(": {description}"));
    }
    line
}

fn listing(env: &Environment) -> Vec<String> {
    let mut lines = vec![format!(
        "Loaded {} recipes from configuration:",
        env.recipes().len()
    )];
    lines.extend(env.recipes().iter().map(recipe_line));

    lines.push(format!(
        "Loaded {} styles from configuration:",
        env.styles().len()
    ));
    lines.extend(env.styles().iter().map(|s| format!("  - {}", s.name)));
    lines
}
