//! Recipe catalog
//!
//! The catalog is a YAML file (usually `rewrite.yml`) holding one or more documents.
//! A document is either an aggregate container:
//!
//! ```yaml
//! recipes:
//!   - name: com.example.Cleanup
//!     displayName: Cleanup
//! recipeList:
//!   - com.example.Other
//! styleList:
//!   - com.example.Style
//! ```
//!
//! or a single declaration whose `type` ends in `recipe` or `style`:
//!
//! ```yaml
//! type: specs.openrewrite.org/v1beta/recipe
//! name: com.example.Cleanup
//! recipeList:
//!   - com.example.RemoveUnused
//!   - com.example.Rename:
//!       from: a
//!       to: b
//! ```

pub mod error;

pub use error::RecipeError;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::engine::{ProcessError, SourceTransform, Transformed};
use crate::source::SourceSnapshot;

/// A named transformation declared in the catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Names of the recipes this one composes
    #[serde(deserialize_with = "recipe_names")]
    pub recipe_list: Vec<String>,
    /// Any other keys, kept verbatim
    #[serde(flatten)]
    pub options: BTreeMap<String, Value>,
}

impl Recipe {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named formatting style declared in the catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Style {
    pub name: String,
    #[serde(flatten)]
    pub options: BTreeMap<String, Value>,
}

impl Style {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Catalog {
    recipes: Vec<Recipe>,
    styles: Vec<Style>,
    #[serde(deserialize_with = "recipe_names")]
    recipe_list: Vec<String>,
    style_list: Vec<String>,
}

/// A `recipeList` entry: a bare name, or a name mapped to its options
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeRef {
    Name(String),
    WithOptions(BTreeMap<String, Value>),
}

fn recipe_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let refs = Vec::<RecipeRef>::deserialize(deserializer)?;
    Ok(refs
        .into_iter()
        .filter_map(|r| match r {
            RecipeRef::Name(name) => Some(name),
            RecipeRef::WithOptions(map) => map.into_keys().next(),
        })
        .collect())
}

/// Recipes and styles available to a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    recipes: Vec<Recipe>,
    styles: Vec<Style>,
}

impl Environment {
    #[must_use]
    pub const fn new(recipes: Vec<Recipe>, styles: Vec<Style>) -> Self {
        Self { recipes, styles }
    }

    /// Load a catalog file. A missing file yields an empty environment.
    ///
    /// # Errors
    /// Returns `RecipeError::Read` if the file exists but cannot be read, or
    /// `RecipeError::Parse` if it is not a valid catalog.
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no recipe catalog");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(RecipeError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::from_yaml(&content).map_err(|source| RecipeError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse every document of a YAML catalog
    ///
    /// # Errors
    /// Returns the first `serde_yaml::Error` encountered.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut env = Self::default();
        for document in serde_yaml::Deserializer::from_str(content) {
            match Value::deserialize(document)? {
                Value::Null => {}
                Value::Mapping(map) => env.add_document(map)?,
                _ => {
                    return Err(serde::de::Error::custom(
                        "catalog documents must be mappings",
                    ));
                }
            }
        }
        Ok(env)
    }

    fn add_document(&mut self, mut map: Mapping) -> Result<(), serde_yaml::Error> {
        let kind = map
            .remove("type")
            .and_then(|v| v.as_str().map(str::to_owned));

        match kind.as_deref() {
            Some(k) if k.ends_with("recipe") => {
                self.recipes.push(serde_yaml::from_value(Value::Mapping(map))?);
            }
            Some(k) if k.ends_with("style") => {
                self.styles.push(serde_yaml::from_value(Value::Mapping(map))?);
            }
            _ => {
                let catalog: Catalog = serde_yaml::from_value(Value::Mapping(map))?;
                self.recipes.extend(catalog.recipes);
                self.styles.extend(catalog.styles);
                self.recipes
                    .extend(catalog.recipe_list.into_iter().map(Recipe::named));
                self.styles
                    .extend(catalog.style_list.into_iter().map(Style::named));
            }
        }
        Ok(())
    }

    /// Keep only the named recipes and styles. Empty lists keep everything.
    ///
    /// # Errors
    /// Returns `RecipeError::UnknownActiveRecipes` when `strict` is set and a
    /// requested recipe is not in the catalog.
    pub fn activate(
        &mut self,
        active_recipes: &[String],
        active_styles: &[String],
        strict: bool,
    ) -> Result<(), RecipeError> {
        if !active_recipes.is_empty() {
            let unknown: Vec<String> = active_recipes
                .iter()
                .filter(|name| !self.recipes.iter().any(|r| &r.name == *name))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                if strict {
                    return Err(RecipeError::UnknownActiveRecipes { names: unknown });
                }
                warn!(recipes = %unknown.join(", "), "active recipes not found in catalog");
            }
            self.recipes.retain(|r| active_recipes.contains(&r.name));
        }

        if !active_styles.is_empty() {
            let unknown: Vec<&str> = active_styles
                .iter()
                .filter(|name| !self.styles.iter().any(|s| &s.name == *name))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                warn!(styles = %unknown.join(", "), "active styles not found in catalog");
            }
            self.styles.retain(|s| active_styles.contains(&s.name));
        }

        Ok(())
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    #[must_use]
    pub fn recipe_names(&self) -> Vec<String> {
        self.recipes.iter().map(|r| r.name.clone()).collect()
    }
}

/// Baseline transformation: every file is left as it was
impl SourceTransform for Environment {
    fn transform(&self, before: &SourceSnapshot) -> Result<Transformed, ProcessError> {
        Ok(Transformed::unchanged(before).caused_by(self.recipe_names()))
    }
}
