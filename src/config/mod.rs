//! Configuration module for rewrite
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. the user file `<config dir>/rewrite/config.toml`
//! 3. the project file `<base dir>/rewrite.toml`
//! 4. `REWRITE_*` environment variables (lists are comma separated)
//! 5. command-line flags, applied by the caller
//!
//! Missing files are skipped. The resulting [`RewriteConfig`] is passed explicitly to
//! every component that needs it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use byte_unit::{Byte, Unit};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Name of the per-project settings file, looked up in the base directory
pub const PROJECT_CONFIG_FILE: &str = "rewrite.toml";

/// Prefix of environment variables read into the configuration
pub const ENV_PREFIX: &str = "REWRITE";

const LIST_KEYS: [&str; 5] = [
    "active_recipes",
    "active_styles",
    "exclusions",
    "plain_text_masks",
    "additional_plain_text_masks",
];

/// Plain-text masks used when `plain_text_masks` is not set
pub const DEFAULT_PLAIN_TEXT_MASKS: &[&str] = &[
    "**/*.adoc",
    "**/*.aj",
    "**/*.bash",
    "**/*.bat",
    "**/CODEOWNERS",
    "**/*.css",
    "**/*.config",
    "**/[dD]ockerfile*",
    "**/*.[dD]ockerfile",
    "**/*[cC]ontainerfile*",
    "**/*.[cC]ontainerfile",
    "**/*.env",
    "**/.gitattributes",
    "**/.gitignore",
    "**/*.htm*",
    "**/gradlew",
    "**/.java-version",
    "**/*.jelly",
    "**/*.jsp",
    "**/*.ksh",
    "**/*.lock",
    "**/lombok.config",
    "**/*.md",
    "**/*.mf",
    "**/META-INF/services/**",
    "**/META-INF/spring/**",
    "**/META-INF/spring.factories",
    "**/mvnw",
    "**/mvnw.cmd",
    "**/*.qute.java",
    "**/.sdkmanrc",
    "**/*.sh",
    "**/*.sql",
    "**/*.svg",
    "**/*.tsx",
    "**/*.txt",
    "**/*.py",
];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteConfig {
    /// Recipe catalog location, relative to the base directory unless absolute
    pub config_location: String,

    /// Recipes to activate; empty activates every catalog recipe
    pub active_recipes: Vec<String>,

    /// Styles to activate; empty activates every catalog style
    pub active_styles: Vec<String>,

    /// Skip run and dry-run entirely
    pub skip: bool,

    /// Patterns of root-relative paths never processed
    pub exclusions: Vec<String>,

    /// Replaces the default plain-text masks when non-empty
    pub plain_text_masks: Vec<String>,

    /// Appended to the default plain-text masks
    pub additional_plain_text_masks: Vec<String>,

    /// Files larger than this many MiB are ignored
    pub size_threshold_mb: u64,

    /// Fail instead of warning when an active recipe is not in the catalog
    pub fail_on_invalid_active_recipes: bool,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Default log level when neither `RUST_LOG` nor `--verbose` is given
    pub log_level: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            config_location: "rewrite.yml".to_string(),
            active_recipes: Vec::new(),
            active_styles: Vec::new(),
            skip: false,
            exclusions: Vec::new(),
            plain_text_masks: Vec::new(),
            additional_plain_text_masks: Vec::new(),
            size_threshold_mb: 10,
            fail_on_invalid_active_recipes: false,
            quiet: false,
            log_level: "info".to_string(),
        }
    }
}

impl RewriteConfig {
    /// Get the path to the user config file
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rewrite").join("config.toml"))
    }

    /// Load the layered configuration for a project
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a config file exists but cannot be parsed, or an
    /// environment variable holds a value of the wrong type.
    pub fn load(base_dir: &Path) -> Result<Self, ConfigError> {
        Self::load_from(Self::user_config_path().as_deref(), base_dir, None)
    }

    /// Load with an explicit user file and, for tests, an explicit environment
    ///
    /// # Errors
    ///
    /// See [`RewriteConfig::load`].
    pub fn load_from(
        user_file: Option<&Path>,
        base_dir: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let mut environment = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .source(env);
        for key in LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }

        let settings = builder
            .add_source(
                File::from(base_dir.join(PROJECT_CONFIG_FILE))
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    #[must_use]
    pub fn active_recipes(&self) -> Vec<String> {
        clean_list(&self.active_recipes)
    }

    #[must_use]
    pub fn active_styles(&self) -> Vec<String> {
        clean_list(&self.active_styles)
    }

    #[must_use]
    pub fn exclusions(&self) -> Vec<String> {
        clean_list(&self.exclusions)
    }

    /// Effective plain-text masks: the configured list if any, otherwise the
    /// defaults followed by the additional masks
    #[must_use]
    pub fn plain_text_masks(&self) -> Vec<String> {
        let masks = clean_list(&self.plain_text_masks);
        if !masks.is_empty() {
            return masks;
        }

        let defaults = DEFAULT_PLAIN_TEXT_MASKS.iter().map(ToString::to_string);
        let combined: Vec<String> = defaults
            .chain(self.additional_plain_text_masks.iter().cloned())
            .collect();
        clean_list(&combined)
    }

    /// Size threshold in bytes (MiB based)
    #[must_use]
    pub fn size_threshold_bytes(&self) -> u64 {
        Byte::from_u64_with_unit(self.size_threshold_mb, Unit::MiB).map_or(u64::MAX, |b| b.as_u64())
    }

    /// Resolve the recipe catalog path against the base directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for remote (`http`/`https`) locations.
    pub fn recipe_location(&self, base_dir: &Path) -> Result<PathBuf, ConfigError> {
        let location = self.config_location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Err(ConfigError::Message(format!(
                "Remote recipe catalogs are not supported: {location}"
            )));
        }

        let path = Path::new(location);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(base_dir.join(path))
        }
    }
}

/// Trim entries, drop empty ones and duplicates, keep first-seen order
#[must_use]
pub fn clean_list(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .map(str::to_string)
        .collect()
}
