use std::path::Path;

use glob::{MatchOptions, Pattern as GlobPattern};

use super::error::{PatternError, PatternKind};

/// Glob options for root-relative paths: case-sensitive, `*` stops at `/`.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

const RECURSIVE: &str = "**";

/// A compiled path pattern.
///
/// A path matches when either form matches:
/// - the glob form, evaluated against the whole relative path;
/// - the recursive form, only present when the pattern contains exactly one `**`.
///   The text before it must be a literal prefix of the path and the text after it a
///   literal suffix. Wildcards around the `**` are not interpreted by this form.
#[derive(Debug, Clone)]
pub struct PathPattern {
    original: String,
    glob: Option<GlobPattern>,
    recursive: Option<(String, String)>,
}

impl PathPattern {
    /// Compile a pattern.
    ///
    /// # Errors
    /// * Returns `PatternError::InvalidEmpty` if `p` is empty.
    /// * Returns `PatternError::InvalidGlob` if `p` is not a valid glob and has no
    ///   recursive form either.
    pub fn new(p: &str, kind: PatternKind) -> Result<Self, PatternError> {
        if p.is_empty() {
            return Err(PatternError::InvalidEmpty { kind });
        }

        let recursive = split_recursive(p);
        let glob = match GlobPattern::new(p) {
            Ok(g) => Some(g),
            Err(e) if recursive.is_none() => {
                return Err(PatternError::glob_parse(kind, p, &e.to_string()));
            }
            Err(_) => None,
        };

        Ok(Self {
            original: p.to_string(),
            glob,
            recursive,
        })
    }

    /// Check a `/`-separated relative path against this pattern
    #[must_use]
    pub fn matches_str(&self, path: &str) -> bool {
        if let Some(glob) = &self.glob
            && glob.matches_with(path, GLOB_OPTIONS)
        {
            return true;
        }
        self.recursive
            .as_ref()
            .is_some_and(|(prefix, suffix)| path.starts_with(prefix.as_str()) && path.ends_with(suffix.as_str()))
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.matches_str(&slash_path(path))
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for PathPattern {}

/// An ordered list of compiled patterns, matched with OR logic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<PathPattern>,
}

impl PatternSet {
    /// Compile every pattern in `raw`.
    ///
    /// # Errors
    /// Returns the first `PatternError` produced by [`PathPattern::new`].
    pub fn new<S: AsRef<str>>(raw: &[S], kind: PatternKind) -> Result<Self, PatternError> {
        let patterns = raw
            .iter()
            .map(|p| PathPattern::new(p.as_ref(), kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    #[must_use]
    pub fn matches_any(&self, path: &Path) -> bool {
        let path = slash_path(path);
        self.patterns.iter().any(|p| p.matches_str(&path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn split_recursive(p: &str) -> Option<(String, String)> {
    let mut parts = p.split(RECURSIVE);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(suffix), None) => Some((prefix.to_string(), suffix.to_string())),
        _ => None,
    }
}

/// Render a relative path with `/` separators regardless of platform
#[must_use]
pub fn slash_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
