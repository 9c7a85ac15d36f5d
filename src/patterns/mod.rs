//! Path pattern matching for discovery filters.
//!
//! Patterns are glob-like and are always evaluated against root-relative paths with
//! `/` separators. See [`PathPattern`] for the two accepted forms.

pub mod error;
pub mod files;

pub use error::{PatternError, PatternKind};
pub use files::{PathPattern, PatternSet, slash_path};

use std::path::Path;

/// Check a single path against a single raw pattern.
///
/// Patterns that fail to compile never match.
#[must_use]
pub fn matches(path: &Path, pattern: &str) -> bool {
    PathPattern::new(pattern, PatternKind::PlainText).is_ok_and(|p| p.matches(path))
}

/// Check a path against a list of raw patterns (OR logic)
#[must_use]
pub fn matches_any<S: AsRef<str>>(path: &Path, patterns: &[S]) -> bool {
    patterns.iter().any(|p| matches(path, p.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_free_function() {
        assert!(matches(Path::new("src/App.java"), "src/*.java"));
        assert!(!matches(Path::new("src/App.java"), "[bad"));
    }

    #[test]
    fn test_matches_any() {
        let patterns = vec!["**/*.sh".to_string(), "**/mvnw".to_string()];
        assert!(matches_any(Path::new("tools/mvnw"), &patterns));
        assert!(matches_any(Path::new("scripts/ci/build.sh"), &patterns));
        assert!(!matches_any(Path::new("scripts/ci/build.py"), &patterns));
        assert!(!matches_any::<&str>(Path::new("x"), &[]));
    }
}
