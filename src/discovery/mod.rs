//! Candidate file discovery
//!
//! Walks a project tree and keeps regular files that are under the size threshold,
//! not excluded, and either match a plain-text mask or carry a recognised source
//! extension. Returned paths are relative to the root.

pub mod error;

pub use error::DiscoveryError;

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::patterns::{PatternKind, PatternSet};

/// Extensions (lower case, without the dot) treated as source files
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "java", "kt", "groovy", "scala", "js", "ts", "jsx", "tsx", "go", "rs", "py", "rb", "c",
    "cpp", "h", "hpp", "cs", "vb", "php", "xml", "json", "yaml", "yml", "properties", "toml",
    "hcl",
];

/// Compiled discovery filters
#[derive(Debug, Clone)]
pub struct Discovery {
    size_threshold: u64,
    exclusions: PatternSet,
    plain_text: PatternSet,
}

impl Discovery {
    /// Compile the exclusion and plain-text patterns.
    ///
    /// # Errors
    /// Returns `DiscoveryError::Pattern` if a pattern is empty or not a valid glob.
    pub fn new<S: AsRef<str>>(
        size_threshold: u64,
        exclusions: &[S],
        plain_text: &[S],
    ) -> Result<Self, DiscoveryError> {
        Ok(Self {
            size_threshold,
            exclusions: PatternSet::new(exclusions, PatternKind::Exclusion)?,
            plain_text: PatternSet::new(plain_text, PatternKind::PlainText)?,
        })
    }

    /// Walk `root` depth first, in file-name order. Symlinks are not followed.
    ///
    /// # Errors
    /// Returns `DiscoveryError::Walk` on the first filesystem error.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|source| walk_error(root, source))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let size = entry.metadata().map_err(|source| walk_error(root, source))?.len();
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };

            if self.accepts(relative, size) {
                files.push(relative.to_path_buf());
            } else {
                trace!(path = %relative.display(), size, "skipped");
            }
        }

        debug!(root = %root.display(), count = files.len(), "discovered source files");
        Ok(files)
    }

    /// Apply the size, exclusion and inclusion rules to one root-relative file
    #[must_use]
    pub fn accepts(&self, relative: &Path, size: u64) -> bool {
        if size > self.size_threshold || self.exclusions.matches_any(relative) {
            return false;
        }
        self.plain_text.matches_any(relative) || is_source_file(relative)
    }
}

fn walk_error(root: &Path, source: walkdir::Error) -> DiscoveryError {
    let path = source.path().unwrap_or(root).to_path_buf();
    DiscoveryError::Walk { path, source }
}

/// Discover candidate files under `root` in one call.
///
/// # Errors
/// See [`Discovery::new`] and [`Discovery::discover`].
pub fn discover<S: AsRef<str>>(
    root: &Path,
    size_threshold: u64,
    exclusions: &[S],
    plain_text: &[S],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    Discovery::new(size_threshold, exclusions, plain_text)?.discover(root)
}

/// Whether the extension is in [`SOURCE_EXTENSIONS`] (case-insensitive)
#[must_use]
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempTree;

    const NONE: &[&str] = &[];

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("src/Main.java")));
        assert!(is_source_file(Path::new("Cargo.TOML")));
        assert!(!is_source_file(Path::new("README.md")));
        assert!(!is_source_file(Path::new("Makefile")));
    }

    #[test]
    fn test_discover_source_files_in_name_order() {
        let tree = TempTree::new();
        tree.file("b/Main.java", "class Main {}");
        tree.file("a/lib.rs", "fn main() {}");
        tree.file("notes.md", "# notes");
        tree.dir("empty");

        let files = discover(tree.root(), 1024, NONE, NONE).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("a/lib.rs"), PathBuf::from("b/Main.java")]
        );
    }

    #[test]
    fn test_discover_plain_text_masks() {
        let tree = TempTree::new();
        tree.file("docs/guide.md", "guide");
        tree.file("Dockerfile", "FROM scratch");
        tree.file("other.txt", "other");

        let files = discover(tree.root(), 1024, NONE, &["**/*.md", "Dockerfile"]).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("Dockerfile"), PathBuf::from("docs/guide.md")]
        );
    }

    #[test]
    fn test_discover_exclusions_win() {
        let tree = TempTree::new();
        tree.file("foo/target/classes/App.java", "x");
        tree.file("foo/targetx/App.java", "x");

        let files = discover(tree.root(), 1024, &["**/target/**"], NONE).unwrap();
        assert_eq!(files, vec![PathBuf::from("foo/targetx/App.java")]);
    }

    #[test]
    fn test_discover_size_threshold() {
        let tree = TempTree::new();
        tree.file("small.json", "{}");
        tree.file("large.json", &"x".repeat(2048));

        let files = discover(tree.root(), 1024, NONE, NONE).unwrap();
        assert_eq!(files, vec![PathBuf::from("small.json")]);
    }

    #[test]
    fn test_discover_missing_root_fails() {
        let tree = TempTree::new();
        let err = discover(&tree.path("missing"), 1024, NONE, NONE).unwrap_err();
        assert!(matches!(err, DiscoveryError::Walk { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = Discovery::new(1024, &[""], NONE).unwrap_err();
        assert!(matches!(err, DiscoveryError::Pattern(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_symlinks() {
        let tree = TempTree::new();
        let target = tree.file("real.rs", "x");
        std::os::unix::fs::symlink(&target, tree.path("link.rs")).unwrap();

        let files = discover(tree.root(), 1024, NONE, NONE).unwrap();
        assert_eq!(files, vec![PathBuf::from("real.rs")]);
    }
}
