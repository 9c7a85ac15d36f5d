//! Removal of directories emptied by deletions and moves.
//!
//! Candidates are the parent directories of every before-path in the deleted and
//! moved buckets. They are visited deepest first and removed when empty. Only
//! candidates are considered: an ancestor that becomes empty because its child was
//! pruned is left alone unless it was itself the parent of a deleted or moved file.
//! Pruning is best effort and never fails the apply.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{FileSystem, is_contained};
use crate::changes::ReconciliationResult;

/// Remove empty candidate directories and return them root-relative, in removal order
pub fn prune<F>(fs: &F, root: &Path, result: &ReconciliationResult) -> Vec<PathBuf>
where
    F: FileSystem + ?Sized,
{
    let mut removed = Vec::new();

    for dir in candidates(result) {
        let abs = root.join(&dir);
        match fs.is_empty_dir(&abs) {
            Ok(true) => match fs.remove_dir(&abs) {
                Ok(()) => removed.push(dir),
                Err(e) => debug!(path = %abs.display(), error = %e, "could not remove empty directory"),
            },
            Ok(false) => {}
            Err(e) => debug!(path = %abs.display(), error = %e, "skipping prune candidate"),
        }
    }

    removed
}

/// Deduplicated candidate directories, deepest first
#[must_use]
pub fn candidates(result: &ReconciliationResult) -> Vec<PathBuf> {
    let unique: BTreeSet<PathBuf> = result
        .deleted()
        .iter()
        .chain(result.moved())
        .filter_map(|c| c.before_path())
        .filter_map(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty() && is_contained(dir))
        .map(Path::to_path_buf)
        .collect();

    let mut dirs: Vec<PathBuf> = unique.into_iter().collect();
    dirs.sort_by_key(|d| std::cmp::Reverse(depth(d)));
    dirs
}

fn depth(path: &Path) -> usize {
    path.components().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::LocalFs;
    use crate::changes::classify;
    use crate::source::SourceSnapshot;
    use crate::testing::TempTree;

    fn deleted(path: &str) -> crate::changes::Change {
        classify(Some(SourceSnapshot::new(path, "x")), None, vec![]).unwrap()
    }

    fn moved(from: &str, to: &str) -> crate::changes::Change {
        classify(
            Some(SourceSnapshot::new(from, "x")),
            Some(SourceSnapshot::new(to, "x")),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_candidates_are_deduplicated_and_deepest_first() {
        let mut result = ReconciliationResult::new("/p");
        result.push(deleted("a/file.txt"));
        result.push(deleted("a/b/c/file1.txt"));
        result.push(deleted("a/b/c/file2.txt"));
        result.push(moved("x/y/old.txt", "z/new.txt"));
        result.push(deleted("root.txt"));

        let dirs = candidates(&result);
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("a/b/c"),
                PathBuf::from("x/y"),
                PathBuf::from("a"),
            ]
        );
    }

    #[test]
    fn test_added_to_directories_are_not_candidates() {
        let mut result = ReconciliationResult::new("/p");
        result.push(moved("src/old.txt", "dst/new.txt"));
        assert_eq!(candidates(&result), vec![PathBuf::from("src")]);
    }

    #[test]
    fn test_prune_removes_only_direct_parents() {
        let tree = TempTree::new();
        tree.dir("a/b/c");

        let mut result = ReconciliationResult::new(tree.root());
        result.push(deleted("a/b/c/file1.txt"));
        result.push(deleted("a/b/c/file2.txt"));

        let removed = prune(&LocalFs, tree.root(), &result);
        assert_eq!(removed, vec![PathBuf::from("a/b/c")]);
        assert!(!tree.exists("a/b/c"));
        assert!(tree.exists("a/b"));
        assert!(tree.exists("a"));
    }

    #[test]
    fn test_prune_cascades_through_candidate_ancestors() {
        let tree = TempTree::new();
        tree.dir("a/b");

        let mut result = ReconciliationResult::new(tree.root());
        result.push(deleted("a/top.txt"));
        result.push(deleted("a/b/deep.txt"));

        let removed = prune(&LocalFs, tree.root(), &result);
        assert_eq!(removed, vec![PathBuf::from("a/b"), PathBuf::from("a")]);
        assert!(!tree.exists("a"));
    }

    #[test]
    fn test_prune_keeps_non_empty_directories() {
        let tree = TempTree::new();
        tree.file("a/keep.txt", "k");

        let mut result = ReconciliationResult::new(tree.root());
        result.push(deleted("a/gone.txt"));

        assert!(prune(&LocalFs, tree.root(), &result).is_empty());
        assert!(tree.exists("a/keep.txt"));
    }

    #[test]
    fn test_prune_tolerates_missing_directories() {
        let tree = TempTree::new();

        let mut result = ReconciliationResult::new(tree.root());
        result.push(deleted("never/existed.txt"));

        assert!(prune(&LocalFs, tree.root(), &result).is_empty());
    }

    #[test]
    fn test_prune_never_removes_root() {
        let tree = TempTree::new();

        let mut result = ReconciliationResult::new(tree.root());
        result.push(deleted("only.txt"));

        assert!(prune(&LocalFs, tree.root(), &result).is_empty());
        assert!(tree.root().exists());
    }
}
