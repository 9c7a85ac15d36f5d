//! Per-file processing: read, transform, classify, bucket
//!
//! Each discovered file is read from disk, handed to a [`SourceTransform`], and the
//! resulting before/after pairs are classified. Per-file work is independent and runs
//! on the rayon pool; results are folded back in discovery order so buckets and the
//! retained first failure are deterministic.

pub mod error;
mod transform;

pub use error::ProcessError;
pub use transform::{SourceTransform, Transformed};

use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::changes::{Change, ReconciliationResult, classify};
use crate::source::SourceSnapshot;

/// Process every file in `files` (root-relative) and bucket the resulting changes
pub fn process_files<T>(root: &Path, files: &[PathBuf], transform: &T) -> ReconciliationResult
where
    T: SourceTransform + ?Sized,
{
    let outcomes: Vec<Result<Vec<Change>, ProcessError>> = files
        .par_iter()
        .map(|file| process_file(root, file, transform))
        .collect();

    let mut result = ReconciliationResult::new(root);
    for outcome in outcomes {
        match outcome {
            Ok(changes) => changes.into_iter().for_each(|c| result.push(c)),
            Err(e) => {
                warn!(error = %e, "file processing failed");
                result.record_failure(e);
            }
        }
    }

    debug!(changes = result.len(), files = files.len(), "processing complete");
    result
}

/// Process a single file and return its changes (possibly none)
///
/// # Errors
/// Returns `ProcessError::Read` if the file cannot be read and
/// `ProcessError::Transform` if the transformation fails.
pub fn process_file<T>(root: &Path, file: &Path, transform: &T) -> Result<Vec<Change>, ProcessError>
where
    T: SourceTransform + ?Sized,
{
    let before = match SourceSnapshot::read(root, file) {
        Ok(snapshot) => snapshot,
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            warn!(path = %file.display(), "skipping file that is not valid UTF-8");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ProcessError::Read {
                path: file.to_path_buf(),
                source,
            });
        }
    };

    let Transformed {
        after,
        generated,
        caused_by,
    } = transform.transform(&before)?;

    let mut changes = Vec::with_capacity(1 + generated.len());
    changes.extend(classify(Some(before), after, caused_by.clone()));
    changes.extend(
        generated
            .into_iter()
            .filter_map(|g| classify(None, Some(g), caused_by.clone())),
    );
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::Bucket;
    use crate::testing::TempTree;

    fn ids() -> Vec<String> {
        vec!["test.Recipe".to_string()]
    }

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    fn noop(s: &SourceSnapshot) -> Result<Transformed, ProcessError> {
        Ok(Transformed::unchanged(s))
    }

    fn edit(s: &SourceSnapshot, content: &str) -> Transformed {
        Transformed {
            after: Some(s.with_content(content)),
            generated: Vec::new(),
            caused_by: ids(),
        }
    }

    #[test]
    fn test_unchanged_files_produce_no_changes() {
        let tree = TempTree::new();
        tree.file("a.txt", "a");
        tree.file("b.txt", "b");

        let result = process_files(tree.root(), &paths(&["a.txt", "b.txt"]), &noop);
        assert!(result.is_empty());
        assert!(result.first_failure().is_none());
    }

    #[test]
    fn test_each_outcome_lands_in_its_bucket() {
        fn transform(s: &SourceSnapshot) -> Result<Transformed, ProcessError> {
            let out = match s.path().to_str() {
                Some("edit.txt") => Transformed {
                    generated: vec![SourceSnapshot::new("gen/extra.txt", "g")],
                    ..edit(s, "new")
                },
                Some("drop.txt") => Transformed {
                    after: None,
                    generated: Vec::new(),
                    caused_by: Vec::new(),
                },
                Some("move.txt") => Transformed {
                    after: Some(s.with_path("moved/move.txt")),
                    generated: Vec::new(),
                    caused_by: Vec::new(),
                },
                _ => Transformed::unchanged(s),
            };
            Ok(out.caused_by(ids()))
        }

        let tree = TempTree::new();
        tree.file("edit.txt", "old");
        tree.file("drop.txt", "x");
        tree.file("move.txt", "m");

        let result = process_files(
            tree.root(),
            &paths(&["drop.txt", "edit.txt", "move.txt"]),
            &transform,
        );
        assert_eq!(result.created().len(), 1);
        assert_eq!(result.deleted().len(), 1);
        assert_eq!(result.moved().len(), 1);
        assert_eq!(result.edited_in_place().len(), 1);
        assert!(result.iter().all(|c| c.caused_by == ids()));
        assert_eq!(result.created()[0].bucket(), Bucket::Created);
    }

    #[test]
    fn test_failures_do_not_stop_other_files() {
        fn transform(s: &SourceSnapshot) -> Result<Transformed, ProcessError> {
            if s.path().to_string_lossy().starts_with("bad") {
                Err(ProcessError::transform(s.path(), "cannot transform"))
            } else {
                Ok(edit(s, "changed"))
            }
        }

        let tree = TempTree::new();
        tree.file("bad1.txt", "x");
        tree.file("good.txt", "x");
        tree.file("bad2.txt", "x");

        let mut result = process_files(
            tree.root(),
            &paths(&["bad1.txt", "good.txt", "bad2.txt"]),
            &transform,
        );
        assert_eq!(result.edited_in_place().len(), 1);
        let failure = result.take_first_failure().unwrap();
        assert!(failure.to_string().contains("bad1.txt"));
    }

    #[test]
    fn test_missing_file_is_a_read_failure() {
        let tree = TempTree::new();

        let result = process_files(tree.root(), &paths(&["ghost.txt"]), &noop);
        assert!(matches!(result.first_failure(), Some(ProcessError::Read { .. })));
    }

    #[test]
    fn test_non_utf8_file_is_skipped() {
        let tree = TempTree::new();
        tree.bytes("image.txt", &[0xff, 0xd8, 0xff]);

        let result = process_files(tree.root(), &paths(&["image.txt"]), &noop);
        assert!(result.is_empty());
        assert!(result.first_failure().is_none());
    }
}
