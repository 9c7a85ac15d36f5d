//! Filesystem reconciliation of classified changes
//!
//! Buckets are applied in a fixed order (created, deleted, moved, edited in place) so
//! that every directory a later step relies on exists before it runs and pruning sees
//! the final set of deletions and moves. The first I/O failure aborts the rest of the
//! apply; nothing already written is rolled back.
//!
//! A move is an atomic rename when the filesystem allows it. Otherwise the new file
//! is written and the old one deleted, which leaves a window where both exist. That
//! window is logged and reported in [`ApplyOutcome::fallback_moves`].

pub mod error;
mod fs;
pub mod prune;

pub use error::ApplyError;
pub use fs::{FileSystem, LocalFs};
pub use prune::prune;

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, error, warn};

use crate::changes::{Bucket, Change, ChangeKind, ReconciliationResult};
use crate::source::{DEFAULT_ENCODING, SourceSnapshot};

type Result<T> = std::result::Result<T, ApplyError>;

/// What an apply actually did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub created: usize,
    pub deleted: usize,
    pub moved: usize,
    pub edited: usize,
    /// After-paths of moves that fell back to copy and delete
    pub fallback_moves: Vec<PathBuf>,
    /// Root-relative directories removed by the pruning pass
    pub pruned: Vec<PathBuf>,
}

/// Applies a [`ReconciliationResult`] to a project tree
#[derive(Debug, Default)]
pub struct Applicator<F = LocalFs> {
    fs: F,
}

impl Applicator {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: LocalFs }
    }
}

impl<F: FileSystem> Applicator<F> {
    /// Use a custom filesystem implementation
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Apply every bucket in order.
    ///
    /// # Errors
    /// Returns the first `ApplyError`; later changes are not attempted.
    pub fn apply(&self, root: &Path, result: &ReconciliationResult) -> Result<ApplyOutcome> {
        let mut outcome = ApplyOutcome::default();
        for bucket in Bucket::ORDER {
            for change in result.bucket(bucket) {
                self.apply_change(root, change, &mut outcome)?;
            }
        }
        Ok(outcome)
    }

    /// Remove directories emptied by deletions and moves (best effort)
    pub fn prune(&self, root: &Path, result: &ReconciliationResult) -> Vec<PathBuf> {
        prune::prune(&self.fs, root, result)
    }

    /// Apply, then prune.
    ///
    /// # Errors
    /// Returns the first `ApplyError`; pruning is skipped in that case.
    pub fn reconcile(&self, root: &Path, result: &ReconciliationResult) -> Result<ApplyOutcome> {
        let mut outcome = self.apply(root, result)?;
        outcome.pruned = self.prune(root, result);
        Ok(outcome)
    }

    fn apply_change(&self, root: &Path, change: &Change, outcome: &mut ApplyOutcome) -> Result<()> {
        match &change.kind {
            ChangeKind::Created { after } => {
                self.write_source(root, after)?;
                outcome.created += 1;
            }
            ChangeKind::Deleted { before } => {
                self.delete(&resolve(root, before.path())?)?;
                outcome.deleted += 1;
            }
            ChangeKind::Moved { before, after } => {
                if self.move_source(root, before, after)? {
                    outcome.fallback_moves.push(after.path().to_path_buf());
                }
                outcome.moved += 1;
            }
            ChangeKind::EditedInPlace { after, .. } => {
                self.write_source(root, after)?;
                outcome.edited += 1;
            }
        }
        Ok(())
    }

    fn write_source(&self, root: &Path, snapshot: &SourceSnapshot) -> Result<()> {
        let path = resolve(root, snapshot.path())?;
        self.ensure_parent(&path)?;
        self.write(path, snapshot)
    }

    fn write(&self, path: PathBuf, snapshot: &SourceSnapshot) -> Result<()> {
        if !snapshot.encoding().eq_ignore_ascii_case(DEFAULT_ENCODING) {
            debug!(path = %path.display(), encoding = snapshot.encoding(), "writing as UTF-8");
        }
        self.fs
            .write(&path, snapshot.content().as_bytes())
            .map_err(|source| ApplyError::Write { path, source })
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) => self
                .fs
                .create_dir_all(parent)
                .map_err(|source| ApplyError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                }),
            None => Ok(()),
        }
    }

    fn delete(&self, path: &Path) -> Result<()> {
        match self.fs.remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "already absent");
                Ok(())
            }
            Err(source) => Err(ApplyError::Delete {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Returns `true` when the copy-and-delete fallback was used
    fn move_source(&self, root: &Path, before: &SourceSnapshot, after: &SourceSnapshot) -> Result<bool> {
        let from = resolve(root, before.path())?;
        let to = resolve(root, after.path())?;
        self.ensure_parent(&to)?;

        match self.fs.rename(&from, &to) {
            Ok(()) => {
                if before.content() != after.content() {
                    self.write(to, after)?;
                }
                Ok(false)
            }
            Err(e) => {
                warn!(
                    from = %from.display(),
                    to = %to.display(),
                    error = %e,
                    "rename failed, copying then deleting; both paths exist until the delete completes"
                );
                self.write(to.clone(), after)?;
                self.delete(&from).map_err(|err| match err {
                    ApplyError::Delete { source, .. } => {
                        error!(
                            from = %from.display(),
                            to = %to.display(),
                            "move left both paths present"
                        );
                        ApplyError::IncompleteMove { from, to, source }
                    }
                    other => other,
                })?;
                Ok(true)
            }
        }
    }
}

/// Join a change path onto the root, refusing paths that leave it
fn resolve(root: &Path, relative: &Path) -> Result<PathBuf> {
    if is_contained(relative) {
        Ok(root.join(relative))
    } else {
        Err(ApplyError::OutsideRoot {
            path: relative.to_path_buf(),
        })
    }
}

/// Relative, non-empty, and free of `..` or root components
pub(crate) fn is_contained(relative: &Path) -> bool {
    !relative.as_os_str().is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
