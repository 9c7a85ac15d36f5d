use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::source::SourceSnapshot;

/// Effort credited to every change
pub const NOMINAL_EFFORT: Duration = Duration::from_secs(60);

/// One of the four mutually exclusive change categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Created,
    Deleted,
    Moved,
    EditedInPlace,
}

impl Bucket {
    /// Processing order used when applying and reporting
    pub const ORDER: [Self; 4] = [Self::Created, Self::Deleted, Self::Moved, Self::EditedInPlace];
}

/// What happened to a file, carrying only the snapshots relevant to that case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeKind {
    Created {
        after: SourceSnapshot,
    },
    Deleted {
        before: SourceSnapshot,
    },
    Moved {
        before: SourceSnapshot,
        after: SourceSnapshot,
    },
    EditedInPlace {
        before: SourceSnapshot,
        after: SourceSnapshot,
    },
}

impl ChangeKind {
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        match self {
            Self::Created { .. } => Bucket::Created,
            Self::Deleted { .. } => Bucket::Deleted,
            Self::Moved { .. } => Bucket::Moved,
            Self::EditedInPlace { .. } => Bucket::EditedInPlace,
        }
    }
}

/// A classified change and the transformations responsible for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    #[serde(flatten)]
    pub kind: ChangeKind,
    pub caused_by: Vec<String>,
    pub estimated_effort: Duration,
}

impl Change {
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        self.kind.bucket()
    }

    /// Path the file had before the change, if it existed
    #[must_use]
    pub fn before_path(&self) -> Option<&Path> {
        match &self.kind {
            ChangeKind::Created { .. } => None,
            ChangeKind::Deleted { before }
            | ChangeKind::Moved { before, .. }
            | ChangeKind::EditedInPlace { before, .. } => Some(before.path()),
        }
    }

    /// Path the file has after the change, if it still exists
    #[must_use]
    pub fn after_path(&self) -> Option<&Path> {
        match &self.kind {
            ChangeKind::Deleted { .. } => None,
            ChangeKind::Created { after }
            | ChangeKind::Moved { after, .. }
            | ChangeKind::EditedInPlace { after, .. } => Some(after.path()),
        }
    }
}

/// Classify a before/after pair.
///
/// Returns `None` when both sides are absent or when they are identical in path and
/// content; such pairs are not changes and must never reach a bucket.
#[must_use]
pub fn classify(
    before: Option<SourceSnapshot>,
    after: Option<SourceSnapshot>,
    caused_by: Vec<String>,
) -> Option<Change> {
    let kind = match (before, after) {
        (None, None) => return None,
        (None, Some(after)) => ChangeKind::Created { after },
        (Some(before), None) => ChangeKind::Deleted { before },
        (Some(before), Some(after)) => {
            if before.path() != after.path() {
                ChangeKind::Moved { before, after }
            } else if before.content() != after.content() {
                ChangeKind::EditedInPlace { before, after }
            } else {
                return None;
            }
        }
    };

    Some(Change {
        kind,
        caused_by,
        estimated_effort: NOMINAL_EFFORT,
    })
}
