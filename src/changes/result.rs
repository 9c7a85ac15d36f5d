use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use super::classify::{Bucket, Change};
use crate::engine::ProcessError;

/// Classified changes for one discovery pass, bucketed by category
#[derive(Debug, Serialize)]
pub struct ReconciliationResult {
    root: PathBuf,
    created: Vec<Change>,
    deleted: Vec<Change>,
    moved: Vec<Change>,
    edited_in_place: Vec<Change>,
    #[serde(skip)]
    first_failure: Option<ProcessError>,
}

impl ReconciliationResult {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: Vec::new(),
            deleted: Vec::new(),
            moved: Vec::new(),
            edited_in_place: Vec::new(),
            first_failure: None,
        }
    }

    /// Append a change to the bucket its kind belongs to
    pub fn push(&mut self, change: Change) {
        match change.bucket() {
            Bucket::Created => self.created.push(change),
            Bucket::Deleted => self.deleted.push(change),
            Bucket::Moved => self.moved.push(change),
            Bucket::EditedInPlace => self.edited_in_place.push(change),
        }
    }

    /// Record a processing failure; only the first one is retained
    pub fn record_failure(&mut self, err: ProcessError) {
        if self.first_failure.is_none() {
            self.first_failure = Some(err);
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Change] {
        match bucket {
            Bucket::Created => &self.created,
            Bucket::Deleted => &self.deleted,
            Bucket::Moved => &self.moved,
            Bucket::EditedInPlace => &self.edited_in_place,
        }
    }

    #[must_use]
    pub fn created(&self) -> &[Change] {
        &self.created
    }

    #[must_use]
    pub fn deleted(&self) -> &[Change] {
        &self.deleted
    }

    #[must_use]
    pub fn moved(&self) -> &[Change] {
        &self.moved
    }

    #[must_use]
    pub fn edited_in_place(&self) -> &[Change] {
        &self.edited_in_place
    }

    /// All changes in bucket processing order
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        Bucket::ORDER.into_iter().flat_map(|b| self.bucket(b).iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.created.len() + self.deleted.len() + self.moved.len() + self.edited_in_place.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn first_failure(&self) -> Option<&ProcessError> {
        self.first_failure.as_ref()
    }

    /// Remove and return the retained failure
    pub fn take_first_failure(&mut self) -> Option<ProcessError> {
        self.first_failure.take()
    }

    /// Sum of the estimated effort of every change
    #[must_use]
    pub fn total_effort(&self) -> Duration {
        self.iter().map(|c| c.estimated_effort).sum()
    }
}
