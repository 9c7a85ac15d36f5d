//! Change classification and the bucketed results container
//!
//! A before/after pair of [`SourceSnapshot`](crate::source::SourceSnapshot)s is
//! classified into exactly one of four buckets (created, deleted, moved, edited in
//! place). Identical pairs produce no change at all.

mod classify;
mod result;

pub use classify::{Bucket, Change, ChangeKind, NOMINAL_EFFORT, classify};
pub use result::ReconciliationResult;
