use crate::source::SourceSnapshot;

use super::ProcessError;

/// Output of a transformation for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// New state of the file; `None` deletes it
    pub after: Option<SourceSnapshot>,
    /// Files brought into existence alongside this one
    pub generated: Vec<SourceSnapshot>,
    /// Identifiers of the transformations that produced this output
    pub caused_by: Vec<String>,
}

impl Transformed {
    /// Leave the file exactly as it was
    #[must_use]
    pub fn unchanged(before: &SourceSnapshot) -> Self {
        Self {
            after: Some(before.clone()),
            generated: Vec::new(),
            caused_by: Vec::new(),
        }
    }

    #[must_use]
    pub fn caused_by(mut self, ids: Vec<String>) -> Self {
        self.caused_by = ids;
        self
    }
}

/// Computes the after-state of a file.
///
/// Implementations are called from a thread pool and must not rely on call order.
pub trait SourceTransform: Sync {
    /// Transform one before-state.
    ///
    /// # Errors
    /// Returns `ProcessError::Transform` when the file cannot be transformed.
    fn transform(&self, before: &SourceSnapshot) -> Result<Transformed, ProcessError>;
}

impl<F> SourceTransform for F
where
    F: Fn(&SourceSnapshot) -> Result<Transformed, ProcessError> + Sync,
{
    fn transform(&self, before: &SourceSnapshot) -> Result<Transformed, ProcessError> {
        self(before)
    }
}
