//! Applied-operation state
//!
//! Records, in call order, every operation name a repository has applied
//! since construction or its last `clean`. Duplicates are kept. Serializes to
//! `{"annotations": [...], "filters": [...]}` for debugging dumps.

use quarry_core::OperationKind;
use serde::{Deserialize, Serialize};

/// Names applied to a repository, per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    /// Applied annotation names, lower-cased, in order
    pub annotations: Vec<String>,
    /// Applied filter names, lower-cased, in order
    pub filters: Vec<String>,
}

impl RepositoryState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Names applied for a kind
    pub fn names(&self, kind: OperationKind) -> &[String] {
        match kind {
            OperationKind::Annotation => &self.annotations,
            OperationKind::Filter => &self.filters,
        }
    }

    /// Total number of applied operations
    pub fn len(&self) -> usize {
        self.annotations.len() + self.filters.len()
    }

    /// True if nothing has been applied
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.filters.is_empty()
    }

    pub(crate) fn record(&mut self, kind: OperationKind, name: String) {
        match kind {
            OperationKind::Annotation => self.annotations.push(name),
            OperationKind::Filter => self.filters.push(name),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.annotations.clear();
        self.filters.clear();
    }
}
