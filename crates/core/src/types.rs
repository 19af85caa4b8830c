//! Operation kinds
//!
//! A repository tracks two kinds of named operations. The kind decides which
//! registry table is consulted and which state list records the name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a named repository operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Adds derived fields to every record without removing any
    Annotation,
    /// Narrows the collection to a subset of records
    Filter,
}

impl OperationKind {
    /// All kinds, in the order `extend` applies them
    pub const ALL: [OperationKind; 2] = [OperationKind::Annotation, OperationKind::Filter];

    /// Singular name used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Annotation => "annotation",
            OperationKind::Filter => "filter",
        }
    }

    /// Key of this kind in a serialized repository state
    pub fn state_key(&self) -> &'static str {
        match self {
            OperationKind::Annotation => "annotations",
            OperationKind::Filter => "filters",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
