//! Arguments for `Repository::extend`
//!
//! Every part is optional. A present context replaces the repository's
//! context wholesale; annotations are applied before filters.

use quarry_core::Context;
use serde::{Deserialize, Serialize};

/// Operations and context to add to an existing repository
///
/// Deserializes from payloads such as
/// `{"annotations": ["score"], "filters": ["is_owned"], "context": {"user": 1}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Extension {
    /// Annotation names to apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<String>>,
    /// Filter names to apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<String>>,
    /// Replacement context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

impl Extension {
    /// Empty extension; extending with it changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the annotation names
    pub fn annotations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotations = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the filter names
    pub fn filters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the replacement context
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// True if no part is present
    pub fn is_empty(&self) -> bool {
        self.annotations.is_none() && self.filters.is_none() && self.context.is_none()
    }
}
