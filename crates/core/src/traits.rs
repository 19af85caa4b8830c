//! Core traits for the data-access seam
//!
//! This module defines the Model and Collection traits. A repository only
//! ever talks to its records through these two traits, so the backing store
//! (the in-memory table, or anything else) can be swapped without touching
//! repository code.

use crate::criteria::Criteria;
use crate::error::Result;

/// Handle to a possibly lazy set of records
///
/// Handles are cheap to clone and immutable: narrowing a handle returns a new
/// one and leaves the receiver untouched. Whether a handle has been evaluated
/// against the backing store yet is up to the implementation.
pub trait Collection: Clone {
    /// Item produced when the collection is evaluated
    type Item;

    /// Evaluate the collection into an ordered sequence of items
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails or a pending step is
    /// invalid.
    fn all(&self) -> Result<Vec<Self::Item>>;

    /// Narrow the collection by equality/comparison criteria
    ///
    /// # Errors
    ///
    /// Returns `InvalidLookup` or `InvalidCriteria` if the criteria cannot be
    /// applied.
    fn filter(&self, criteria: &Criteria) -> Result<Self>;
}

/// A declared record model
///
/// The model is the source of the full, unfiltered collection a repository
/// starts from and returns to on reset.
pub trait Model {
    /// Collection handle type this model hands out
    type Collection: Collection;

    /// Full unfiltered collection
    fn objects(&self) -> Self::Collection;
}
