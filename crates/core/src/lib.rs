//! Core types and traits for Quarry
//!
//! This crate defines the foundational types shared by the storage layer and
//! the repository facade:
//! - Value: Unified value enum for record fields and context entries
//! - Record: A single row with an id and named fields
//! - Criteria / Lookup / Condition: Ad-hoc filter criteria (`field__lookup` keys)
//! - Context: Caller-supplied mapping available to repository operations
//! - OperationKind: Discriminates annotation and filter operations
//! - Traits: Data-access seams (Model, Collection)
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod criteria;
pub mod error;
pub mod record;
pub mod traits;
pub mod types;
pub mod value;

pub use context::Context;
pub use criteria::{Condition, Criteria, Lookup};
pub use error::{Error, Result};
pub use record::Record;
pub use traits::{Collection, Model};
pub use types::OperationKind;
pub use value::Value;
