//! Quarry - named annotation and filter dispatch over record collections
//!
//! A repository wraps a model's collection and lets callers compose it with
//! annotation and filter operations looked up by name, instead of calling
//! query methods directly. What has been applied is tracked in the
//! repository's state and can be reset at any time.
//!
//! # Quick Start
//!
//! ```ignore
//! use quarry::{Criteria, OperationRegistry, QuerySet, Repository, RepositoryDefinition, Result, Table};
//!
//! struct Tokens { table: Table }
//!
//! impl RepositoryDefinition for Tokens {
//!     type Model = Table;
//!     fn model(&self) -> &Table { &self.table }
//!     fn operations(ops: &mut OperationRegistry<Self>) {
//!         ops.filter("is_minted", |repo| {
//!             repo.instance_list().filter(&Criteria::new().with("minted", true))
//!         });
//!     }
//! }
//!
//! let mut repo = Repository::new(Tokens { table });
//! let minted = repo.add_filters(["is_minted"])?.get_all()?;
//! ```
//!
//! # Architecture
//!
//! - `quarry-core`: values, records, criteria, context, errors and the
//!   `Model` / `Collection` traits
//! - `quarry-storage`: in-memory `Table` and lazy `QuerySet`
//! - `quarry-repository`: the `Repository` facade and its registry

pub use quarry_core::{
    Collection, Condition, Context, Criteria, Error, Lookup, Model, OperationKind, Record, Result,
    Value,
};
pub use quarry_repository::{
    CollectionOf, Extension, ItemOf, Operation, OperationRegistry, Repository, RepositoryConfig,
    RepositoryDefinition, RepositoryState, CONFIG_FILE_NAME,
};
pub use quarry_storage::{QuerySet, Table};
