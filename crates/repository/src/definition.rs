//! Repository definitions
//!
//! A definition is the user-side half of a repository: it names the model the
//! repository reads from and registers the annotation and filter operations
//! that can be applied by name.
//!
//! ```ignore
//! struct UserRepository {
//!     users: Table,
//! }
//!
//! impl UserRepository {
//!     fn annotate_active(repo: &Repository<Self>) -> Result<QuerySet> {
//!         Ok(repo.instance_list().annotate("active", |r| Value::Bool(!r.get("last_login").is_null())))
//!     }
//!
//!     fn filter_owned(repo: &Repository<Self>) -> Result<QuerySet> {
//!         let user = repo.context().get("user").cloned().unwrap_or_default();
//!         repo.instance_list().filter(&Criteria::new().with("owner", user))
//!     }
//! }
//!
//! impl RepositoryDefinition for UserRepository {
//!     type Model = Table;
//!
//!     fn model(&self) -> &Table {
//!         &self.users
//!     }
//!
//!     fn operations(ops: &mut OperationRegistry<Self>) {
//!         ops.annotation("active", Self::annotate_active)
//!             .filter("owned", Self::filter_owned);
//!     }
//! }
//! ```

use quarry_core::Model;

use crate::registry::OperationRegistry;

/// Collection handle type of a definition's model
pub type CollectionOf<D> = <<D as RepositoryDefinition>::Model as Model>::Collection;

/// Item type produced by evaluating a definition's collection
pub type ItemOf<D> = <CollectionOf<D> as quarry_core::Collection>::Item;

/// Declares a repository's model and its named operations
pub trait RepositoryDefinition: Sized {
    /// Model supplying the full collection
    type Model: Model;

    /// Model instance the repository reads from
    fn model(&self) -> &Self::Model;

    /// Register this repository's operations
    ///
    /// Called once per repository construction.
    fn operations(registry: &mut OperationRegistry<Self>);
}
