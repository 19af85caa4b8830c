//! Repository facade for Quarry
//!
//! A repository starts from a model's full collection and lets callers
//! compose it with named annotation and filter operations:
//! - RepositoryDefinition: declares the model and registers operations
//! - OperationRegistry: `(kind, name)` → operation dispatch table
//! - Repository: the stateful facade (`add_annotations`, `add_filters`,
//!   `extend`, `clean`, `get_all`, `filter`, introspection)
//! - RepositoryState: applied names, per kind, in order
//! - Extension: optional annotations / filters / context for `extend`
//! - RepositoryConfig: method-name prefixes, loadable from `quarry.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod definition;
pub mod extension;
pub mod registry;
pub mod repository;
pub mod state;

pub use config::{RepositoryConfig, CONFIG_FILE_NAME};
pub use definition::{CollectionOf, ItemOf, RepositoryDefinition};
pub use extension::Extension;
pub use registry::{Operation, OperationRegistry};
pub use repository::Repository;
pub use state::RepositoryState;
