//! Operation registry for name-based dispatch
//!
//! The registry maps `(OperationKind, name)` to the operation a repository
//! runs when that name is applied. Names are lower-cased on the way in and on
//! lookup, so `"ACTIVE"` and `"active"` address the same operation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn operations(ops: &mut OperationRegistry<Self>) {
//!     ops.annotation("score", Self::annotate_score)
//!         .filter("is_active", |repo| {
//!             repo.instance_list().filter(&Criteria::new().with("active", true))
//!         });
//!
//!     // Method-style names pick the kind from the configured prefix
//!     ops.register_method("filter_is_owned", Self::filter_is_owned)
//!         .expect("known prefix");
//! }
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use quarry_core::{Error, OperationKind, Result};

use crate::config::RepositoryConfig;
use crate::definition::{CollectionOf, RepositoryDefinition};
use crate::repository::Repository;

/// A registered operation: derives a new collection from the repository
pub type Operation<D> = Arc<dyn Fn(&Repository<D>) -> Result<CollectionOf<D>> + Send + Sync>;

/// Normalise an operation name for registration and lookup
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Registry of named operations for one repository definition
pub struct OperationRegistry<D: RepositoryDefinition> {
    /// Operations by kind and lower-cased name
    operations: HashMap<(OperationKind, String), Operation<D>>,
    /// Prefixes for method-style registration and rendering
    config: RepositoryConfig,
}

impl<D: RepositoryDefinition> OperationRegistry<D> {
    /// Create an empty registry with default prefixes
    pub fn new() -> Self {
        Self::with_config(RepositoryConfig::default())
    }

    /// Create an empty registry with the given prefixes
    pub fn with_config(config: RepositoryConfig) -> Self {
        OperationRegistry {
            operations: HashMap::new(),
            config,
        }
    }

    /// Config this registry renders method names with
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Register an operation
    ///
    /// A later registration under the same kind and name replaces the
    /// earlier one.
    pub fn register<F>(&mut self, kind: OperationKind, name: &str, operation: F) -> &mut Self
    where
        F: Fn(&Repository<D>) -> Result<CollectionOf<D>> + Send + Sync + 'static,
    {
        self.operations
            .insert((kind, normalize_name(name)), Arc::new(operation));
        self
    }

    /// Register an annotation
    pub fn annotation<F>(&mut self, name: &str, operation: F) -> &mut Self
    where
        F: Fn(&Repository<D>) -> Result<CollectionOf<D>> + Send + Sync + 'static,
    {
        self.register(OperationKind::Annotation, name, operation)
    }

    /// Register a filter
    pub fn filter<F>(&mut self, name: &str, operation: F) -> &mut Self
    where
        F: Fn(&Repository<D>) -> Result<CollectionOf<D>> + Send + Sync + 'static,
    {
        self.register(OperationKind::Filter, name, operation)
    }

    /// Register an operation under a method-style name
    ///
    /// `annotate_score` registers annotation `score`; `filter_is_owned`
    /// registers filter `is_owned` (with the default prefixes).
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperationName` if the name does not start with a
    /// configured prefix followed by `_` and a non-empty operation name.
    pub fn register_method<F>(&mut self, method: &str, operation: F) -> Result<&mut Self>
    where
        F: Fn(&Repository<D>) -> Result<CollectionOf<D>> + Send + Sync + 'static,
    {
        let (kind, name) = self.config.parse_method_name(method).ok_or_else(|| {
            Error::InvalidOperationName(format!(
                "'{}' does not start with '{}_' or '{}_'",
                method, self.config.annotation_prefix, self.config.filter_prefix
            ))
        })?;
        Ok(self.register(kind, &name, operation))
    }

    /// Look up an operation
    pub fn get(&self, kind: OperationKind, name: &str) -> Option<&Operation<D>> {
        self.operations.get(&(kind, normalize_name(name)))
    }

    /// True if an operation is registered under this kind and name
    pub fn contains(&self, kind: OperationKind, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    /// Registered names of one kind
    pub fn names(&self, kind: OperationKind) -> BTreeSet<String> {
        self.operations
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Registered operations rendered as method-style names
    pub fn qualified_names(&self) -> BTreeSet<String> {
        self.operations
            .keys()
            .map(|(kind, name)| self.config.qualify(*kind, name))
            .collect()
    }

    /// Number of registered operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<D: RepositoryDefinition> Default for OperationRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: RepositoryDefinition> fmt::Debug for OperationRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("annotations", &self.names(OperationKind::Annotation))
            .field("filters", &self.names(OperationKind::Filter))
            .finish()
    }
}
