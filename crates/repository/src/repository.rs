//! Repository: stateful facade over a model's collection
//!
//! ## Design
//!
//! A repository holds three pieces of mutable state:
//! - `instance_list`: the current collection handle, starting as the model's
//!   full collection
//! - `state`: names of the operations applied so far, per kind, in order
//! - `context`: caller-supplied data operations may read
//!
//! Applying a name looks it up in the operation registry built from the
//! definition, runs the operation against the repository, stores the returned
//! collection as the new `instance_list` and records the name. `clean` returns
//! to the full collection and empty state.
//!
//! ## Ownership
//!
//! Mutators take `&mut self` and return `&mut Self` so calls chain with `?`.
//! There is no internal locking; one repository belongs to one logical
//! request. Build a fresh one (or clone a prototype) per use case.
//!
//! ## Failure
//!
//! Batches fail fast. Names applied before the failing one stay applied;
//! nothing is rolled back. Errors from an operation or from the collection
//! are returned unchanged.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use quarry_core::{Collection, Context, Criteria, Error, Model, OperationKind, Result};
use tracing::debug;

use crate::config::RepositoryConfig;
use crate::definition::{CollectionOf, ItemOf, RepositoryDefinition};
use crate::extension::Extension;
use crate::registry::{normalize_name, OperationRegistry};
use crate::state::RepositoryState;

/// Named-operation facade over a definition's model
///
/// # Example
///
/// ```ignore
/// let mut repo = Repository::new(UserRepository { users });
///
/// repo.add_annotations(["active"])?
///     .add_filters(["owned"])?;
///
/// let rows = repo.get_all()?;
/// assert_eq!(repo.state().filters, vec!["owned"]);
/// ```
pub struct Repository<D: RepositoryDefinition> {
    definition: D,
    config: RepositoryConfig,
    registry: Arc<OperationRegistry<D>>,
    instance_list: CollectionOf<D>,
    state: RepositoryState,
    context: Context,
}

impl<D: RepositoryDefinition> Repository<D> {
    /// Create a repository with default configuration
    pub fn new(definition: D) -> Self {
        Self::with_config(definition, RepositoryConfig::default())
    }

    /// Create a repository with the given configuration
    ///
    /// Builds the operation registry from `D::operations` and starts from the
    /// model's full collection with empty state and context.
    pub fn with_config(definition: D, config: RepositoryConfig) -> Self {
        let mut registry = OperationRegistry::with_config(config.clone());
        D::operations(&mut registry);
        let instance_list = definition.model().objects();
        Repository {
            definition,
            config,
            registry: Arc::new(registry),
            instance_list,
            state: RepositoryState::new(),
            context: Context::new(),
        }
    }

    // ========== Dispatch ==========

    fn apply_operation(&mut self, kind: OperationKind, name: &str) -> Result<()> {
        let key = normalize_name(name);
        let operation = match self.registry.get(kind, &key) {
            Some(operation) => Arc::clone(operation),
            None => {
                debug!(target: "quarry::repository", %kind, name, "Operation not implemented");
                return Err(Error::not_implemented(kind, name));
            }
        };

        self.instance_list = operation(self)?;
        debug!(
            target: "quarry::repository",
            %kind,
            name = %key,
            applied = self.state.names(kind).len() + 1,
            "Operation applied"
        );
        self.state.record(kind, key);
        Ok(())
    }

    fn apply_all<I, S>(&mut self, kind: OperationKind, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.apply_operation(kind, name.as_ref())?;
        }
        Ok(self)
    }

    /// Apply annotations by name, in order
    ///
    /// # Errors
    ///
    /// Returns `OperationNotImplemented` for the first unknown name; earlier
    /// names remain applied. Errors from an operation propagate unchanged.
    pub fn add_annotations<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.apply_all(OperationKind::Annotation, names)
    }

    /// Apply filters by name, in order
    ///
    /// # Errors
    ///
    /// Same contract as [`add_annotations`](Self::add_annotations).
    pub fn add_filters<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.apply_all(OperationKind::Filter, names)
    }

    /// Replace context, then apply annotations, then filters
    ///
    /// Absent parts are skipped; an empty extension changes nothing.
    pub fn extend(&mut self, extension: Extension) -> Result<&mut Self> {
        let Extension {
            annotations,
            filters,
            context,
        } = extension;

        if let Some(context) = context {
            self.context = context;
        }
        if let Some(annotations) = annotations {
            self.add_annotations(annotations)?;
        }
        if let Some(filters) = filters {
            self.add_filters(filters)?;
        }
        Ok(self)
    }

    /// Return to the full collection and empty state
    ///
    /// Context is left as is.
    pub fn clean(&mut self) -> &mut Self {
        self.instance_list = self.definition.model().objects();
        self.state.clear();
        debug!(target: "quarry::repository", "Repository cleaned");
        self
    }

    // ========== Reads ==========

    /// Evaluate the current collection
    pub fn get_all(&self) -> Result<Vec<ItemOf<D>>> {
        self.instance_list.all()
    }

    /// One-off filter on the current collection
    ///
    /// The result is not stored and not recorded in state.
    pub fn filter(&self, criteria: &Criteria) -> Result<CollectionOf<D>> {
        self.instance_list.filter(criteria)
    }

    /// Names of every registered annotation
    pub fn get_annotations(&self) -> BTreeSet<String> {
        self.registry.names(OperationKind::Annotation)
    }

    /// Names of every registered filter
    pub fn get_filters(&self) -> BTreeSet<String> {
        self.registry.names(OperationKind::Filter)
    }

    /// Every registered operation as a method-style name (`annotate_x`, `filter_y`)
    pub fn qualified_operations(&self) -> BTreeSet<String> {
        self.registry.qualified_names()
    }

    /// True if `name` is registered for `kind`
    pub fn implements(&self, kind: OperationKind, name: &str) -> bool {
        self.registry.contains(kind, name)
    }

    // ========== Accessors ==========

    /// Applied operation names
    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    /// Current context
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable access to the current context
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Replace the context wholesale
    pub fn set_context(&mut self, context: Context) -> &mut Self {
        self.context = context;
        self
    }

    /// Current collection handle
    pub fn instance_list(&self) -> &CollectionOf<D> {
        &self.instance_list
    }

    /// Replace the current collection handle without touching state
    pub fn set_instance_list(&mut self, instance_list: CollectionOf<D>) -> &mut Self {
        self.instance_list = instance_list;
        self
    }

    /// Definition this repository was built from
    pub fn definition(&self) -> &D {
        &self.definition
    }

    /// Configuration in effect
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }
}

impl<D: RepositoryDefinition + Clone> Clone for Repository<D> {
    fn clone(&self) -> Self {
        Repository {
            definition: self.definition.clone(),
            config: self.config.clone(),
            registry: Arc::clone(&self.registry),
            instance_list: self.instance_list.clone(),
            state: self.state.clone(),
            context: self.context.clone(),
        }
    }
}

impl<D: RepositoryDefinition> fmt::Debug for Repository<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("state", &self.state)
            .field("context", &self.context)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
