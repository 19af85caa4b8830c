//! QuerySet: lazy collection handle over a table
//!
//! A query set is a table plus an ordered pipeline of steps. Builders
//! (`filter`, `exclude`, `annotate`, `filter_by`, `order_by`) return a new
//! query set with one more step and never touch the receiver. Nothing runs
//! until an evaluating call (`all`, `count`, `first`, `exists`), which takes a
//! snapshot of the table and replays the pipeline over it.

use std::fmt;
use std::sync::Arc;

use quarry_core::{Collection, Condition, Criteria, Record, Result, Value};
use tracing::{debug, warn};

use crate::table::Table;

/// Computes a derived field value for a record
pub type Annotator = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Decides whether a record is kept
pub type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

#[derive(Clone)]
enum Step {
    Filter(Vec<Condition>),
    Exclude(Vec<Condition>),
    Annotate { field: String, annotator: Annotator },
    Where { label: String, predicate: Predicate },
    OrderBy { field: String, descending: bool },
}

impl Step {
    fn describe(&self) -> String {
        fn conditions(conds: &[Condition]) -> String {
            conds
                .iter()
                .map(|c| format!("{}__{}={}", c.field, c.lookup, c.operand))
                .collect::<Vec<_>>()
                .join(", ")
        }
        match self {
            Step::Filter(conds) => format!("filter({})", conditions(conds)),
            Step::Exclude(conds) => format!("exclude({})", conditions(conds)),
            Step::Annotate { field, .. } => format!("annotate({})", field),
            Step::Where { label, .. } => format!("where({})", label),
            Step::OrderBy { field, descending } => {
                format!("order_by({}{})", if *descending { "-" } else { "" }, field)
            }
        }
    }

    fn apply(&self, rows: &mut Vec<Record>) {
        match self {
            Step::Filter(conds) => rows.retain(|r| conds.iter().all(|c| c.matches(r))),
            Step::Exclude(conds) => rows.retain(|r| !conds.iter().all(|c| c.matches(r))),
            Step::Annotate { field, annotator } => {
                for row in rows.iter_mut() {
                    let value = annotator(row);
                    row.set(field.clone(), value);
                }
            }
            Step::Where { predicate, .. } => rows.retain(|r| predicate(r)),
            Step::OrderBy { field, descending } => {
                // Stable total order: missing/Null first (last when descending),
                // then Bool < numbers < String < Array < Object
                rows.sort_by(|a, b| {
                    let ord = a.get(field).total_order(&b.get(field));
                    if *descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                });
            }
        }
    }
}

/// Lazy, immutable handle to a (derived) set of table records
#[derive(Clone)]
pub struct QuerySet {
    table: Table,
    steps: Vec<Step>,
}

impl QuerySet {
    /// Unfiltered query set over a table
    pub fn new(table: Table) -> Self {
        QuerySet {
            table,
            steps: Vec::new(),
        }
    }

    fn push(&self, step: Step) -> Self {
        let mut next = self.clone();
        next.steps.push(step);
        next
    }

    /// Table this query set reads from
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// True if no step has been added (the full collection)
    pub fn is_unfiltered(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of pending steps
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Human-readable pipeline, one entry per step
    pub fn describe(&self) -> Vec<String> {
        self.steps.iter().map(Step::describe).collect()
    }

    /// Keep records matching every criteria entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidLookup` / `InvalidCriteria` for malformed entries.
    pub fn filter(&self, criteria: &Criteria) -> Result<Self> {
        let conds = criteria.conditions().map_err(|e| {
            warn!(target: "quarry::storage", table = self.table.name(), error = %e, "Criteria rejected");
            e
        })?;
        Ok(self.push(Step::Filter(conds)))
    }

    /// Drop records matching every criteria entry
    ///
    /// Empty criteria exclude nothing and add no step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLookup` / `InvalidCriteria` for malformed entries.
    pub fn exclude(&self, criteria: &Criteria) -> Result<Self> {
        let conds = criteria.conditions().map_err(|e| {
            warn!(target: "quarry::storage", table = self.table.name(), error = %e, "Criteria rejected");
            e
        })?;
        if conds.is_empty() {
            return Ok(self.clone());
        }
        Ok(self.push(Step::Exclude(conds)))
    }

    /// Add a derived field to every record
    pub fn annotate<F>(&self, field: impl Into<String>, annotator: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        self.push(Step::Annotate {
            field: field.into(),
            annotator: Arc::new(annotator),
        })
    }

    /// Keep records for which the predicate holds
    ///
    /// `label` only shows up in `describe()`.
    pub fn filter_by<F>(&self, label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.push(Step::Where {
            label: label.into(),
            predicate: Arc::new(predicate),
        })
    }

    /// Sort by a field; a leading `-` sorts descending
    pub fn order_by(&self, field: &str) -> Self {
        let (field, descending) = match field.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (field, false),
        };
        self.push(Step::OrderBy {
            field: field.to_string(),
            descending,
        })
    }

    /// Evaluate the pipeline
    pub fn all(&self) -> Result<Vec<Record>> {
        let mut rows = self.table.snapshot();
        let scanned = rows.len();
        for step in &self.steps {
            step.apply(&mut rows);
        }
        debug!(
            target: "quarry::storage",
            table = self.table.name(),
            steps = self.steps.len(),
            scanned,
            returned = rows.len(),
            "Query set evaluated"
        );
        Ok(rows)
    }

    /// Number of records the pipeline yields
    pub fn count(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    /// First record the pipeline yields
    pub fn first(&self) -> Result<Option<Record>> {
        Ok(self.all()?.into_iter().next())
    }

    /// True if the pipeline yields at least one record
    pub fn exists(&self) -> Result<bool> {
        Ok(self.count()? > 0)
    }
}

impl Collection for QuerySet {
    type Item = Record;

    fn all(&self) -> Result<Vec<Record>> {
        QuerySet::all(self)
    }

    fn filter(&self, criteria: &Criteria) -> Result<Self> {
        QuerySet::filter(self, criteria)
    }
}

impl fmt::Debug for QuerySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySet")
            .field("table", &self.table.name())
            .field("steps", &self.describe())
            .finish()
    }
}
