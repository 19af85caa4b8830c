//! Table: in-memory record storage
//!
//! A table holds records keyed by id:
//! - `BTreeMap<u64, Record>` so scans come back in insertion (id) order
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for monotonically increasing ids, starting at 1
//!
//! Cloning a `Table` shares its storage. Query sets created from a table read
//! a snapshot of it when they are evaluated, not when they are built.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use quarry_core::{Model, Record, Value};

use crate::queryset::QuerySet;

struct TableInner {
    name: String,
    rows: RwLock<BTreeMap<u64, Record>>,
    next_id: AtomicU64,
}

/// Shared in-memory table of records
#[derive(Clone)]
pub struct Table {
    inner: Arc<TableInner>,
}

impl Table {
    /// Create a new empty table
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            inner: Arc::new(TableInner {
                name: name.into(),
                rows: RwLock::new(BTreeMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Insert a record built from field/value pairs, returning its id
    pub fn insert<I, K, V>(&self, fields: I) -> u64
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        // Allocate before taking the write lock
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let mut record = Record::new(id);
        for (field, value) in fields {
            record.set(field, value);
        }
        self.inner.rows.write().insert(id, record);
        id
    }

    /// Insert several records, returning their ids in order
    pub fn insert_many<R, I, K, V>(&self, rows: R) -> Vec<u64>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        rows.into_iter().map(|fields| self.insert(fields)).collect()
    }

    /// Fetch a record by id
    pub fn get(&self, id: u64) -> Option<Record> {
        self.inner.rows.read().get(&id).cloned()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.inner.rows.read().len()
    }

    /// True if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.inner.rows.read().is_empty()
    }

    /// True if both handles share the same storage
    pub fn same_table(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy of all records in id order
    pub(crate) fn snapshot(&self) -> Vec<Record> {
        self.inner.rows.read().values().cloned().collect()
    }
}

impl Model for Table {
    type Collection = QuerySet;

    fn objects(&self) -> QuerySet {
        QuerySet::new(self.clone())
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.inner.name)
            .field("len", &self.len())
            .finish()
    }
}
