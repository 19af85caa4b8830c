//! Record type
//!
//! A record is one row of a collection: a numeric id plus named fields.
//! Annotations add fields to records; filters keep or drop whole records.
//!
//! `id` is a reserved field name: `get("id")` (and so criteria and ordering
//! on `id`) always reads the record id, even if a field named `id` is stored.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static NULL: Value = Value::Null;

/// A single row with an id and ordered named fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Identifier assigned by the backing store
    pub id: u64,
    /// Field values keyed by field name
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new(id: u64) -> Self {
        Record {
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Read a field
    ///
    /// `id` resolves to the record id, shadowing any stored `id` field (read
    /// that through `field`). Missing fields read as `Value::Null`.
    pub fn get(&self, field: &str) -> Value {
        if field == "id" {
            return Value::Int(self.id as i64);
        }
        self.field(field).clone()
    }

    /// Borrow a stored field, `Value::Null` if absent
    pub fn field(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Set (or overwrite) a field
    ///
    /// A field named `id` is stored but only visible through `field`.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// True if the field is stored on this record
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}
