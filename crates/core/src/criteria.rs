//! Ad-hoc filter criteria
//!
//! Criteria are an ordered mapping of lookup keys to operand values:
//!
//! ```text
//! {"status": "active", "age__gte": 18, "name__icontains": "an"}
//! ```
//!
//! A key is either a bare field name (exact match) or `field__lookup`.
//! All conditions must hold (AND semantics). Keys are only parsed when the
//! criteria are applied, so an unknown lookup surfaces from the collection's
//! `filter` call as `Error::InvalidLookup`.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Separator between field name and lookup in a criteria key
pub const LOOKUP_SEPARATOR: &str = "__";

/// Comparison applied by a single condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// Field equals operand (no coercion)
    Exact,
    /// Case-insensitive string equality
    IExact,
    /// Field greater than operand
    Gt,
    /// Field greater than or equal to operand
    Gte,
    /// Field less than operand
    Lt,
    /// Field less than or equal to operand
    Lte,
    /// String field contains operand, or array field contains element
    Contains,
    /// Case-insensitive substring match
    IContains,
    /// String field starts with operand
    StartsWith,
    /// String field ends with operand
    EndsWith,
    /// Field equals one of the operand array's elements
    In,
    /// Field null-ness equals the boolean operand
    IsNull,
}

impl Lookup {
    /// Parse a lookup suffix
    pub fn parse(suffix: &str) -> Option<Lookup> {
        let lookup = match suffix {
            "exact" => Lookup::Exact,
            "iexact" => Lookup::IExact,
            "gt" => Lookup::Gt,
            "gte" => Lookup::Gte,
            "lt" => Lookup::Lt,
            "lte" => Lookup::Lte,
            "contains" => Lookup::Contains,
            "icontains" => Lookup::IContains,
            "startswith" => Lookup::StartsWith,
            "endswith" => Lookup::EndsWith,
            "in" => Lookup::In,
            "isnull" => Lookup::IsNull,
            _ => return None,
        };
        Some(lookup)
    }

    /// Suffix spelling of this lookup
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::StartsWith => "startswith",
            Lookup::EndsWith => "endswith",
            Lookup::In => "in",
            Lookup::IsNull => "isnull",
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed, validated criteria entry
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field the condition reads
    pub field: String,
    /// Comparison to apply
    pub lookup: Lookup,
    /// Right-hand operand
    pub operand: Value,
}

impl Condition {
    /// Parse a criteria key and validate its operand
    pub fn parse(key: &str, operand: Value) -> Result<Condition> {
        let (field, lookup) = match key.rsplit_once(LOOKUP_SEPARATOR) {
            Some((field, suffix)) => {
                let lookup = Lookup::parse(suffix).ok_or_else(|| Error::InvalidLookup {
                    key: key.to_string(),
                    lookup: suffix.to_string(),
                })?;
                (field, lookup)
            }
            None => (key, Lookup::Exact),
        };

        if field.is_empty() {
            return Err(Error::InvalidCriteria(format!(
                "criteria key '{}' has no field name",
                key
            )));
        }

        let operand_ok = match lookup {
            Lookup::In => operand.as_array().is_some(),
            Lookup::IsNull => operand.as_bool().is_some(),
            Lookup::IExact
            | Lookup::IContains
            | Lookup::StartsWith
            | Lookup::EndsWith => operand.as_str().is_some(),
            _ => true,
        };
        if !operand_ok {
            return Err(Error::InvalidCriteria(format!(
                "lookup '{}' cannot take a {} operand (key '{}')",
                lookup,
                operand.type_name(),
                key
            )));
        }

        Ok(Condition {
            field: field.to_string(),
            lookup,
            operand,
        })
    }

    /// Check a record against this condition
    pub fn matches(&self, record: &Record) -> bool {
        let value = record.get(&self.field);
        let operand = &self.operand;
        match self.lookup {
            Lookup::Exact => value == *operand,
            Lookup::IExact => match (value.as_str(), operand.as_str()) {
                (Some(v), Some(o)) => v.to_lowercase() == o.to_lowercase(),
                _ => false,
            },
            Lookup::Gt => value.compare(operand) == Some(Ordering::Greater),
            Lookup::Gte => matches!(
                value.compare(operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Lookup::Lt => value.compare(operand) == Some(Ordering::Less),
            Lookup::Lte => matches!(
                value.compare(operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Lookup::Contains => match (&value, operand) {
                (Value::String(v), Value::String(o)) => v.contains(o.as_str()),
                (Value::Array(items), o) => items.contains(o),
                _ => false,
            },
            Lookup::IContains => match (value.as_str(), operand.as_str()) {
                (Some(v), Some(o)) => v.to_lowercase().contains(&o.to_lowercase()),
                _ => false,
            },
            Lookup::StartsWith => match (value.as_str(), operand.as_str()) {
                (Some(v), Some(o)) => v.starts_with(o),
                _ => false,
            },
            Lookup::EndsWith => match (value.as_str(), operand.as_str()) {
                (Some(v), Some(o)) => v.ends_with(o),
                _ => false,
            },
            Lookup::In => operand
                .as_array()
                .is_some_and(|items| items.contains(&value)),
            Lookup::IsNull => operand.as_bool() == Some(value.is_null()),
        }
    }
}

/// Ordered mapping of lookup keys to operands
///
/// # Example
///
/// ```
/// use quarry_core::{Criteria, Record};
///
/// let criteria = Criteria::new().with("age__gte", 18).with("status", "active");
/// let record = Record::new(1).with("age", 30).with("status", "active");
/// assert!(criteria.matches(&record).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria {
    entries: BTreeMap<String, Value>,
}

impl Criteria {
    /// Create empty criteria (matches everything)
    pub fn new() -> Self {
        Criteria {
            entries: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, operand: impl Into<Value>) -> Self {
        self.insert(key, operand);
        self
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, key: impl Into<String>, operand: impl Into<Value>) {
        self.entries.insert(key.into(), operand.into());
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate raw entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse every entry into a condition
    pub fn conditions(&self) -> Result<Vec<Condition>> {
        self.entries
            .iter()
            .map(|(key, operand)| Condition::parse(key, operand.clone()))
            .collect()
    }

    /// Check a single record against all entries
    pub fn matches(&self, record: &Record) -> Result<bool> {
        Ok(self.conditions()?.iter().all(|c| c.matches(record)))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Criteria {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
