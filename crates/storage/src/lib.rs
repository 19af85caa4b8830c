//! Storage layer for Quarry
//!
//! This crate implements an in-memory backing store for repositories:
//! - Table: BTreeMap-based record storage with RwLock and id allocation
//! - QuerySet: Lazy collection handle (table + ordered pipeline of steps)
//!
//! `Table` implements [`Model`](quarry_core::Model) and `QuerySet` implements
//! [`Collection`](quarry_core::Collection), so a repository can be declared
//! directly over a table.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod queryset;
pub mod table;

pub use queryset::{Annotator, Predicate, QuerySet};
pub use table::Table;
