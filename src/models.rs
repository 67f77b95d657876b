//! Data models for stash.
//!
//! This module defines the core entity: `Attr`, a stored attribute/note
//! record, and its tagged `Value` payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed name tag for plain notes.
pub const NOTE_NAME: &str = "note";

/// Fixed name tag for imported files.
pub const FILE_NAME: &str = "file";

/// The payload of an attribute. Exactly one kind per record, enforced at
/// construction instead of as a four-nullable-columns convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Blob(Vec<u8>),
    Int(i64),
    Real(f64),
}

impl Value {
    /// String rendering of the value, whatever kind it is.
    ///
    /// Blob contents are rendered as lossy UTF-8; imported files are
    /// usually text.
    pub fn display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
            Value::Int(i) => i.to_string(),
            Value::Real(r) => format!("{:.2}", r),
        }
    }

    /// The text content of the value, empty for non-text kinds.
    pub fn text(&self) -> &str {
        match self {
            Value::Text(s) => s,
            _ => "",
        }
    }
}

/// Represents an attribute record.
///
/// Attributes carry a value, optional hierarchy (parent_id), an optional
/// unique alias, a mark flag, and a usage frequency counter. Deletion is
/// soft: `deleted_at` is set, nothing is removed physically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attr {
    /// Rowid assigned by the store, immutable, never reused
    pub id: i64,
    /// Optional parent record; advisory only, never validated for cycles
    pub parent_id: Option<i64>,
    /// Free-text label ("note" and "file" for the built-in kinds)
    pub name: Option<String>,
    /// Human-friendly unique handle, substitutable for the id
    pub alias: Option<String>,
    /// Nonzero marks the record for short-mode listing
    pub mark: i64,
    /// Incremented on every successful id/alias resolution
    pub frequency: i64,
    /// The record's payload
    pub value: Value,
    /// When the record was created (never changes)
    pub created_at: DateTime<Utc>,
    /// When the value text was last edited (None if never)
    pub updated_at: Option<DateTime<Utc>>,
    /// When the record was soft-deleted (None if live)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Attr {
    /// Check if the record is soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the record is marked
    pub fn is_marked(&self) -> bool {
        self.mark != 0
    }

    /// The record's display identifier: its alias when present and
    /// non-empty, else its stringified id.
    pub fn identifier(&self) -> String {
        match &self.alias {
            Some(a) if !a.is_empty() => a.clone(),
            _ => self.id.to_string(),
        }
    }

    /// String rendering of the record's value.
    pub fn display_value(&self) -> String {
        self.value.display()
    }

    /// The record's title line, derived from its text value.
    ///
    /// See [`crate::highlight::title`] for the truncation rules.
    pub fn title(&self) -> String {
        crate::highlight::title(self.value.text())
    }
}
