//! Domain entities and the field sets used to create or change them.
//!
//! # Design
//! Entities carry storage-assigned ids and timestamps and are only ever
//! built by a repository. Callers describe what they want with the field
//! structs (`ListFields`, `ItemFields`, `ItemPatch`), which deliberately have
//! no `id` or `todo_list_id`: those are never client-supplied.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::TodoError;

/// Storage-assigned identifier. Sequences start at 1 and are never reused.
pub type RecordId = u64;

/// The two kinds of record the service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    TodoList,
    Item,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::TodoList => write!(f, "TodoList"),
            EntityKind::Item => write!(f, "Item"),
        }
    }
}

/// Parse an identifier taken from a request path.
///
/// Anything that is not a valid id cannot name an existing record, so it is
/// reported as `NotFound` carrying the raw text the client sent.
pub fn parse_id(kind: EntityKind, raw: &str) -> Result<RecordId, TodoError> {
    raw.parse().map_err(|_| TodoError::not_found(kind, raw))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: RecordId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: RecordId,
    pub todo_list_id: RecordId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate values for a todo list. A missing `name` deserializes as blank
/// so it is reported by validation rather than by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListFields {
    #[serde(default)]
    pub name: String,
}

impl ListFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Candidate values for a new item, or the merged result of an `ItemPatch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ItemFields {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Changes to an existing item. Omitted fields keep their current value;
/// present fields replace it whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemPatch {
    pub fn merge(self, current: &Item) -> ItemFields {
        ItemFields {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
        }
    }
}
