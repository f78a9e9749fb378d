//! Persistence boundary.
//!
//! # Design
//! The service talks to storage only through `TodoRepository`. Lookups
//! return `Ok(None)` for a miss; writes report constraint violations as
//! `RepositoryError` values. Implementations must enforce two things
//! atomically, independent of the service's own checks:
//! - a todo list name is unique across all lists;
//! - deleting a list removes its items in the same step.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{EntityKind, Item, ItemFields, ListFields, RecordId, TodoList};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Another list already uses this name.
    #[error("a todo list named {0:?} already exists")]
    NameTaken(String),

    /// An item was written against a list that does not exist.
    #[error("todo list {0} does not exist")]
    ParentMissing(RecordId),

    /// The record disappeared between lookup and write.
    #[error("{kind} {id} does not exist")]
    Missing { kind: EntityKind, id: RecordId },

    /// Failure inside an external storage engine.
    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Every list, ascending by id.
    async fn all_lists(&self) -> Result<Vec<TodoList>, RepositoryError>;

    async fn find_list(&self, id: RecordId) -> Result<Option<TodoList>, RepositoryError>;

    /// Whether a list other than `except` already uses `name`.
    async fn list_name_taken(
        &self,
        name: &str,
        except: Option<RecordId>,
    ) -> Result<bool, RepositoryError>;

    async fn insert_list(&self, fields: ListFields) -> Result<TodoList, RepositoryError>;

    async fn update_list(
        &self,
        id: RecordId,
        fields: ListFields,
    ) -> Result<TodoList, RepositoryError>;

    /// Remove a list and all of its items. Returns how many items went with it.
    async fn delete_list(&self, id: RecordId) -> Result<usize, RepositoryError>;

    /// Items belonging to `list_id`, ascending by id.
    async fn items_in(&self, list_id: RecordId) -> Result<Vec<Item>, RepositoryError>;

    /// Scoped lookup: an item under a different list is a miss.
    async fn find_item(
        &self,
        list_id: RecordId,
        id: RecordId,
    ) -> Result<Option<Item>, RepositoryError>;

    async fn insert_item(
        &self,
        list_id: RecordId,
        fields: ItemFields,
    ) -> Result<Item, RepositoryError>;

    async fn update_item(
        &self,
        list_id: RecordId,
        id: RecordId,
        fields: ItemFields,
    ) -> Result<Item, RepositoryError>;

    async fn delete_item(&self, list_id: RecordId, id: RecordId) -> Result<(), RepositoryError>;
}
