//! In-memory `TodoRepository`.
//!
//! Both tables live behind a single `RwLock`, so every write (including the
//! uniqueness re-check and the cascading delete) happens inside one critical
//! section and readers never observe a half-applied change.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::repository::{RepositoryError, TodoRepository};
use crate::types::{EntityKind, Item, ItemFields, ListFields, RecordId, TodoList};

#[derive(Debug, Default)]
struct Tables {
    lists: BTreeMap<RecordId, TodoList>,
    items: BTreeMap<RecordId, Item>,
    last_list_id: RecordId,
    last_item_id: RecordId,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<RecordId>) -> bool {
        self.lists
            .values()
            .any(|list| list.name == name && Some(list.id) != except)
    }

    fn scoped_item_mut(&mut self, list_id: RecordId, id: RecordId) -> Option<&mut Item> {
        self.items
            .get_mut(&id)
            .filter(|item| item.todo_list_id == list_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn all_lists(&self) -> Result<Vec<TodoList>, RepositoryError> {
        Ok(self.tables.read().await.lists.values().cloned().collect())
    }

    async fn find_list(&self, id: RecordId) -> Result<Option<TodoList>, RepositoryError> {
        Ok(self.tables.read().await.lists.get(&id).cloned())
    }

    async fn list_name_taken(
        &self,
        name: &str,
        except: Option<RecordId>,
    ) -> Result<bool, RepositoryError> {
        Ok(self.tables.read().await.name_taken(name, except))
    }

    async fn insert_list(&self, fields: ListFields) -> Result<TodoList, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&fields.name, None) {
            return Err(RepositoryError::NameTaken(fields.name));
        }
        tables.last_list_id += 1;
        let now = Utc::now();
        let list = TodoList {
            id: tables.last_list_id,
            name: fields.name,
            created_at: now,
            updated_at: now,
        };
        tables.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn update_list(
        &self,
        id: RecordId,
        fields: ListFields,
    ) -> Result<TodoList, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&fields.name, Some(id)) {
            return Err(RepositoryError::NameTaken(fields.name));
        }
        let list = tables.lists.get_mut(&id).ok_or(RepositoryError::Missing {
            kind: EntityKind::TodoList,
            id,
        })?;
        list.name = fields.name;
        list.updated_at = Utc::now();
        Ok(list.clone())
    }

    async fn delete_list(&self, id: RecordId) -> Result<usize, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.lists.remove(&id).is_none() {
            return Err(RepositoryError::Missing {
                kind: EntityKind::TodoList,
                id,
            });
        }
        let before = tables.items.len();
        tables.items.retain(|_, item| item.todo_list_id != id);
        Ok(before - tables.items.len())
    }

    async fn items_in(&self, list_id: RecordId) -> Result<Vec<Item>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|item| item.todo_list_id == list_id)
            .cloned()
            .collect())
    }

    async fn find_item(
        &self,
        list_id: RecordId,
        id: RecordId,
    ) -> Result<Option<Item>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .get(&id)
            .filter(|item| item.todo_list_id == list_id)
            .cloned())
    }

    async fn insert_item(
        &self,
        list_id: RecordId,
        fields: ItemFields,
    ) -> Result<Item, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.lists.contains_key(&list_id) {
            return Err(RepositoryError::ParentMissing(list_id));
        }
        tables.last_item_id += 1;
        let now = Utc::now();
        let item = Item {
            id: tables.last_item_id,
            todo_list_id: list_id,
            name: fields.name,
            description: fields.description,
            created_at: now,
            updated_at: now,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        list_id: RecordId,
        id: RecordId,
        fields: ItemFields,
    ) -> Result<Item, RepositoryError> {
        let mut tables = self.tables.write().await;
        let item = tables
            .scoped_item_mut(list_id, id)
            .ok_or(RepositoryError::Missing {
                kind: EntityKind::Item,
                id,
            })?;
        item.name = fields.name;
        item.description = fields.description;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete_item(&self, list_id: RecordId, id: RecordId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.scoped_item_mut(list_id, id).is_none() {
            return Err(RepositoryError::Missing {
                kind: EntityKind::Item,
                id,
            });
        }
        tables.items.remove(&id);
        Ok(())
    }
}
