//! Resource operations shared by every surface.
//!
//! # Design
//! `TodoService` is the only place that combines validation with storage.
//! Item operations take the parent `TodoList` as an explicit argument:
//! callers resolve it first with `resolve_list`, which is what makes a
//! missing parent fail before anything about the item is looked at.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::TodoError;
use crate::memory::InMemoryRepository;
use crate::repository::TodoRepository;
use crate::types::{EntityKind, Item, ItemFields, ItemPatch, ListFields, RecordId, TodoList};
use crate::validation::{is_blank, validate_item, validate_list, ItemRules};

#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
    rules: ItemRules,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>, rules: ItemRules) -> Self {
        Self { repo, rules }
    }

    /// Service over a fresh, empty in-memory store.
    pub fn in_memory(rules: ItemRules) -> Self {
        Self::new(Arc::new(InMemoryRepository::new()), rules)
    }

    // -----------------------------------------------------------------------
    // Todo lists
    // -----------------------------------------------------------------------

    pub async fn lists(&self) -> Result<Vec<TodoList>, TodoError> {
        Ok(self.repo.all_lists().await?)
    }

    /// Look up a list, failing with `NotFound` when it does not exist.
    pub async fn resolve_list(&self, id: RecordId) -> Result<TodoList, TodoError> {
        debug!(list_id = id, "resolving todo list");
        self.repo
            .find_list(id)
            .await?
            .ok_or_else(|| TodoError::not_found(EntityKind::TodoList, id))
    }

    pub async fn create_list(&self, fields: ListFields) -> Result<TodoList, TodoError> {
        debug!(?fields, "create_list called");
        let taken = self.name_taken(&fields.name, None).await?;
        validate_list(&fields, taken)?;
        let list = self.repo.insert_list(fields).await?;
        info!(list_id = list.id, "todo list created");
        Ok(list)
    }

    pub async fn update_list(
        &self,
        id: RecordId,
        fields: ListFields,
    ) -> Result<TodoList, TodoError> {
        debug!(list_id = id, ?fields, "update_list called");
        let list = self.resolve_list(id).await?;
        let taken = self.name_taken(&fields.name, Some(list.id)).await?;
        validate_list(&fields, taken)?;
        let list = self.repo.update_list(list.id, fields).await?;
        info!(list_id = list.id, "todo list updated");
        Ok(list)
    }

    pub async fn delete_list(&self, id: RecordId) -> Result<(), TodoError> {
        let list = self.resolve_list(id).await?;
        let removed_items = self.repo.delete_list(list.id).await?;
        info!(list_id = list.id, removed_items, "todo list deleted");
        Ok(())
    }

    async fn name_taken(&self, name: &str, except: Option<RecordId>) -> Result<bool, TodoError> {
        if is_blank(name) {
            return Ok(false);
        }
        Ok(self.repo.list_name_taken(name, except).await?)
    }

    // -----------------------------------------------------------------------
    // Items, scoped to a resolved list
    // -----------------------------------------------------------------------

    pub async fn items(&self, list: &TodoList) -> Result<Vec<Item>, TodoError> {
        Ok(self.repo.items_in(list.id).await?)
    }

    pub async fn item(&self, list: &TodoList, id: RecordId) -> Result<Item, TodoError> {
        debug!(list_id = list.id, item_id = id, "resolving item");
        self.repo
            .find_item(list.id, id)
            .await?
            .ok_or_else(|| TodoError::not_found(EntityKind::Item, id))
    }

    pub async fn create_item(
        &self,
        list: &TodoList,
        fields: ItemFields,
    ) -> Result<Item, TodoError> {
        debug!(list_id = list.id, ?fields, "create_item called");
        validate_item(&fields, &self.rules)?;
        let item = self.repo.insert_item(list.id, fields).await?;
        info!(list_id = list.id, item_id = item.id, "item created");
        Ok(item)
    }

    pub async fn update_item(
        &self,
        list: &TodoList,
        id: RecordId,
        patch: ItemPatch,
    ) -> Result<Item, TodoError> {
        debug!(list_id = list.id, item_id = id, ?patch, "update_item called");
        let current = self.item(list, id).await?;
        let fields = patch.merge(&current);
        validate_item(&fields, &self.rules)?;
        let item = self.repo.update_item(list.id, current.id, fields).await?;
        info!(list_id = list.id, item_id = item.id, "item updated");
        Ok(item)
    }

    pub async fn delete_item(&self, list: &TodoList, id: RecordId) -> Result<(), TodoError> {
        let item = self.item(list, id).await?;
        self.repo.delete_item(list.id, item.id).await?;
        info!(list_id = list.id, item_id = item.id, "item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TodoService {
        TodoService::in_memory(ItemRules::default())
    }

    fn sentence(err: TodoError) -> String {
        match err {
            TodoError::Validation(v) => v.to_sentence(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_then_list() {
        let svc = service();
        let list = svc
            .create_list(ListFields::new("Setup RoR project"))
            .await
            .unwrap();
        assert_eq!(list.id, 1);
        let lists = svc.lists().await.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Setup RoR project");
    }

    #[tokio::test]
    async fn duplicate_name_mentions_uniqueness() {
        let svc = service();
        svc.create_list(ListFields::new("Groceries")).await.unwrap();
        let err = svc
            .create_list(ListFields::new("Groceries"))
            .await
            .unwrap_err();
        assert_eq!(sentence(err), "Name has already been taken");
    }

    #[tokio::test]
    async fn update_missing_list_is_not_found() {
        let err = service()
            .update_list(999, ListFields::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find TodoList with id='999'");
    }

    #[tokio::test]
    async fn failed_update_keeps_previous_state() {
        let svc = service();
        let list = svc.create_list(ListFields::new("Chores")).await.unwrap();
        let err = svc
            .update_list(list.id, ListFields::new(""))
            .await
            .unwrap_err();
        assert_eq!(sentence(err), "Name can't be blank");
        assert_eq!(svc.resolve_list(list.id).await.unwrap().name, "Chores");
    }

    #[tokio::test]
    async fn update_to_another_lists_name_is_rejected() {
        let svc = service();
        svc.create_list(ListFields::new("a")).await.unwrap();
        let b = svc.create_list(ListFields::new("b")).await.unwrap();
        let err = svc
            .update_list(b.id, ListFields::new("a"))
            .await
            .unwrap_err();
        assert_eq!(sentence(err), "Name has already been taken");
    }

    #[tokio::test]
    async fn deleting_a_list_removes_its_items() {
        let svc = service();
        let list = svc.create_list(ListFields::new("Docker")).await.unwrap();
        let mut ids = Vec::new();
        for n in 0..4 {
            let item = svc
                .create_item(&list, ItemFields::new(format!("step {n}"), "do it"))
                .await
                .unwrap();
            ids.push(item.id);
        }
        svc.delete_list(list.id).await.unwrap();

        assert!(svc.resolve_list(list.id).await.is_err());
        // Recreate a list so scoped lookups have a live parent to go through.
        let other = svc.create_list(ListFields::new("Other")).await.unwrap();
        for id in ids {
            assert!(svc.item(&other, id).await.is_err());
        }
    }

    #[tokio::test]
    async fn item_is_invisible_from_another_list() {
        let svc = service();
        let a = svc.create_list(ListFields::new("A")).await.unwrap();
        let b = svc.create_list(ListFields::new("B")).await.unwrap();
        let item = svc
            .create_item(&a, ItemFields::new("n", "d"))
            .await
            .unwrap();

        let err = svc.item(&b, item.id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Couldn't find Item with id='{}'", item.id)
        );
        assert!(svc.items(&b).await.unwrap().is_empty());
        assert_eq!(svc.item(&a, item.id).await.unwrap(), item);
    }

    #[tokio::test]
    async fn blank_item_reports_every_field() {
        let svc = service();
        let list = svc.create_list(ListFields::new("L")).await.unwrap();
        let err = svc
            .create_item(&list, ItemFields::new("", ""))
            .await
            .unwrap_err();
        assert_eq!(
            sentence(err),
            "Name can't be blank and Description can't be blank"
        );
        assert!(svc.items(&list).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn item_update_merges_and_validates_as_a_unit() {
        let svc = service();
        let list = svc.create_list(ListFields::new("L")).await.unwrap();
        let item = svc
            .create_item(&list, ItemFields::new("Old", "Old description"))
            .await
            .unwrap();

        let rejected = ItemPatch {
            name: Some("New".to_string()),
            description: Some(String::new()),
        };
        let err = svc.update_item(&list, item.id, rejected).await.unwrap_err();
        assert_eq!(sentence(err), "Description can't be blank");
        assert_eq!(svc.item(&list, item.id).await.unwrap().name, "Old");

        let accepted = ItemPatch {
            name: Some("New".to_string()),
            description: None,
        };
        let updated = svc.update_item(&list, item.id, accepted).await.unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.description, "Old description");
        assert!(updated.updated_at >= item.updated_at);
    }

    #[tokio::test]
    async fn deleted_item_is_gone() {
        let svc = service();
        let list = svc.create_list(ListFields::new("L")).await.unwrap();
        let item = svc
            .create_item(&list, ItemFields::new("n", "d"))
            .await
            .unwrap();
        svc.delete_item(&list, item.id).await.unwrap();
        assert!(matches!(
            svc.item(&list, item.id).await,
            Err(TodoError::NotFound { kind: EntityKind::Item, .. })
        ));
        assert!(svc.delete_item(&list, item.id).await.is_err());
    }

    #[tokio::test]
    async fn configured_name_limit_applies() {
        let svc = TodoService::in_memory(ItemRules::with_name_max_length(25));
        let list = svc.create_list(ListFields::new("L")).await.unwrap();
        let err = svc
            .create_item(&list, ItemFields::new("x".repeat(26), "d"))
            .await
            .unwrap_err();
        assert_eq!(sentence(err), "Name is too long (maximum is 25 characters)");
    }
}
