//! JSON surface, mounted under `/api`.
//!
//! Each handler parses path ids, calls the shared `TodoService` operation
//! and serializes the result into the view for that endpoint. Errors leave
//! through `ApiError`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    middleware,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_core::{
    parse_id, EntityKind, Item, ItemFields, ItemPatch, ListFields, RecordId, TodoList, TodoService,
};

use crate::error::{ApiError, Message};
use crate::format;
use crate::resolve_list;

pub const DELETED: &str = "Record successfully deleted";

type ApiResult<T> = Result<Json<T>, ApiError>;
type ListPath = Result<Path<String>, PathRejection>;
type ItemPath = Result<Path<(String, String)>, PathRejection>;

/// `{id, name}`: every todo list response, and item listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: RecordId,
    pub name: String,
}

impl From<&TodoList> for Summary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
        }
    }
}

impl From<&Item> for Summary {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
        }
    }
}

/// `{id, name, description}`: a single item fetched by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: RecordId,
    pub name: String,
    pub description: String,
}

impl From<&Item> for ItemDetail {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
        }
    }
}

/// Full item, returned after create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

pub fn routes() -> Router<TodoService> {
    Router::new()
        .route("/todolists", get(list_lists).post(create_list))
        .route(
            "/todolists/{list_id}",
            get(show_list)
                .put(update_list)
                .patch(update_list)
                .delete(delete_list),
        )
        .route(
            "/todolists/{list_id}/items",
            get(list_items).post(create_item),
        )
        .route(
            "/todolists/{list_id}/items/{item_id}",
            get(show_item)
                .put(update_item)
                .patch(update_item)
                .delete(delete_item),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn(format::json_only))
}

pub(crate) async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}

// --- todo lists ---

async fn list_lists(State(service): State<TodoService>) -> ApiResult<Vec<Summary>> {
    let lists = service.lists().await?;
    Ok(Json(lists.iter().map(Summary::from).collect()))
}

async fn show_list(
    State(service): State<TodoService>,
    path: ListPath,
) -> ApiResult<Summary> {
    let Path(list_id) = path?;
    let list = resolve_list(&service, &list_id).await?;
    Ok(Json(Summary::from(&list)))
}

async fn create_list(
    State(service): State<TodoService>,
    body: Result<Json<ListFields>, JsonRejection>,
) -> ApiResult<Summary> {
    let Json(fields) = body?;
    let list = service.create_list(fields).await?;
    Ok(Json(Summary::from(&list)))
}

async fn update_list(
    State(service): State<TodoService>,
    path: ListPath,
    body: Result<Json<ListFields>, JsonRejection>,
) -> ApiResult<Summary> {
    let Path(list_id) = path?;
    let list = resolve_list(&service, &list_id).await?;
    let Json(fields) = body?;
    let list = service.update_list(list.id, fields).await?;
    Ok(Json(Summary::from(&list)))
}

async fn delete_list(
    State(service): State<TodoService>,
    path: ListPath,
) -> ApiResult<Message> {
    let Path(list_id) = path?;
    let id = parse_id(EntityKind::TodoList, &list_id)?;
    service.delete_list(id).await?;
    Ok(Json(Message::new(DELETED)))
}

// --- items ---

async fn list_items(
    State(service): State<TodoService>,
    path: ListPath,
) -> ApiResult<Vec<Summary>> {
    let Path(list_id) = path?;
    let list = resolve_list(&service, &list_id).await?;
    let items = service.items(&list).await?;
    Ok(Json(items.iter().map(Summary::from).collect()))
}

async fn show_item(
    State(service): State<TodoService>,
    path: ItemPath,
) -> ApiResult<ItemDetail> {
    let Path((list_id, item_id)) = path?;
    let list = resolve_list(&service, &list_id).await?;
    let item = service
        .item(&list, parse_id(EntityKind::Item, &item_id)?)
        .await?;
    Ok(Json(ItemDetail::from(&item)))
}

async fn create_item(
    State(service): State<TodoService>,
    path: ListPath,
    body: Result<Json<ItemFields>, JsonRejection>,
) -> ApiResult<ItemRecord> {
    let Path(list_id) = path?;
    let list = resolve_list(&service, &list_id).await?;
    let Json(fields) = body?;
    let item = service.create_item(&list, fields).await?;
    Ok(Json(ItemRecord::from(item)))
}

async fn update_item(
    State(service): State<TodoService>,
    path: ItemPath,
    body: Result<Json<ItemPatch>, JsonRejection>,
) -> ApiResult<ItemRecord> {
    let Path((list_id, item_id)) = path?;
    let list = resolve_list(&service, &list_id).await?;
    let current = service
        .item(&list, parse_id(EntityKind::Item, &item_id)?)
        .await?;
    let Json(patch) = body?;
    let item = service.update_item(&list, current.id, patch).await?;
    Ok(Json(ItemRecord::from(item)))
}

async fn delete_item(
    State(service): State<TodoService>,
    path: ItemPath,
) -> ApiResult<Message> {
    let Path((list_id, item_id)) = path?;
    let list = resolve_list(&service, &list_id).await?;
    service
        .delete_item(&list, parse_id(EntityKind::Item, &item_id)?)
        .await?;
    Ok(Json(Message::new(DELETED)))
}
