//! Server-rendered HTML surface.
//!
//! Successful writes redirect (303) with a one-shot notice; validation
//! failures re-render the form with status 422, the entered values and an
//! alert. Browsers can only POST forms, so updates and deletes are also
//! reachable via `POST /…/{id}` and `POST /…/{id}/delete`.

pub mod flash;
pub mod views;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use todo_core::{parse_id, EntityKind, ItemFields, ItemPatch, ListFields, TodoError, TodoService};

use crate::error::PageError;
use crate::format;
use crate::resolve_list;

use flash::{redirect_with_notice, render, Flash};
use views::{FormState, FormTarget};

type PageResult = Result<Response, PageError>;
type FormInput<T> = Result<Form<T>, FormRejection>;

pub fn routes() -> Router<TodoService> {
    Router::new()
        .route("/", get(root))
        .route("/todolists", get(lists_index).post(create_list))
        .route("/todolists/new", get(new_list))
        .route(
            "/todolists/{list_id}",
            get(show_list)
                .post(update_list)
                .put(update_list)
                .patch(update_list)
                .delete(delete_list),
        )
        .route("/todolists/{list_id}/edit", get(edit_list))
        .route("/todolists/{list_id}/delete", post(delete_list))
        .route(
            "/todolists/{list_id}/items",
            get(items_index).post(create_item),
        )
        .route("/todolists/{list_id}/items/new", get(new_item))
        .route(
            "/todolists/{list_id}/items/{item_id}",
            get(show_item)
                .post(update_item)
                .put(update_item)
                .patch(update_item)
                .delete(delete_item),
        )
        .route("/todolists/{list_id}/items/{item_id}/edit", get(edit_item))
        .route(
            "/todolists/{list_id}/items/{item_id}/delete",
            post(delete_item),
        )
        .fallback(page_not_found)
        .layer(middleware::from_fn(format::html_only))
}

async fn root() -> Redirect {
    Redirect::to("/todolists")
}

async fn page_not_found() -> PageError {
    PageError::NotFound
}

fn unprocessable(page: maud::Markup) -> Response {
    render(&Flash::default(), StatusCode::UNPROCESSABLE_ENTITY, page)
}

// --- todo lists ---

async fn lists_index(State(service): State<TodoService>, flash: Flash) -> PageResult {
    let lists = service.lists().await?;
    Ok(render(
        &flash,
        StatusCode::OK,
        views::lists_index(&lists, flash.notice()),
    ))
}

async fn new_list(flash: Flash) -> Response {
    let form = FormState::blank(FormTarget::New);
    render(
        &flash,
        StatusCode::OK,
        views::list_form(&ListFields::default(), &form, flash.notice()),
    )
}

async fn create_list(
    State(service): State<TodoService>,
    Form(fields): Form<ListFields>,
) -> PageResult {
    match service.create_list(fields.clone()).await {
        Ok(_) => Ok(redirect_with_notice("/todolists", "List successfully created!")),
        Err(TodoError::Validation(errors)) => {
            let form = FormState::rejected(FormTarget::New, &errors, "Error creating list");
            Ok(unprocessable(views::list_form(&fields, &form, None)))
        }
        Err(err) => Err(err.into()),
    }
}

async fn show_list(
    State(service): State<TodoService>,
    Path(list_id): Path<String>,
    flash: Flash,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    Ok(render(
        &flash,
        StatusCode::OK,
        views::list_show(&list, flash.notice()),
    ))
}

async fn edit_list(
    State(service): State<TodoService>,
    Path(list_id): Path<String>,
    flash: Flash,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    let form = FormState::blank(FormTarget::Edit(list.id));
    let fields = ListFields::new(list.name);
    Ok(render(
        &flash,
        StatusCode::OK,
        views::list_form(&fields, &form, flash.notice()),
    ))
}

async fn update_list(
    State(service): State<TodoService>,
    Path(list_id): Path<String>,
    form: FormInput<ListFields>,
) -> PageResult {
    let id = resolve_list(&service, &list_id).await?.id;
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => return Ok(rejection.into_response()),
    };
    match service.update_list(id, fields.clone()).await {
        Ok(list) => Ok(redirect_with_notice(
            &views::list_path(list.id),
            "List successfully updated!",
        )),
        Err(TodoError::Validation(errors)) => {
            let form = FormState::rejected(FormTarget::Edit(id), &errors, "Error updating list");
            Ok(unprocessable(views::list_form(&fields, &form, None)))
        }
        Err(err) => Err(err.into()),
    }
}

async fn delete_list(
    State(service): State<TodoService>,
    Path(list_id): Path<String>,
) -> PageResult {
    let id = parse_id(EntityKind::TodoList, &list_id)?;
    service.delete_list(id).await?;
    Ok(redirect_with_notice("/todolists", "List successfully deleted!"))
}

// --- items ---

async fn items_index(
    State(service): State<TodoService>,
    Path(list_id): Path<String>,
    flash: Flash,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    let items = service.items(&list).await?;
    Ok(render(
        &flash,
        StatusCode::OK,
        views::items_index(&list, &items, flash.notice()),
    ))
}

async fn new_item(
    State(service): State<TodoService>,
    Path(list_id): Path<String>,
    flash: Flash,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    let form = FormState::blank(FormTarget::New);
    Ok(render(
        &flash,
        StatusCode::OK,
        views::item_form(&list, &ItemFields::default(), &form, flash.notice()),
    ))
}

async fn create_item(
    State(service): State<TodoService>,
    Path(list_id): Path<String>,
    form: FormInput<ItemFields>,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => return Ok(rejection.into_response()),
    };
    match service.create_item(&list, fields.clone()).await {
        Ok(_) => Ok(redirect_with_notice(
            &views::items_path(list.id),
            "Item successfully created!",
        )),
        Err(TodoError::Validation(errors)) => {
            let form = FormState::rejected(FormTarget::New, &errors, "Error creating item");
            Ok(unprocessable(views::item_form(&list, &fields, &form, None)))
        }
        Err(err) => Err(err.into()),
    }
}

async fn show_item(
    State(service): State<TodoService>,
    Path((list_id, item_id)): Path<(String, String)>,
    flash: Flash,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    let item = service
        .item(&list, parse_id(EntityKind::Item, &item_id)?)
        .await?;
    Ok(render(
        &flash,
        StatusCode::OK,
        views::item_show(&list, &item, flash.notice()),
    ))
}

async fn edit_item(
    State(service): State<TodoService>,
    Path((list_id, item_id)): Path<(String, String)>,
    flash: Flash,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    let item = service
        .item(&list, parse_id(EntityKind::Item, &item_id)?)
        .await?;
    let form = FormState::blank(FormTarget::Edit(item.id));
    let fields = ItemFields::new(item.name, item.description);
    Ok(render(
        &flash,
        StatusCode::OK,
        views::item_form(&list, &fields, &form, flash.notice()),
    ))
}

async fn update_item(
    State(service): State<TodoService>,
    Path((list_id, item_id)): Path<(String, String)>,
    form: FormInput<ItemPatch>,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    let current = service
        .item(&list, parse_id(EntityKind::Item, &item_id)?)
        .await?;
    let patch = match form {
        Ok(Form(patch)) => patch,
        Err(rejection) => return Ok(rejection.into_response()),
    };
    let entered = patch.clone().merge(&current);
    match service.update_item(&list, current.id, patch).await {
        Ok(item) => Ok(redirect_with_notice(
            &views::item_path(list.id, item.id),
            "Item successfully updated!",
        )),
        Err(TodoError::Validation(errors)) => {
            let form =
                FormState::rejected(FormTarget::Edit(current.id), &errors, "Error updating item");
            Ok(unprocessable(views::item_form(&list, &entered, &form, None)))
        }
        Err(err) => Err(err.into()),
    }
}

async fn delete_item(
    State(service): State<TodoService>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> PageResult {
    let list = resolve_list(&service, &list_id).await?;
    service
        .delete_item(&list, parse_id(EntityKind::Item, &item_id)?)
        .await?;
    Ok(redirect_with_notice(
        &views::items_path(list.id),
        "Item successfully deleted!",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprocessable_sets_status() {
        let response = unprocessable(maud::html! { p { "form" } });
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn root_redirects_to_index() {
        let response = root().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/todolists");
    }
}
