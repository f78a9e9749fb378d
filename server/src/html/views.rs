//! Page templates.
//!
//! Built with `maud`, so every interpolated value is HTML-escaped.

use maud::{html, Markup, DOCTYPE};
use todo_core::{Field, Item, ItemFields, ListFields, TodoList, Violations};

/// Where a form submits: a fresh record or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    New,
    Edit(u64),
}

/// State of a form being (re)displayed.
pub struct FormState<'a> {
    pub target: FormTarget,
    pub errors: Option<&'a Violations>,
    pub alert: Option<&'a str>,
}

impl<'a> FormState<'a> {
    pub fn blank(target: FormTarget) -> Self {
        Self {
            target,
            errors: None,
            alert: None,
        }
    }

    pub fn rejected(target: FormTarget, errors: &'a Violations, alert: &'a str) -> Self {
        Self {
            target,
            errors: Some(errors),
            alert: Some(alert),
        }
    }

    fn field_errors(&self, field: Field) -> Vec<String> {
        self.errors
            .map(|errors| errors.messages_for(field))
            .unwrap_or_default()
    }
}

pub fn list_path(id: u64) -> String {
    format!("/todolists/{id}")
}

pub fn items_path(list_id: u64) -> String {
    format!("/todolists/{list_id}/items")
}

pub fn item_path(list_id: u64, id: u64) -> String {
    format!("/todolists/{list_id}/items/{id}")
}

fn layout(title: &str, notice: Option<&str>, alert: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " | Todo Lists" }
            }
            body {
                nav { a href="/todolists" { "All lists" } }
                @if let Some(notice) = notice {
                    p.notice role="status" { (notice) }
                }
                @if let Some(alert) = alert {
                    p.alert role="alert" { (alert) }
                }
                main { (content) }
            }
        }
    }
}

fn errors_for(form: &FormState<'_>, field: Field) -> Markup {
    let messages = form.field_errors(field);
    html! {
        @if !messages.is_empty() {
            ul.errors {
                @for message in &messages { li { (message) } }
            }
        }
    }
}

fn delete_button(action: &str) -> Markup {
    html! {
        form method="post" action=(format!("{action}/delete")) {
            button type="submit" { "Delete" }
        }
    }
}

// --- todo lists ---

pub fn lists_index(lists: &[TodoList], notice: Option<&str>) -> Markup {
    layout(
        "Todo lists",
        notice,
        None,
        html! {
            h1 { "Todo lists" }
            @if lists.is_empty() {
                p { "No lists yet." }
            } @else {
                ul {
                    @for list in lists {
                        li { a href=(list_path(list.id)) { (list.name) } }
                    }
                }
            }
            a href="/todolists/new" { "New list" }
        },
    )
}

pub fn list_show(list: &TodoList, notice: Option<&str>) -> Markup {
    let path = list_path(list.id);
    layout(
        &list.name,
        notice,
        None,
        html! {
            h1 { (list.name) }
            p { a href=(items_path(list.id)) { "Items" } }
            p { a href=(format!("{path}/edit")) { "Edit" } }
            (delete_button(&path))
        },
    )
}

pub fn list_form(fields: &ListFields, form: &FormState<'_>, notice: Option<&str>) -> Markup {
    let (title, action, submit) = match form.target {
        FormTarget::New => ("New list", "/todolists".to_string(), "Create list"),
        FormTarget::Edit(id) => ("Edit list", list_path(id), "Update list"),
    };
    layout(
        title,
        notice,
        form.alert,
        html! {
            h1 { (title) }
            form method="post" action=(action) {
                label for="name" { "Name" }
                input id="name" type="text" name="name" value=(fields.name);
                (errors_for(form, Field::Name))
                button type="submit" { (submit) }
            }
        },
    )
}

// --- items ---

pub fn items_index(list: &TodoList, items: &[Item], notice: Option<&str>) -> Markup {
    layout(
        &list.name,
        notice,
        None,
        html! {
            h1 { (list.name) }
            @if items.is_empty() {
                p { "No items yet." }
            } @else {
                ul {
                    @for item in items {
                        li { a href=(item_path(list.id, item.id)) { (item.name) } }
                    }
                }
            }
            a href=(format!("{}/new", items_path(list.id))) { "New item" }
            " "
            a href=(list_path(list.id)) { "Back to list" }
        },
    )
}

pub fn item_show(list: &TodoList, item: &Item, notice: Option<&str>) -> Markup {
    let path = item_path(list.id, item.id);
    layout(
        &item.name,
        notice,
        None,
        html! {
            h1 { (item.name) }
            p { (item.description) }
            p { a href=(format!("{path}/edit")) { "Edit" } }
            (delete_button(&path))
            a href=(items_path(list.id)) { "Back to " (list.name) }
        },
    )
}

pub fn item_form(
    list: &TodoList,
    fields: &ItemFields,
    form: &FormState<'_>,
    notice: Option<&str>,
) -> Markup {
    let (title, action, submit) = match form.target {
        FormTarget::New => ("New item", items_path(list.id), "Create item"),
        FormTarget::Edit(id) => ("Edit item", item_path(list.id, id), "Update item"),
    };
    layout(
        title,
        notice,
        form.alert,
        html! {
            h1 { (title) " in " (list.name) }
            form method="post" action=(action) {
                label for="name" { "Name" }
                input id="name" type="text" name="name" value=(fields.name);
                (errors_for(form, Field::Name))
                label for="description" { "Description" }
                textarea id="description" name="description" { (fields.description) }
                (errors_for(form, Field::Description))
                button type="submit" { (submit) }
            }
        },
    )
}

// --- errors ---

pub fn not_found() -> Markup {
    layout(
        "Not found",
        None,
        None,
        html! {
            h1 { "The page you were looking for doesn't exist." }
            p { "You may have mistyped the address or the page may have moved." }
        },
    )
}

pub fn server_error() -> Markup {
    layout(
        "Error",
        None,
        None,
        html! {
            h1 { "We're sorry, but something went wrong." }
        },
    )
}
