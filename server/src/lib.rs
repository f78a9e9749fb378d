//! HTTP front end for the todo-list service.
//!
//! # Overview
//! Serves the same `TodoService` twice: a JSON API under `/api` and
//! server-rendered HTML pages everywhere else.
//!
//! # Design
//! - Handlers are thin adapters: parse ids, call one service operation,
//!   serialize. Business rules live in `todo-core`.
//! - `error` maps `TodoError` to responses once per surface.
//! - `format` rejects requests for a representation a surface does not
//!   serve before routing reaches a handler.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod html;
pub mod telemetry;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use todo_core::{parse_id, EntityKind, ItemRules, TodoError, TodoList, TodoService};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::ServerConfig;

/// Router over a fresh in-memory store with default item rules.
pub fn app() -> Router {
    router(TodoService::in_memory(ItemRules::default()))
}

pub fn router(service: TodoService) -> Router {
    Router::new()
        .nest("/api", api::routes())
        .route("/api/", any(api::route_not_found))
        .merge(html::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve until the process receives Ctrl-C.
pub async fn run(listener: TcpListener, service: TodoService) -> Result<(), std::io::Error> {
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "could not listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Resolve the parent list named by a path segment.
pub(crate) async fn resolve_list(service: &TodoService, raw: &str) -> Result<TodoList, TodoError> {
    service
        .resolve_list(parse_id(EntityKind::TodoList, raw)?)
        .await
}
