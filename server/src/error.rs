//! Mapping of service outcomes to HTTP responses.
//!
//! # Design
//! Both surfaces convert `TodoError` through `From`, so handlers just use
//! `?`. The JSON surface always answers with `{"message": ...}`. The HTML
//! surface handles validation failures itself (it re-renders the form) and
//! only routes not-found and internal failures through `PageError`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use todo_core::TodoError;
use tracing::error;

use crate::html::views;

pub const UNSUPPORTED_FORMAT: &str = "Not supported format";

/// Body of every JSON error, and of the delete acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unsupported_format() -> Self {
        Self::new(StatusCode::NOT_FOUND, UNSUPPORTED_FORMAT)
    }

    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(violations) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, violations.to_sentence())
            }
            not_found @ TodoError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, not_found.to_string())
            }
            TodoError::Storage(source) => {
                error!(error = %source, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Message::new(self.message))).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    NotFound,
    Internal,
}

impl From<TodoError> for PageError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound { .. } => PageError::NotFound,
            TodoError::Validation(violations) => {
                error!(%violations, "validation failure reached the page error mapper");
                PageError::Internal
            }
            TodoError::Storage(source) => {
                error!(error = %source, "storage failure");
                PageError::Internal
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::not_found().into_string())).into_response()
            }
            PageError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::server_error().into_string()),
            )
                .into_response(),
        }
    }
}
