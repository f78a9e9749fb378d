//! Error taxonomy for service operations.
//!
//! # Design
//! Every operation returns `Result<_, TodoError>`; nothing is signalled by
//! panicking. `NotFound` keeps the id exactly as the caller supplied it so
//! the message can echo it. Constraint violations detected by the store are
//! folded into the same variants the validators produce.

use thiserror::Error;

use crate::repository::RepositoryError;
use crate::types::EntityKind;
use crate::validation::{Field, Rule, Violations};

#[derive(Debug, Error)]
pub enum TodoError {
    /// One or more fields failed validation. Nothing was written.
    #[error("{0}")]
    Validation(Violations),

    /// No record of `kind` with `id` exists (in the requested scope).
    #[error("Couldn't find {kind} with id='{id}'")]
    NotFound { kind: EntityKind, id: String },

    /// The store failed for a reason the caller cannot fix.
    #[error("storage failure: {0}")]
    Storage(#[source] RepositoryError),
}

impl TodoError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        TodoError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl From<Violations> for TodoError {
    fn from(violations: Violations) -> Self {
        TodoError::Validation(violations)
    }
}

impl From<RepositoryError> for TodoError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NameTaken(_) => {
                TodoError::Validation(Violations::single(Field::Name, Rule::Taken))
            }
            RepositoryError::ParentMissing(id) => TodoError::not_found(EntityKind::TodoList, id),
            RepositoryError::Missing { kind, id } => TodoError::not_found(kind, id),
            other @ RepositoryError::Backend(_) => TodoError::Storage(other),
        }
    }
}
