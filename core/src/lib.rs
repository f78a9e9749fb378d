//! Domain core for the todo-list service.
//!
//! # Overview
//! Two entities, `TodoList` and `Item` (scoped to a list), with presence,
//! length and uniqueness rules. `TodoService` exposes the index/show/create/
//! update/delete operations that every surface shares; it knows nothing
//! about HTTP.
//!
//! # Design
//! - Validators are pure and aggregate every violation before returning.
//! - Storage sits behind the `TodoRepository` trait; the bundled
//!   `InMemoryRepository` enforces name uniqueness and cascading delete
//!   atomically under one lock.
//! - Outcomes are explicit `Result<_, TodoError>` values, mapped to
//!   responses once at the edge.
//! - The parent list of an item is resolved once and passed by value into
//!   every item operation.

pub mod error;
pub mod memory;
pub mod repository;
pub mod seed;
pub mod service;
pub mod types;
pub mod validation;

pub use error::TodoError;
pub use memory::InMemoryRepository;
pub use repository::{RepositoryError, TodoRepository};
pub use service::TodoService;
pub use types::{parse_id, EntityKind, Item, ItemFields, ItemPatch, ListFields, RecordId, TodoList};
pub use validation::{Field, ItemRules, Rule, Violation, Violations};
