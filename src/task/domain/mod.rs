//! Domain model for the task lifecycle.
//!
//! The domain holds the pure rules of the task board: which status follows
//! which, which fields may still change in a given status, and how a task
//! collection is partitioned into display columns. Nothing here performs I/O
//! or keeps state between calls.

mod error;
mod ids;
mod lifecycle;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use lifecycle::{StatusGroups, TaskField, group_by_status, is_editable, next_status};
pub use status::TaskStatus;
pub use task::{Task, TaskDraft, TaskPatch};
