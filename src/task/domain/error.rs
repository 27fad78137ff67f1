//! Error types for task domain validation and parsing.

use super::{TaskField, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while validating task input or applying lifecycle rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// An edit carried no field to change.
    #[error("task patch must change at least one field")]
    EmptyPatch,

    /// A task identifier was empty.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The task title exceeds the configured limit.
    #[error("task title has {actual} characters, limit is {max}")]
    TitleTooLong {
        /// Configured maximum.
        max: usize,
        /// Submitted length.
        actual: usize,
    },

    /// The task description exceeds the configured limit.
    #[error("task description has {actual} characters, limit is {max}")]
    DescriptionTooLong {
        /// Configured maximum.
        max: usize,
        /// Submitted length.
        actual: usize,
    },

    /// The field cannot change while the task is in its current status.
    #[error("field {field} of task {task_id} is locked in status {status}")]
    FieldLocked {
        /// Task whose field was targeted.
        task_id: TaskId,
        /// Status that locks the field.
        status: TaskStatus,
        /// Locked field.
        field: TaskField,
    },

    /// The task's status locks every field.
    #[error("task {task_id} is read-only in status {status}")]
    ReadOnly {
        /// Task that was targeted.
        task_id: TaskId,
        /// Status that locks the task.
        status: TaskStatus,
    },

    /// The requested status is not the next link of the lifecycle chain.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The task has no further status to advance to.
    #[error("task {task_id} is in a terminal status")]
    TerminalStatus {
        /// Task that cannot advance.
        task_id: TaskId,
    },
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
