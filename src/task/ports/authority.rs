//! Task authority port: the remote source of truth for task data.

use super::{BearerToken, CredentialError};
use crate::task::domain::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task authority operations.
pub type TaskAuthorityResult<T> = Result<T, TaskAuthorityError>;

/// Remote task authority contract.
///
/// Every call carries the session's bearer token. Implementations report any
/// non-success outcome as a [`TaskAuthorityError`]; callers do not
/// distinguish between kinds of failure.
#[async_trait]
pub trait TaskAuthority: Send + Sync {
    /// Returns the full task snapshot for the token's owner.
    async fn list(&self, token: &BearerToken) -> TaskAuthorityResult<Vec<Task>>;

    /// Persists a new task in [`TaskStatus::Pending`] and returns it with its
    /// assigned identifier.
    async fn create(&self, token: &BearerToken, draft: &TaskDraft) -> TaskAuthorityResult<Task>;

    /// Applies a field patch and returns the updated task.
    async fn update(
        &self,
        token: &BearerToken,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> TaskAuthorityResult<Task>;

    /// Moves a task to `status` through the status endpoint and returns the
    /// updated task.
    async fn move_status(
        &self,
        token: &BearerToken,
        id: &TaskId,
        status: TaskStatus,
    ) -> TaskAuthorityResult<Task>;

    /// Marks an in-progress task as done through the dedicated endpoint and
    /// returns the updated task.
    async fn mark_done(&self, token: &BearerToken, id: &TaskId) -> TaskAuthorityResult<Task>;

    /// Deletes a task permanently.
    async fn delete(&self, token: &BearerToken, id: &TaskId) -> TaskAuthorityResult<()>;
}

/// Errors returned by task authority implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskAuthorityError {
    /// The authority has no task with the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// No valid credential was available or the authority refused it.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The authority answered with a non-success status.
    #[error("authority rejected the request with status {status}: {message}")]
    Rejected {
        /// Response status code.
        status: u16,
        /// Response message.
        message: String,
    },

    /// The authority answered successfully with data that contradicts the
    /// request.
    #[error("inconsistent authority response: {0}")]
    InconsistentResponse(String),

    /// Network or decoding failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskAuthorityError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Builds an inconsistent-response error.
    pub fn inconsistent(reason: impl Into<String>) -> Self {
        Self::InconsistentResponse(reason.into())
    }
}

impl From<CredentialError> for TaskAuthorityError {
    fn from(err: CredentialError) -> Self {
        Self::Unauthenticated(err.to_string())
    }
}
