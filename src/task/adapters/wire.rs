//! JSON documents exchanged with the HTTP task authority.
//!
//! Every response body wraps its payload as `{"data": ...}`. Tasks carry
//! their identifier under `_id` and their status in upper snake case
//! (`IN_PROGRESS`). An HTTP authority adapter encodes requests and decodes
//! responses with the helpers below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::TaskAuthorityError,
};

/// Response wrapper used by every authority endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Wrapped payload.
    pub data: T,
}

/// Task as serialized by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    /// Authority-assigned identifier; absent on create requests.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
}

/// Body of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeDocument {
    /// Requested status.
    pub status: TaskStatus,
}

/// Errors raised while encoding or decoding authority documents.
#[derive(Debug, Error)]
pub enum WireError {
    /// The body is not valid JSON for the expected document.
    #[error("malformed task document: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted task document has no identifier.
    #[error("task document is missing its identifier")]
    MissingId,

    /// A task document carries an unusable identifier.
    #[error("invalid task document: {0}")]
    Invalid(#[from] TaskDomainError),
}

impl From<WireError> for TaskAuthorityError {
    fn from(err: WireError) -> Self {
        Self::transport(err)
    }
}

impl TryFrom<TaskDocument> for Task {
    type Error = WireError;

    fn try_from(document: TaskDocument) -> Result<Self, Self::Error> {
        let raw_id = document.id.ok_or(WireError::MissingId)?;
        let id = TaskId::new(raw_id)?;
        Ok(Self::new(
            id,
            document.title,
            document.description,
            document.status,
        ))
    }
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id().as_str().to_owned()),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
        }
    }
}

/// Decodes a single-task response body.
///
/// # Errors
///
/// Returns [`WireError`] when the body is malformed or the task lacks an
/// identifier.
pub fn decode_task(body: &str) -> Result<Task, WireError> {
    let envelope: Envelope<TaskDocument> = serde_json::from_str(body)?;
    Task::try_from(envelope.data)
}

/// Decodes a task list response body, preserving order.
///
/// # Errors
///
/// Returns [`WireError`] when the body is malformed or any task lacks an
/// identifier.
pub fn decode_task_list(body: &str) -> Result<Vec<Task>, WireError> {
    let envelope: Envelope<Vec<TaskDocument>> = serde_json::from_str(body)?;
    envelope.data.into_iter().map(Task::try_from).collect()
}

/// Encodes a create request. The status is always `PENDING`.
///
/// # Errors
///
/// Returns [`WireError::Json`] when serialization fails.
pub fn encode_draft(draft: &TaskDraft) -> Result<String, WireError> {
    let document = TaskDocument {
        id: None,
        title: draft.title.clone(),
        description: draft.description.clone(),
        status: TaskStatus::Pending,
    };
    Ok(serde_json::to_string(&document)?)
}

/// Encodes an edit request with only the patched fields.
///
/// # Errors
///
/// Returns [`WireError::Json`] when serialization fails.
pub fn encode_patch(patch: &TaskPatch) -> Result<String, WireError> {
    Ok(serde_json::to_string(patch)?)
}

/// Encodes a status change request.
///
/// # Errors
///
/// Returns [`WireError::Json`] when serialization fails.
pub fn encode_status_change(status: TaskStatus) -> Result<String, WireError> {
    Ok(serde_json::to_string(&StatusChangeDocument { status })?)
}
