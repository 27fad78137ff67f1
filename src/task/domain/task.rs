//! Task entity and the input shapes used to create and edit it.

use super::{TaskDomainError, TaskField, TaskId, TaskStatus, is_editable};
use serde::{Deserialize, Serialize};

/// A persisted task as last reported by the task authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
}

impl Task {
    /// Reconstructs a task from its persisted representation.
    #[must_use]
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
        }
    }

    /// Creates the first persisted form of a draft. The status is always
    /// [`TaskStatus::Pending`].
    #[must_use]
    pub fn from_draft(id: TaskId, draft: &TaskDraft) -> Self {
        Self::new(
            id,
            draft.title.clone(),
            draft.description.clone(),
            TaskStatus::Pending,
        )
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Checks that every field named in `patch` is editable in the current
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReadOnly`] when the status locks every
    /// field, whatever the patch holds, and [`TaskDomainError::FieldLocked`]
    /// for the first locked field otherwise.
    pub fn ensure_editable(&self, patch: &TaskPatch) -> Result<(), TaskDomainError> {
        if TaskField::ALL
            .iter()
            .all(|field| !is_editable(self.status, *field))
        {
            return Err(TaskDomainError::ReadOnly {
                task_id: self.id.clone(),
                status: self.status,
            });
        }
        match patch
            .fields()
            .find(|field| !is_editable(self.status, *field))
        {
            Some(field) => Err(TaskDomainError::FieldLocked {
                task_id: self.id.clone(),
                status: self.status,
                field,
            }),
            None => Ok(()),
        }
    }

    /// Applies `patch` in place.
    ///
    /// The task is left untouched when any check fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ReadOnly`] or
    /// [`TaskDomainError::FieldLocked`] when the status forbids the change,
    /// then [`TaskDomainError::EmptyPatch`] for a patch with no fields or
    /// [`TaskDomainError::EmptyTitle`] for a blank replacement title.
    pub fn apply_patch(&mut self, patch: &TaskPatch) -> Result<(), TaskDomainError> {
        self.ensure_editable(patch)?;
        patch.validate()?;
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        Ok(())
    }

    /// Moves the task to the next status of the chain and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TerminalStatus`] when the task is archived.
    pub fn advance(&mut self) -> Result<TaskStatus, TaskDomainError> {
        let next = self
            .status
            .next()
            .ok_or_else(|| TaskDomainError::TerminalStatus {
                task_id: self.id.clone(),
            })?;
        self.status = next;
        Ok(next)
    }

    /// Moves the task to `target`, which must be the next status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TerminalStatus`] when the task is archived,
    /// or [`TaskDomainError::InvalidTransition`] when `target` is not the
    /// next link of the chain.
    pub fn transition_to(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::TerminalStatus {
                task_id: self.id.clone(),
            });
        }
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id.clone(),
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }
}

/// Input for creating a task. Drafts have no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title. Must not be blank.
    pub title: String,
    /// Task description, possibly empty.
    #[serde(default)]
    pub description: String,
}

impl TaskDraft {
    /// Creates a draft with an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks that the draft has a non-blank title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(())
    }
}

/// Partial update of a task's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Replacement title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Iterates over the fields this patch touches.
    pub fn fields(&self) -> impl Iterator<Item = TaskField> + '_ {
        let title = self.title.as_ref().map(|_| TaskField::Title);
        let description = self.description.as_ref().map(|_| TaskField::Description);
        title.into_iter().chain(description)
    }

    /// Checks that the patch changes something and that a replacement title,
    /// if present, is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyPatch`] or
    /// [`TaskDomainError::EmptyTitle`].
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.is_empty() {
            return Err(TaskDomainError::EmptyPatch);
        }
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(())
    }
}
