//! Lifecycle rules: forward transitions, field editability, and column
//! grouping.

use super::{Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task fields a user may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task title.
    Title,
    /// Task description.
    Description,
}

impl TaskField {
    /// Every editable field, in form order.
    pub const ALL: [Self; 2] = [Self::Title, Self::Description];

    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the status that follows `current`.
///
/// `None` means the advance action is unavailable, not that something went
/// wrong.
#[must_use]
pub const fn next_status(current: TaskStatus) -> Option<TaskStatus> {
    current.next()
}

/// Returns whether `field` may be edited while a task is in `status`.
#[must_use]
pub const fn is_editable(status: TaskStatus, field: TaskField) -> bool {
    match (status, field) {
        (TaskStatus::Pending | TaskStatus::InProgress, _) | (TaskStatus::Done, TaskField::Title) => {
            true
        }
        (TaskStatus::Done, TaskField::Description) | (TaskStatus::Archived, _) => false,
    }
}

/// Tasks partitioned into the four board columns.
///
/// Relative order within each column matches the order of the input slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusGroups {
    pending: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
    archived: Vec<Task>,
}

impl StatusGroups {
    /// Returns the tasks in the column for `status`.
    #[must_use]
    pub fn get(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Pending => &self.pending,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
            TaskStatus::Archived => &self.archived,
        }
    }

    /// Iterates over every column in board order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Returns the total number of grouped tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.done.len() + self.archived.len()
    }

    /// Returns whether every column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
            TaskStatus::Archived => &mut self.archived,
        }
    }
}

/// Partitions `tasks` into board columns without modifying the input.
#[must_use]
pub fn group_by_status(tasks: &[Task]) -> StatusGroups {
    tasks.iter().fold(StatusGroups::default(), |mut groups, task| {
        groups.bucket_mut(task.status()).push(task.clone());
        groups
    })
}
