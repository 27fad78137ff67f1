//! Task lifecycle status.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task, one per board column.
///
/// Statuses form a strictly linear chain:
/// `Pending -> InProgress -> Done -> Archived`. There are no backward moves
/// and no skipped links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task work is finished.
    Done,
    /// Task is archived and can no longer change.
    Archived,
}

impl TaskStatus {
    /// Every status, in board column order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Done, Self::Archived];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Archived => "archived",
        }
    }

    /// Returns the human-readable column label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Archived => "Archived",
        }
    }

    /// Returns the status that follows this one, or `None` when the status is
    /// terminal.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => Some(Self::Archived),
            Self::Archived => None,
        }
    }

    /// Returns whether no forward transition exists from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Returns whether `target` is the single legal successor of this status.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
