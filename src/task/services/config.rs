//! Input limits applied by the task store before contacting the authority.

use serde::{Deserialize, Serialize};

use crate::task::domain::{TaskDomainError, TaskDraft, TaskPatch};

/// Configuration for task store input handling.
///
/// Every field has a default, so hosts can embed this struct in their own
/// configuration files and override only what they need.
///
/// # Examples
///
/// ```
/// use taskboard::task::services::TaskStoreConfig;
///
/// let config = TaskStoreConfig::default();
/// assert!(config.trim_title);
///
/// let lenient = TaskStoreConfig::lenient();
/// assert!(!lenient.trim_title);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStoreConfig {
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum description length in characters.
    pub max_description_chars: usize,
    /// Whether leading and trailing whitespace is stripped from titles.
    pub trim_title: bool,
}

impl Default for TaskStoreConfig {
    fn default() -> Self {
        Self {
            max_title_chars: 200,
            max_description_chars: 10_000,
            trim_title: true,
        }
    }
}

impl TaskStoreConfig {
    /// Creates a configuration without length limits that sends titles as
    /// typed.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            max_title_chars: usize::MAX,
            max_description_chars: usize::MAX,
            trim_title: false,
        }
    }

    /// Creates a configuration with tight limits for small displays.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_title_chars: 80,
            max_description_chars: 2_000,
            trim_title: true,
        }
    }

    /// Normalizes and validates a draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title, or a length
    /// error when a field exceeds its limit.
    pub fn prepare_draft(&self, mut draft: TaskDraft) -> Result<TaskDraft, TaskDomainError> {
        draft.validate()?;
        draft.title = self.normalize_title(draft.title);
        self.check_title(&draft.title)?;
        self.check_description(&draft.description)?;
        Ok(draft)
    }

    /// Normalizes and validates a patch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyPatch`] for a patch with no fields,
    /// [`TaskDomainError::EmptyTitle`] for a blank title, or a length error
    /// when a field exceeds its limit.
    pub fn prepare_patch(&self, mut patch: TaskPatch) -> Result<TaskPatch, TaskDomainError> {
        patch.validate()?;
        if let Some(title) = patch.title.take() {
            let normalized = self.normalize_title(title);
            self.check_title(&normalized)?;
            patch.title = Some(normalized);
        }
        if let Some(description) = &patch.description {
            self.check_description(description)?;
        }
        Ok(patch)
    }

    fn normalize_title(&self, title: String) -> String {
        if self.trim_title && title.trim().len() != title.len() {
            return title.trim().to_owned();
        }
        title
    }

    fn check_title(&self, title: &str) -> Result<(), TaskDomainError> {
        let actual = title.chars().count();
        if actual > self.max_title_chars {
            return Err(TaskDomainError::TitleTooLong {
                max: self.max_title_chars,
                actual,
            });
        }
        Ok(())
    }

    fn check_description(&self, description: &str) -> Result<(), TaskDomainError> {
        let actual = description.chars().count();
        if actual > self.max_description_chars {
            return Err(TaskDomainError::DescriptionTooLong {
                max: self.max_description_chars,
                actual,
            });
        }
        Ok(())
    }
}
