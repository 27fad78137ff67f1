//! In-memory task authority emulating the remote task service.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::{BearerToken, TaskAuthority, TaskAuthorityError, TaskAuthorityResult},
};

/// Status code reported for injected failures.
const INJECTED_FAILURE_STATUS: u16 = 503;

/// Status code reported when a request breaks a lifecycle rule.
const RULE_VIOLATION_STATUS: u16 = 422;

/// Authority operations, used for call accounting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorityOperation {
    /// Full snapshot fetch.
    List,
    /// Task creation.
    Create,
    /// Generic field update.
    Update,
    /// Status move endpoint.
    MoveStatus,
    /// Mark-as-done endpoint.
    MarkDone,
    /// Task deletion.
    Delete,
}

/// Thread-safe in-memory task authority.
///
/// Enforces the same lifecycle rules as the remote service, assigns UUID
/// identifiers, counts calls per operation, and can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskAuthority {
    state: Arc<RwLock<AuthorityState>>,
}

#[derive(Debug, Default)]
struct AuthorityState {
    tasks: Vec<Task>,
    calls: HashMap<AuthorityOperation, usize>,
    fail_next: HashSet<AuthorityOperation>,
    fail_all: bool,
    expected_token: Option<BearerToken>,
}

impl AuthorityState {
    /// Records a call and decides whether it may proceed.
    fn admit(
        &mut self,
        operation: AuthorityOperation,
        token: &BearerToken,
    ) -> TaskAuthorityResult<()> {
        *self.calls.entry(operation).or_default() += 1;

        if self
            .expected_token
            .as_ref()
            .is_some_and(|expected| expected != token)
        {
            return Err(TaskAuthorityError::Unauthenticated(
                "bearer token rejected".to_owned(),
            ));
        }

        if self.fail_all || self.fail_next.remove(&operation) {
            return Err(TaskAuthorityError::Rejected {
                status: INJECTED_FAILURE_STATUS,
                message: format!("injected failure for {operation:?}"),
            });
        }
        Ok(())
    }

    fn task_mut(&mut self, id: &TaskId) -> TaskAuthorityResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| TaskAuthorityError::NotFound(id.clone()))
    }
}

fn rule_violation(err: &TaskDomainError) -> TaskAuthorityError {
    TaskAuthorityError::Rejected {
        status: RULE_VIOLATION_STATUS,
        message: err.to_string(),
    }
}

impl InMemoryTaskAuthority {
    /// Creates an empty authority.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an authority seeded with existing tasks.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let authority = Self::new();
        authority.state.write().tasks = tasks.into_iter().collect();
        authority
    }

    /// Rejects every call whose token differs from `token`.
    #[must_use]
    pub fn with_expected_token(self, token: BearerToken) -> Self {
        self.state.write().expected_token = Some(token);
        self
    }

    /// Makes the next call of `operation` fail.
    pub fn fail_next(&self, operation: AuthorityOperation) {
        self.state.write().fail_next.insert(operation);
    }

    /// Makes every call fail until switched off.
    pub fn fail_all(&self, enabled: bool) {
        self.state.write().fail_all = enabled;
    }

    /// Returns how many times `operation` has been called.
    #[must_use]
    pub fn call_count(&self, operation: AuthorityOperation) -> usize {
        self.state
            .read()
            .calls
            .get(&operation)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the total number of calls across all operations.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.state.read().calls.values().sum()
    }

    /// Returns a copy of the stored tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state.read().tasks.clone()
    }

    fn transition(
        &self,
        operation: AuthorityOperation,
        token: &BearerToken,
        id: &TaskId,
        status: TaskStatus,
    ) -> TaskAuthorityResult<Task> {
        let mut state = self.state.write();
        state.admit(operation, token)?;
        let task = state.task_mut(id)?;
        task.transition_to(status)
            .map_err(|err| rule_violation(&err))?;
        Ok(task.clone())
    }
}

#[async_trait]
impl TaskAuthority for InMemoryTaskAuthority {
    async fn list(&self, token: &BearerToken) -> TaskAuthorityResult<Vec<Task>> {
        let mut state = self.state.write();
        state.admit(AuthorityOperation::List, token)?;
        Ok(state.tasks.clone())
    }

    async fn create(&self, token: &BearerToken, draft: &TaskDraft) -> TaskAuthorityResult<Task> {
        let mut state = self.state.write();
        state.admit(AuthorityOperation::Create, token)?;
        draft.validate().map_err(|err| rule_violation(&err))?;

        let id = TaskId::new(Uuid::new_v4().to_string())
            .map_err(|err| TaskAuthorityError::transport(std::io::Error::other(err.to_string())))?;
        let task = Task::from_draft(id, draft);
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> TaskAuthorityResult<Task> {
        let mut state = self.state.write();
        state.admit(AuthorityOperation::Update, token)?;
        let task = state.task_mut(id)?;
        task.apply_patch(patch).map_err(|err| rule_violation(&err))?;
        Ok(task.clone())
    }

    async fn move_status(
        &self,
        token: &BearerToken,
        id: &TaskId,
        status: TaskStatus,
    ) -> TaskAuthorityResult<Task> {
        self.transition(AuthorityOperation::MoveStatus, token, id, status)
    }

    async fn mark_done(&self, token: &BearerToken, id: &TaskId) -> TaskAuthorityResult<Task> {
        self.transition(AuthorityOperation::MarkDone, token, id, TaskStatus::Done)
    }

    async fn delete(&self, token: &BearerToken, id: &TaskId) -> TaskAuthorityResult<()> {
        let mut state = self.state.write();
        state.admit(AuthorityOperation::Delete, token)?;
        state.tasks.retain(|task| task.id() != id);
        Ok(())
    }
}
