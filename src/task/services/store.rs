//! Session-scoped task cache kept in step with the task authority.
//!
//! Every mutation follows the same contract: validate locally, call the
//! authority, and only then patch the cached collection with what the
//! authority returned. A failed call leaves the collection exactly as it
//! was. No cache lock is held across an `.await`, so readers never observe
//! an intermediate state.
//!
//! Mutations against the same task are not serialized. Callers that fire an
//! edit and a delete for one task concurrently may see the edit land on a
//! task that is already gone.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::TaskStoreConfig;
use crate::task::{
    domain::{
        StatusGroups, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, TaskStatus,
        group_by_status, next_status,
    },
    ports::{BearerToken, CredentialProvider, TaskAuthority, TaskAuthorityError},
};

/// Errors returned by task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Input was rejected before any remote call.
    #[error("invalid task input: {0}")]
    Validation(TaskDomainError),

    /// A lifecycle rule forbids the change; no remote call was made.
    #[error("operation forbidden: {0}")]
    Forbidden(TaskDomainError),

    /// The task is archived and has no further status; no remote call was
    /// made.
    #[error("task {0} is archived and cannot advance")]
    Terminal(TaskId),

    /// The task is not in the local collection; no remote call was made.
    #[error("task {0} is not in the local collection")]
    NotFound(TaskId),

    /// The authority call failed; the local collection is unchanged.
    #[error("task authority call failed: {0}")]
    RemoteFailure(#[from] TaskAuthorityError),

    /// The session has been closed.
    #[error("task session has been closed")]
    SessionClosed,
}

impl TaskStoreError {
    /// Returns whether the error is a lifecycle rule violation, including an
    /// attempt to advance a terminal task.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_) | Self::Terminal(_))
    }

    /// Returns whether the error came from the authority call.
    #[must_use]
    pub const fn is_remote_failure(&self) -> bool {
        matches!(self, Self::RemoteFailure(_))
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

#[derive(Debug, Default)]
struct TaskCache {
    tasks: Vec<Task>,
    loaded: bool,
    closed: bool,
}

impl TaskCache {
    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}

/// Authoritative in-memory cache of one session's tasks.
///
/// A store is created when the user signs in and closed when they sign out.
/// Share it by reference (or behind an [`Arc`]) with every consumer.
pub struct TaskStore<A, C>
where
    A: TaskAuthority,
    C: CredentialProvider,
{
    authority: Arc<A>,
    credentials: Arc<C>,
    config: TaskStoreConfig,
    cache: RwLock<TaskCache>,
}

impl<A, C> TaskStore<A, C>
where
    A: TaskAuthority,
    C: CredentialProvider,
{
    /// Creates an empty, open store with the default configuration.
    #[must_use]
    pub fn new(authority: Arc<A>, credentials: Arc<C>) -> Self {
        Self::with_config(authority, credentials, TaskStoreConfig::default())
    }

    /// Creates an empty, open store.
    #[must_use]
    pub fn with_config(authority: Arc<A>, credentials: Arc<C>, config: TaskStoreConfig) -> Self {
        Self {
            authority,
            credentials,
            config,
            cache: RwLock::new(TaskCache::default()),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskStoreConfig {
        &self.config
    }

    /// Fetches the full task list and replaces the local collection.
    ///
    /// On failure the collection becomes empty. Calling `load` again is the
    /// manual refetch; there is no automatic retry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::RemoteFailure`] when the fetch fails or the
    /// snapshot repeats an identifier, and [`TaskStoreError::SessionClosed`]
    /// after [`Self::close`].
    pub async fn load(&self) -> TaskStoreResult<Vec<Task>> {
        self.ensure_open()?;
        debug!("loading task snapshot");

        let fetched = match self.token().await {
            Ok(token) => self.authority.list(&token).await,
            Err(err) => Err(err),
        };
        let snapshot = fetched.and_then(ensure_unique_ids);

        let mut cache = self.cache.write();
        if cache.closed {
            warn!("discarding task snapshot that arrived after session close");
            return Err(TaskStoreError::SessionClosed);
        }
        match snapshot {
            Ok(tasks) => {
                cache.tasks.clone_from(&tasks);
                cache.loaded = true;
                info!(count = tasks.len(), "task snapshot loaded");
                Ok(tasks)
            }
            Err(err) => {
                cache.tasks.clear();
                cache.loaded = false;
                warn!(error = %err, "task snapshot failed to load");
                Err(TaskStoreError::RemoteFailure(err))
            }
        }
    }

    /// Creates a task from `draft` and appends it to the collection.
    ///
    /// The task starts in [`TaskStatus::Pending`]. Nothing is inserted until
    /// the authority has assigned an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] without contacting the
    /// authority when the title is blank or a field is too long, and
    /// [`TaskStoreError::RemoteFailure`] when the authority call fails.
    pub async fn create(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        self.ensure_open()?;
        let prepared = self
            .config
            .prepare_draft(draft)
            .map_err(TaskStoreError::Validation)?;
        debug!(title = %prepared.title, "creating task");

        let token = self.token().await.map_err(|err| remote_failure("create", err))?;
        let created = self
            .authority
            .create(&token, &prepared)
            .await
            .map_err(|err| remote_failure("create", err))?;

        self.commit(|cache| {
            if cache.position(created.id()).is_some() {
                return Err(remote_failure(
                    "create",
                    TaskAuthorityError::inconsistent(format!(
                        "created task reuses existing identifier {}",
                        created.id()
                    )),
                ));
            }
            cache.tasks.push(created.clone());
            info!(task_id = %created.id(), "task created");
            Ok(created)
        })
    }

    /// Edits the title and/or description of a cached task.
    ///
    /// The cached task is replaced with the authority's representation, not
    /// with the locally built patch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task is not cached,
    /// [`TaskStoreError::Forbidden`] when the task is archived or its status
    /// locks a patched field, [`TaskStoreError::Validation`] for an empty
    /// patch or invalid field values, and [`TaskStoreError::RemoteFailure`]
    /// when the authority call fails. Only the last involves a remote call.
    pub async fn edit(&self, id: &TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        self.ensure_open()?;
        let current = self.require(id)?;
        current
            .ensure_editable(&patch)
            .map_err(TaskStoreError::Forbidden)?;
        let prepared = self
            .config
            .prepare_patch(patch)
            .map_err(TaskStoreError::Validation)?;
        debug!(task_id = %id, status = %current.status(), "editing task");

        let token = self.token().await.map_err(|err| remote_failure("edit", err))?;
        let updated = self
            .authority
            .update(&token, id, &prepared)
            .await
            .and_then(|task| ensure_same_task(id, task))
            .map_err(|err| remote_failure("edit", err))?;

        self.commit(|cache| {
            replace_cached(cache, &updated);
            info!(task_id = %id, "task edited");
            Ok(updated)
        })
    }

    /// Moves a cached task to the next status of the chain.
    ///
    /// The `InProgress -> Done` link goes through the authority's mark-done
    /// endpoint; every other link goes through the status endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task is not cached,
    /// [`TaskStoreError::Terminal`] when it is archived, and
    /// [`TaskStoreError::RemoteFailure`] when the authority call fails or
    /// reports a status other than the requested one.
    pub async fn advance(&self, id: &TaskId) -> TaskStoreResult<Task> {
        self.ensure_open()?;
        let current = self.require(id)?;
        let target =
            next_status(current.status()).ok_or_else(|| TaskStoreError::Terminal(id.clone()))?;
        debug!(task_id = %id, from = %current.status(), to = %target, "advancing task");

        let token = self.token().await.map_err(|err| remote_failure("advance", err))?;
        let response = match target {
            TaskStatus::Done => self.authority.mark_done(&token, id).await,
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Archived => {
                self.authority.move_status(&token, id, target).await
            }
        };
        let updated = response
            .and_then(|task| ensure_same_task(id, task))
            .and_then(|task| ensure_status(target, task))
            .map_err(|err| remote_failure("advance", err))?;

        self.commit(|cache| {
            replace_cached(cache, &updated);
            info!(task_id = %id, status = %target, "task advanced");
            Ok(updated)
        })
    }

    /// Deletes a task permanently.
    ///
    /// The task is removed from the collection only after the authority
    /// confirms the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::RemoteFailure`] when the authority call
    /// fails; the task then stays cached.
    pub async fn delete(&self, id: &TaskId) -> TaskStoreResult<()> {
        self.ensure_open()?;
        debug!(task_id = %id, "deleting task");

        let token = self.token().await.map_err(|err| remote_failure("delete", err))?;
        self.authority
            .delete(&token, id)
            .await
            .map_err(|err| remote_failure("delete", err))?;

        self.commit(|cache| {
            cache.tasks.retain(|task| task.id() != id);
            info!(task_id = %id, "task deleted");
            Ok(())
        })
    }

    /// Ends the session: clears the collection and rejects further
    /// operations. Results of calls still in flight are discarded.
    pub fn close(&self) {
        let mut cache = self.cache.write();
        cache.closed = true;
        cache.loaded = false;
        cache.tasks.clear();
        info!("task session closed");
    }

    /// Returns whether the session is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.cache.read().closed
    }

    /// Returns whether the last [`Self::load`] succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cache.read().loaded
    }

    /// Returns a snapshot of the collection in cache order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.cache.read().tasks.clone()
    }

    /// Returns the cached task with `id`.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.cache
            .read()
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
    }

    /// Returns the number of cached tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().tasks.len()
    }

    /// Returns whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.read().tasks.is_empty()
    }

    /// Returns the collection grouped into board columns.
    #[must_use]
    pub fn grouped(&self) -> StatusGroups {
        group_by_status(&self.cache.read().tasks)
    }

    /// Returns whether the advance action is available for `id`.
    #[must_use]
    pub fn can_advance(&self, id: &TaskId) -> bool {
        self.get(id)
            .is_some_and(|task| next_status(task.status()).is_some())
    }

    fn ensure_open(&self) -> TaskStoreResult<()> {
        if self.cache.read().closed {
            return Err(TaskStoreError::SessionClosed);
        }
        Ok(())
    }

    fn require(&self, id: &TaskId) -> TaskStoreResult<Task> {
        self.get(id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))
    }

    async fn token(&self) -> Result<BearerToken, TaskAuthorityError> {
        Ok(self.credentials.bearer_token().await?)
    }

    /// Applies a confirmed authority result under the write lock, unless the
    /// session closed while the call was in flight.
    fn commit<T>(
        &self,
        apply: impl FnOnce(&mut TaskCache) -> TaskStoreResult<T>,
    ) -> TaskStoreResult<T> {
        let mut cache = self.cache.write();
        if cache.closed {
            warn!("discarding authority result that arrived after session close");
            return Err(TaskStoreError::SessionClosed);
        }
        apply(&mut *cache)
    }
}

fn remote_failure(operation: &'static str, err: TaskAuthorityError) -> TaskStoreError {
    warn!(operation, error = %err, "task authority call failed");
    TaskStoreError::RemoteFailure(err)
}

fn replace_cached(cache: &mut TaskCache, updated: &Task) {
    match cache.position(updated.id()) {
        Some(index) => {
            if let Some(slot) = cache.tasks.get_mut(index) {
                *slot = updated.clone();
            }
        }
        None => warn!(
            task_id = %updated.id(),
            "authority updated a task that is no longer cached"
        ),
    }
}

fn ensure_unique_ids(tasks: Vec<Task>) -> Result<Vec<Task>, TaskAuthorityError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id()) {
            return Err(TaskAuthorityError::inconsistent(format!(
                "snapshot repeats task identifier {}",
                task.id()
            )));
        }
    }
    Ok(tasks)
}

fn ensure_same_task(id: &TaskId, task: Task) -> Result<Task, TaskAuthorityError> {
    if task.id() != id {
        return Err(TaskAuthorityError::inconsistent(format!(
            "requested task {id}, authority returned {}",
            task.id()
        )));
    }
    Ok(task)
}

fn ensure_status(expected: TaskStatus, task: Task) -> Result<Task, TaskAuthorityError> {
    if task.status() != expected {
        return Err(TaskAuthorityError::inconsistent(format!(
            "task {} expected in status {expected}, authority returned {}",
            task.id(),
            task.status()
        )));
    }
    Ok(task)
}
