//! Shared world state for task store BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryTaskAuthority, StaticCredentialProvider},
    domain::TaskId,
    services::{TaskStore, TaskStoreError},
};

/// Store type used by the BDD world.
pub type TestTaskStore = TaskStore<InMemoryTaskAuthority, StaticCredentialProvider>;

/// Scenario world for task store behaviour tests.
pub struct TaskStoreWorld {
    pub authority: InMemoryTaskAuthority,
    pub store: Option<TestTaskStore>,
    pub current_task: Option<TaskId>,
    pub last_result: Option<Result<(), TaskStoreError>>,
}

impl TaskStoreWorld {
    /// Creates a world backed by an empty authority.
    #[must_use]
    pub fn new() -> Self {
        Self {
            authority: InMemoryTaskAuthority::new(),
            store: None,
            current_task: None,
            last_result: None,
        }
    }

    /// Returns the loaded store.
    pub fn store(&self) -> Result<&TestTaskStore, eyre::Report> {
        self.store
            .as_ref()
            .ok_or_else(|| eyre::eyre!("task store has not been loaded in scenario world"))
    }

    /// Returns the task the scenario is working on.
    pub fn current_task(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .clone()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }

    /// Returns the outcome of the last operation.
    pub fn last_result(&self) -> Result<&Result<(), TaskStoreError>, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing operation result in scenario world"))
    }
}

impl Default for TaskStoreWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskStoreWorld {
    TaskStoreWorld::default()
}

/// Builds a store over the world's authority.
pub fn build_store(authority: &InMemoryTaskAuthority) -> TestTaskStore {
    TaskStore::new(
        Arc::new(authority.clone()),
        Arc::new(StaticCredentialProvider::new("scenario-token")),
    )
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
