//! Application services: the session-scoped task store.

mod config;
mod store;

pub use config::TaskStoreConfig;
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
