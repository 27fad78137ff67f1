//! Session teardown behaviour of the task store.

use super::helpers::{seeded_authority, store_for};
use async_trait::async_trait;
use rstest::rstest;
use std::sync::Arc;
use taskboard::task::{
    adapters::memory::{InMemoryTaskAuthority, StaticCredentialProvider},
    domain::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus},
    ports::{BearerToken, TaskAuthority, TaskAuthorityResult},
    services::{TaskStore, TaskStoreError},
};
use tokio::sync::Notify;

/// Authority whose snapshot fetch waits until the gate opens.
struct GatedAuthority {
    inner: InMemoryTaskAuthority,
    gate: Arc<Notify>,
}

#[async_trait]
impl TaskAuthority for GatedAuthority {
    async fn list(&self, token: &BearerToken) -> TaskAuthorityResult<Vec<Task>> {
        self.gate.notified().await;
        self.inner.list(token).await
    }

    async fn create(&self, token: &BearerToken, draft: &TaskDraft) -> TaskAuthorityResult<Task> {
        self.inner.create(token, draft).await
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> TaskAuthorityResult<Task> {
        self.inner.update(token, id, patch).await
    }

    async fn move_status(
        &self,
        token: &BearerToken,
        id: &TaskId,
        status: TaskStatus,
    ) -> TaskAuthorityResult<Task> {
        self.inner.move_status(token, id, status).await
    }

    async fn mark_done(&self, token: &BearerToken, id: &TaskId) -> TaskAuthorityResult<Task> {
        self.inner.mark_done(token, id).await
    }

    async fn delete(&self, token: &BearerToken, id: &TaskId) -> TaskAuthorityResult<()> {
        self.inner.delete(token, id).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_clears_collection_and_blocks_reload(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let store = store_for(&seeded_authority);
    store.load().await?;

    store.close();

    eyre::ensure!(store.is_empty());
    eyre::ensure!(!store.is_loaded());
    eyre::ensure!(matches!(
        store.load().await,
        Err(TaskStoreError::SessionClosed)
    ));
    eyre::ensure!(matches!(
        store.advance(&TaskId::new("p-1")?).await,
        Err(TaskStoreError::SessionClosed)
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stores_share_authority_but_not_cache(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let first = store_for(&seeded_authority);
    let second = store_for(&seeded_authority);
    first.load().await?;
    second.load().await?;

    first.create(TaskDraft::new("Only in first cache")).await?;

    eyre::ensure!(first.len() == 5);
    eyre::ensure!(second.len() == 4);
    second.load().await?;
    eyre::ensure!(second.len() == 5);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn snapshot_arriving_after_close_is_discarded(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let gate = Arc::new(Notify::new());
    let authority = GatedAuthority {
        inner: seeded_authority,
        gate: Arc::clone(&gate),
    };
    let store = Arc::new(TaskStore::new(
        Arc::new(authority),
        Arc::new(StaticCredentialProvider::new("integration-token")),
    ));

    let loading = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.load().await }
    });
    store.close();
    gate.notify_one();

    let result = loading.await?;
    eyre::ensure!(matches!(result, Err(TaskStoreError::SessionClosed)));
    eyre::ensure!(store.is_empty());
    eyre::ensure!(!store.is_loaded());
    Ok(())
}
