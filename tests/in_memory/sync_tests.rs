//! Consistency between the task store and the in-memory authority.

use super::helpers::{seeded_authority, store_for};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::{AuthorityOperation, InMemoryTaskAuthority},
    domain::{TaskDraft, TaskId, TaskPatch, TaskStatus},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_mutations_keep_cache_equal_to_authority(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let store = store_for(&seeded_authority);
    store.load().await?;

    let created = store
        .create(TaskDraft::new("Exchange currency").with_description("EUR"))
        .await?;
    store
        .edit(created.id(), TaskPatch::new().with_description("EUR and CHF"))
        .await?;
    store.advance(created.id()).await?;
    store.advance(&TaskId::new("i-1")?).await?;
    store
        .edit(&TaskId::new("d-1")?, TaskPatch::new().with_title("Book return flights"))
        .await?;
    store.advance(&TaskId::new("d-1")?).await?;
    store.delete(&TaskId::new("p-1")?).await?;

    eyre::ensure!(store.tasks() == seeded_authority.tasks());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advance_into_done_uses_mark_done_endpoint(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let store = store_for(&seeded_authority);
    store.load().await?;

    let done = store.advance(&TaskId::new("i-1")?).await?;

    eyre::ensure!(done.status() == TaskStatus::Done);
    eyre::ensure!(seeded_authority.call_count(AuthorityOperation::MarkDone) == 1);
    eyre::ensure!(seeded_authority.call_count(AuthorityOperation::MoveStatus) == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_rule_violations_never_reach_the_authority(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let store = store_for(&seeded_authority);
    store.load().await?;
    let calls_after_load = seeded_authority.total_calls();
    let before = store.tasks();

    let archived = TaskId::new("a-1")?;
    eyre::ensure!(store.advance(&archived).await.is_err());
    eyre::ensure!(
        store
            .edit(&archived, TaskPatch::new().with_title("Renewed"))
            .await
            .is_err()
    );
    eyre::ensure!(
        store
            .edit(
                &TaskId::new("d-1")?,
                TaskPatch::new().with_description("Window seats")
            )
            .await
            .is_err()
    );
    eyre::ensure!(store.create(TaskDraft::new("   ")).await.is_err());

    eyre::ensure!(seeded_authority.total_calls() == calls_after_load);
    eyre::ensure!(store.tasks() == before);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failures_leave_cache_unchanged(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let store = store_for(&seeded_authority);
    store.load().await?;
    let before = store.tasks();

    seeded_authority.fail_all(true);
    let pending = TaskId::new("p-1")?;
    eyre::ensure!(store.create(TaskDraft::new("Extra")).await.is_err());
    eyre::ensure!(
        store
            .edit(&pending, TaskPatch::new().with_title("Plan long trip"))
            .await
            .is_err()
    );
    eyre::ensure!(store.advance(&pending).await.is_err());
    eyre::ensure!(store.delete(&pending).await.is_err());
    seeded_authority.fail_all(false);

    eyre::ensure!(store.tasks() == before);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_after_failed_load_recovers(
    seeded_authority: InMemoryTaskAuthority,
) -> eyre::Result<()> {
    let store = store_for(&seeded_authority);
    seeded_authority.fail_next(AuthorityOperation::List);

    eyre::ensure!(store.load().await.is_err());
    eyre::ensure!(store.is_empty());

    let tasks = store.load().await?;
    eyre::ensure!(tasks.len() == 4);
    eyre::ensure!(store.grouped().get(TaskStatus::Archived).len() == 1);
    Ok(())
}
