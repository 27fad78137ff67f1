//! Given steps for task store BDD scenarios.

use super::world::{TaskStoreWorld, build_store, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::{
    adapters::memory::{AuthorityOperation, InMemoryTaskAuthority},
    domain::{Task, TaskId, TaskStatus},
};

#[given("an empty task authority")]
fn empty_authority(world: &mut TaskStoreWorld) {
    world.authority = InMemoryTaskAuthority::new();
}

#[given(r#"the authority holds a task titled "{title}" in status "{status}""#)]
fn authority_holds_task(
    world: &mut TaskStoreWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let id = TaskId::new("task-1").wrap_err("valid scenario task id")?;
    world.authority = InMemoryTaskAuthority::with_tasks([Task::new(id.clone(), title, "", status)]);
    world.current_task = Some(id);
    Ok(())
}

#[given("the task store has been loaded")]
fn store_loaded(world: &mut TaskStoreWorld) -> Result<(), eyre::Report> {
    let store = build_store(&world.authority);
    run_async(store.load()).wrap_err("load task store in scenario setup")?;
    world.store = Some(store);
    Ok(())
}

#[given("the authority will fail the next delete")]
fn authority_fails_next_delete(world: &mut TaskStoreWorld) {
    world.authority.fail_next(AuthorityOperation::Delete);
}

#[given("the authority will fail the next create")]
fn authority_fails_next_create(world: &mut TaskStoreWorld) {
    world.authority.fail_next(AuthorityOperation::Create);
}
