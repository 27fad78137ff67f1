//! When steps for task store BDD scenarios.

use super::world::{TaskStoreWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::{TaskDraft, TaskPatch};

#[when("the task is advanced")]
fn advance_task(world: &mut TaskStoreWorld) -> Result<(), eyre::Report> {
    let id = world.current_task()?;
    let result = run_async(world.store()?.advance(&id)).map(|_| ());
    world.last_result = Some(result);
    Ok(())
}

#[when("a task is created with an empty title")]
fn create_with_empty_title(world: &mut TaskStoreWorld) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new("").with_description("x");
    let result = run_async(world.store()?.create(draft)).map(|_| ());
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"a task is created with title "{title}""#)]
fn create_with_title(world: &mut TaskStoreWorld, title: String) -> Result<(), eyre::Report> {
    let result = run_async(world.store()?.create(TaskDraft::new(title))).map(|_| ());
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the task title is changed to "{title}""#)]
fn change_title(world: &mut TaskStoreWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.current_task()?;
    let patch = TaskPatch::new().with_title(title);
    let result = run_async(world.store()?.edit(&id, patch)).map(|_| ());
    world.last_result = Some(result);
    Ok(())
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskStoreWorld) -> Result<(), eyre::Report> {
    let id = world.current_task()?;
    let result = run_async(world.store()?.delete(&id));
    world.last_result = Some(result);
    Ok(())
}
