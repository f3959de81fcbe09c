//! Then steps for task summary BDD scenarios.

use super::world::SummaryWorld;
use eyre::ensure;
use rstest_bdd_macros::then;
use task_summarizer::task::services::SummarizationStatus;

#[then("the write succeeds with status {status:u16}")]
fn write_succeeds(world: &SummaryWorld, status: u16) -> Result<(), eyre::Report> {
    let (operation, result) = world
        .last_write
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no write was performed"))?;
    if let Err(err) = result {
        return Err(eyre::eyre!("{operation:?} failed: {err}"));
    }
    ensure!(
        operation.success_status() == status,
        "expected status {status}, got {}",
        operation.success_status()
    );
    Ok(())
}

#[then(r#"the task summary is "{summary}""#)]
fn summary_is(world: &SummaryWorld, summary: String) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let stored = task.summary().map(|value| value.as_str());
    ensure!(
        stored == Some(summary.as_str()),
        "expected summary {summary:?}, found {stored:?}"
    );
    Ok(())
}

#[then("the task has no summary")]
fn no_summary(world: &SummaryWorld) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    ensure!(
        task.summary().is_none(),
        "unexpected summary {:?}",
        task.summary()
    );
    Ok(())
}

#[then("the summary provider was called {count:usize} times")]
fn provider_called(world: &SummaryWorld, count: usize) -> Result<(), eyre::Report> {
    let provider = world
        .provider
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no summary provider configured"))?;
    let calls = provider.call_count()?;
    ensure!(calls == count, "expected {count} provider calls, saw {calls}");
    Ok(())
}

#[then("summary generation was skipped")]
fn summary_skipped(world: &SummaryWorld) -> Result<(), eyre::Report> {
    let Some((_, Ok(outcome))) = world.last_write.as_ref() else {
        return Err(eyre::eyre!("no successful write to inspect"));
    };
    ensure!(
        matches!(outcome.summarization, SummarizationStatus::Skipped(_)),
        "unexpected summarization status {:?}",
        outcome.summarization
    );
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn status_is(world: &SummaryWorld, status: String) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    ensure!(
        task.status().as_str() == status,
        "expected status {status}, found {}",
        task.status()
    );
    Ok(())
}

#[then("the task was modified after creation")]
fn modified_after_creation(world: &SummaryWorld) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    ensure!(
        task.updated_at() > task.created_at(),
        "updated_at {} should follow created_at {}",
        task.updated_at(),
        task.created_at()
    );
    Ok(())
}

#[then("reading the task fails with status {status:u16}")]
fn read_fails(world: &SummaryWorld, status: u16) -> Result<(), eyre::Report> {
    let result = world
        .last_read
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no read was performed"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("expected the read to fail"));
    };
    ensure!(
        err.http_status() == status,
        "expected status {status}, got {}",
        err.http_status()
    );
    Ok(())
}
