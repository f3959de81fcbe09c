//! In-memory adapters for tests and local runs.

mod summarizer;
mod task;

pub use summarizer::ScriptedSummaryProvider;
pub use task::InMemoryTaskRepository;
