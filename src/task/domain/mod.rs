//! Domain model for task records.
//!
//! The domain owns field validation, the partial-update semantics of a task,
//! and the pure summarization trigger. It has no knowledge of storage or of
//! the external summary provider.

mod attributes;
mod error;
mod ids;
mod summary;
mod task;

pub use attributes::{TaskPriority, TaskStatus, TaskTitle};
pub use error::TaskDomainError;
pub use ids::TaskId;
pub use summary::{SummaryOutcome, SummaryTrigger, TaskSummary, UnavailableReason};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
