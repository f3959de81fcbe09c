//! Application services for the task lifecycle.

mod lifecycle;
mod summarization;

pub use lifecycle::{
    CreateTaskRequest, SummarizationStatus, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskOperation, TaskWriteOutcome, UpdateTaskRequest,
};
pub use summarization::{GatewayPolicy, SummarizationGateway};
