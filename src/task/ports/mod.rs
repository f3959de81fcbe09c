//! Port contracts for the task service.
//!
//! Ports define infrastructure-agnostic interfaces used by task services:
//! the record store and the external summary provider.

pub mod repository;
pub mod summarizer;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskUpdate};
pub use summarizer::{
    SummaryProvider, SummaryProviderError, SummaryProviderResult, SummaryRequest,
};
