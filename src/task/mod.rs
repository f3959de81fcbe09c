//! Task record management with conditional AI summaries.
//!
//! Tasks are created, read, partially updated, and deleted through
//! [`services::TaskLifecycleService`]. Whenever a write leaves a task marked
//! important without a summary, the service asks an external provider for one
//! through [`services::SummarizationGateway`]; provider failures only leave the
//! summary empty. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
