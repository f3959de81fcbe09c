//! Task summarizer: task records with AI-generated summaries.
//!
//! This crate stores task records and, for tasks marked important, enriches
//! them with a short summary obtained from an external provider. Summary
//! generation is fail-open: an unreachable or misbehaving provider never
//! blocks a task from being created or updated.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, summarization gateway, and lifecycle service
//! - [`config`]: Environment-driven service configuration
//! - [`telemetry`]: Logging bootstrap for binaries

pub mod config;
pub mod task;
pub mod telemetry;
