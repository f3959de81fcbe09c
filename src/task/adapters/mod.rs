//! Adapter implementations for the task service ports.

pub mod http;
pub mod memory;
pub mod postgres;
