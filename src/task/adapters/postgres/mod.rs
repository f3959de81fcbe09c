//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TASKS_SCHEMA_SQL, TaskPgPool, build_pool};
