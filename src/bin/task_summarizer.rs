//! Command-line front end for the task summarizer.
//!
//! Usage:
//!
//! ```text
//! task-summarizer migrate
//! task-summarizer create --title "Write report" --important
//! task-summarizer get <task-id>
//! task-summarizer update <task-id> --status completed --important true
//! task-summarizer delete <task-id>
//! ```
//!
//! Configuration comes from the environment (see
//! [`task_summarizer::config`]). Each command prints one JSON document on
//! stdout; logs go to stderr. Failed operations print an error document
//! carrying the matching HTTP status and exit non-zero.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use mockable::DefaultClock;
use serde_json::json;
use task_summarizer::config::ServiceConfig;
use task_summarizer::task::adapters::http::HttpSummaryProvider;
use task_summarizer::task::adapters::postgres::{PostgresTaskRepository, build_pool};
use task_summarizer::task::domain::TaskId;
use task_summarizer::task::services::{
    CreateTaskRequest, SummarizationGateway, TaskLifecycleError, TaskLifecycleService,
    TaskOperation, TaskWriteOutcome, UpdateTaskRequest,
};
use task_summarizer::telemetry;
use tracing::info;

type Service = TaskLifecycleService<PostgresTaskRepository, HttpSummaryProvider, DefaultClock>;

#[derive(Parser)]
#[command(name = "task-summarizer", version, about = "Task records with AI summaries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the tasks table if it does not exist.
    Migrate,
    /// Create a task.
    Create(CreateArgs),
    /// Show a task.
    Get {
        /// Task identifier.
        id: TaskId,
    },
    /// Change selected fields of a task.
    Update(UpdateArgs),
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: TaskId,
    },
}

#[derive(Args)]
struct CreateArgs {
    /// Task title.
    #[arg(long)]
    title: String,
    /// Free-text description.
    #[arg(long)]
    description: Option<String>,
    /// Initial status (pending, in_progress, completed).
    #[arg(long)]
    status: Option<String>,
    /// Initial priority (low, medium, high).
    #[arg(long)]
    priority: Option<String>,
    /// Mark the task important and request a summary.
    #[arg(long)]
    important: bool,
}

impl From<CreateArgs> for CreateTaskRequest {
    fn from(args: CreateArgs) -> Self {
        let mut request = Self::new(args.title).with_importance(args.important);
        if let Some(text) = args.description {
            request = request.with_description(text);
        }
        if let Some(value) = args.status {
            request = request.with_status(value);
        }
        if let Some(value) = args.priority {
            request = request.with_priority(value);
        }
        request
    }
}

#[derive(Args)]
struct UpdateArgs {
    /// Task identifier.
    id: TaskId,
    /// New title.
    #[arg(long)]
    title: Option<String>,
    /// New description.
    #[arg(long, conflicts_with = "clear_description")]
    description: Option<String>,
    /// Remove the description.
    #[arg(long)]
    clear_description: bool,
    /// New status.
    #[arg(long)]
    status: Option<String>,
    /// New priority.
    #[arg(long)]
    priority: Option<String>,
    /// New importance flag.
    #[arg(long)]
    important: Option<bool>,
}

impl From<UpdateArgs> for UpdateTaskRequest {
    fn from(args: UpdateArgs) -> Self {
        let mut request = Self::new(args.id);
        if let Some(text) = args.title {
            request = request.with_title(text);
        }
        if let Some(text) = args.description {
            request = request.with_description(text);
        } else if args.clear_description {
            request = request.without_description();
        }
        if let Some(value) = args.status {
            request = request.with_status(value);
        }
        if let Some(value) = args.priority {
            request = request.with_priority(value);
        }
        if let Some(flag) = args.important {
            request = request.with_importance(flag);
        }
        request
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    telemetry::init_tracing(telemetry::DEFAULT_DIRECTIVE)?;
    let cli = Cli::parse();
    let config = ServiceConfig::from_env().wrap_err("failed to load configuration")?;

    let pool = build_pool(&config.database_url, config.database_pool_size)
        .wrap_err("failed to build database pool")?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));

    if matches!(cli.command, Command::Migrate) {
        repository
            .apply_schema()
            .await
            .wrap_err("failed to apply schema")?;
        info!("schema applied");
        emit(&json!({ "migrated": true }))?;
        return Ok(ExitCode::SUCCESS);
    }

    let gateway = match &config.summarizer {
        Some(summarizer) => {
            let provider =
                HttpSummaryProvider::new(&summarizer.base_url, summarizer.api_key.expose())
                    .wrap_err("failed to build summary provider client")?;
            SummarizationGateway::new(Arc::new(provider), summarizer.policy)
        }
        None => {
            info!("summary provider not configured; summarization disabled");
            SummarizationGateway::disabled()
        }
    };
    let service: Service = TaskLifecycleService::new(repository, gateway, Arc::new(DefaultClock));

    run(&service, cli.command).await
}

async fn run(service: &Service, command: Command) -> Result<ExitCode> {
    let (operation, result) = match command {
        Command::Migrate => return Ok(ExitCode::SUCCESS),
        Command::Create(args) => (
            TaskOperation::Create,
            service
                .create_task(args.into())
                .await
                .map(|written| write_document(&written)),
        ),
        Command::Get { id } => (
            TaskOperation::Read,
            service.get_task(id).await.map(|task| json!({ "task": task })),
        ),
        Command::Update(args) => (
            TaskOperation::Update,
            service
                .update_task(args.into())
                .await
                .map(|written| write_document(&written)),
        ),
        Command::Delete { id } => (
            TaskOperation::Delete,
            service
                .delete_task(id)
                .await
                .map(|deleted| json!({ "id": deleted })),
        ),
    };

    match result {
        Ok(body) => {
            emit(&json!({ "status": operation.success_status(), "body": body }))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            emit(&error_document(&err))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn write_document(outcome: &TaskWriteOutcome) -> serde_json::Value {
    json!({
        "task": outcome.task,
        "summarization": outcome.summarization.to_string(),
    })
}

fn error_document(err: &TaskLifecycleError) -> serde_json::Value {
    json!({ "status": err.http_status(), "error": err.to_string() })
}

fn emit(document: &serde_json::Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, document)?;
    writeln!(stdout)?;
    Ok(())
}
