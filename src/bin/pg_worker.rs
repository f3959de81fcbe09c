//! Runs one embedded `PostgreSQL` lifecycle step for the database test suite.
//!
//! ```text
//! pg_worker <setup|start|stop> <payload-path>
//! ```
//!
//! The payload is the JSON [`WorkerPayload`] written by the test bootstrap:
//! cluster settings plus environment overrides. When started as root the
//! worker switches to `nobody` before touching the cluster, because
//! `initdb` and `postgres` refuse to run with superuser privileges.

#[cfg(unix)]
use camino::{Utf8Path, Utf8PathBuf};
#[cfg(unix)]
use nix::unistd::{Uid, User, initgroups, setgid, setuid};
#[cfg(unix)]
use pg_embedded_setup_unpriv::ambient_dir_and_path;
#[cfg(unix)]
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
#[cfg(unix)]
use postgresql_embedded::{PostgreSQL, Status};
#[cfg(unix)]
use std::env;
#[cfg(unix)]
use std::ffi::CString;
#[cfg(unix)]
use std::io::Read;
#[cfg(unix)]
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(unix)]
const UNPRIVILEGED_USER: &str = "nobody";

#[cfg(unix)]
#[derive(Debug, Error)]
enum WorkerError {
    #[error("usage: pg_worker <setup|start|stop> <payload-path>: {0}")]
    Usage(String),
    #[error("failed to read payload: {0}")]
    PayloadRead(#[source] BoxError),
    #[error("failed to parse payload: {0}")]
    PayloadParse(#[source] serde_json::Error),
    #[error("invalid cluster settings: {0}")]
    Settings(String),
    #[error("failed to switch to {UNPRIVILEGED_USER}: {0}")]
    PrivilegeDrop(String),
    #[error("failed to build runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("{step} failed: {message}")]
    Cluster { step: &'static str, message: String },
}

#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Setup,
    Start,
    Stop,
}

#[cfg(unix)]
impl Step {
    fn parse(value: &str) -> Result<Self, WorkerError> {
        match value {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(WorkerError::Usage(format!("unknown step '{other}'"))),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[cfg(unix)]
fn main() -> Result<(), BoxError> {
    let (step, payload_path) = parse_args(env::args().skip(1))?;
    let payload = load_payload(&payload_path)?;
    drop_privileges_if_root(UNPRIVILEGED_USER)?;
    run_step(step, payload).map_err(Into::into)
}

#[cfg(unix)]
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Step, Utf8PathBuf), WorkerError> {
    let step = args
        .next()
        .ok_or_else(|| WorkerError::Usage("missing step".to_owned()))
        .and_then(|value| Step::parse(&value))?;
    let payload_path = args
        .next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| WorkerError::Usage("missing payload path".to_owned()))?;
    if let Some(extra) = args.next() {
        return Err(WorkerError::Usage(format!("unexpected argument '{extra}'")));
    }
    Ok((step, payload_path))
}

#[cfg(unix)]
fn load_payload(path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
    let bytes = read_payload(path).map_err(WorkerError::PayloadRead)?;
    serde_json::from_slice(&bytes).map_err(WorkerError::PayloadParse)
}

#[cfg(unix)]
fn read_payload(path: &Utf8Path) -> Result<Vec<u8>, BoxError> {
    let (dir, relative) = ambient_dir_and_path(path)?;
    let mut file = dir.open(relative.as_std_path())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(unix)]
fn drop_privileges_if_root(username: &str) -> Result<(), WorkerError> {
    if !Uid::effective().is_root() {
        return Ok(());
    }

    let user = User::from_name(username)
        .map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?
        .ok_or_else(|| WorkerError::PrivilegeDrop("user does not exist".to_owned()))?;
    let name = CString::new(user.name.clone())
        .map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;
    initgroups(&name, user.gid).map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;
    setgid(user.gid).map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;
    setuid(user.uid).map_err(|err| WorkerError::PrivilegeDrop(err.to_string()))?;

    // SAFETY: no other thread exists yet.
    unsafe {
        env::set_var("HOME", &user.dir);
        env::set_var("USER", &user.name);
        env::set_var("LOGNAME", &user.name);
    }
    Ok(())
}

#[cfg(unix)]
fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
    for (key, value) in environment {
        // SAFETY: called before the runtime starts, while the worker is
        // single-threaded.
        unsafe {
            match value {
                Some(secret) => env::set_var(key, secret.expose()),
                None => env::remove_var(key),
            }
        }
    }
}

#[cfg(unix)]
fn run_step(step: Step, payload: WorkerPayload) -> Result<(), WorkerError> {
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| WorkerError::Settings(err.to_string()))?;
    apply_environment(&payload.environment);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(WorkerError::Runtime)?;

    let mut postgres = PostgreSQL::new(settings);
    runtime.block_on(async {
        match step {
            Step::Setup => {
                postgres
                    .setup()
                    .await
                    .map_err(|err| cluster_failure(step, &err))?;
                start_if_stopped(step, &mut postgres).await
            }
            Step::Start => {
                start_if_stopped(step, &mut postgres).await?;
                // The server must outlive this process.
                std::mem::forget(postgres);
                Ok(())
            }
            Step::Stop => postgres
                .stop()
                .await
                .map_err(|err| cluster_failure(step, &err)),
        }
    })
}

#[cfg(unix)]
async fn start_if_stopped(step: Step, postgres: &mut PostgreSQL) -> Result<(), WorkerError> {
    if matches!(postgres.status(), Status::Started) {
        return Ok(());
    }
    postgres
        .start()
        .await
        .map_err(|err| cluster_failure(step, &err))
}

#[cfg(unix)]
fn cluster_failure(step: Step, err: &dyn std::fmt::Display) -> WorkerError {
    WorkerError::Cluster {
        step: step.as_str(),
        message: err.to_string(),
    }
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("pg_worker is only supported on Unix platforms".into())
}
