//! Embedded `PostgreSQL` cluster shared by the database tests.
//!
//! The cluster starts once per test binary. Unprivileged runs drive
//! `postgresql_embedded` in process; root runs delegate each lifecycle step
//! to the `pg_worker` binary, which drops to `nobody` first.


use self::env_utils::{EnvVarGuard, bootstrap_env_changes, env_vars_to_os};
use self::fs_utils::{sync_password_from_file, sync_port_from_pid};
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use rstest::fixture;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<ManagedCluster> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Shared cluster handle.
pub type PostgresCluster = &'static ManagedCluster;

/// Builds the single-threaded runtime used outside async tests.
///
/// # Errors
///
/// Returns an error when the runtime cannot be created.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Embedded cluster with its bootstrap settings.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    env_vars: Vec<(String, Option<String>)>,
    runtime: Option<Runtime>,
    postgres: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        let changes = bootstrap_env_changes()?;
        let guard = EnvVarGuard::set_many(&changes);
        let bootstrapped = bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError);
        drop(guard);
        let mut bootstrap = bootstrapped?;
        sync_password_from_file(&mut bootstrap.settings)?;
        let env_vars = bootstrap.environment.to_env();
        let mut cluster = Self {
            bootstrap,
            env_vars,
            runtime: None,
            postgres: None,
        };
        cluster.start()?;
        Ok(cluster)
    }

    /// Returns the connection URL for `database`.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.settings().url(database)
    }

    const fn settings(&self) -> &Settings {
        &self.bootstrap.settings
    }

    /// Creates `template` and runs `migrate` against it, unless it exists.
    ///
    /// A failed migration drops the half-built template.
    ///
    /// # Errors
    ///
    /// Returns an error when the admin statements or `migrate` fail.
    pub fn ensure_template_exists<F>(&self, template: &str, migrate: F) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError>,
    {
        let _guard = template_lock();
        if self.database_exists(template)? {
            return Ok(());
        }

        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        if let Err(err) = migrate(template) {
            self.drop_database(template)?;
            return Err(err);
        }
        Ok(())
    }

    /// Clones `template` into a fresh database dropped with the handle.
    ///
    /// # Errors
    ///
    /// Returns an error when `CREATE DATABASE` fails.
    pub fn temporary_database_from_template(
        &'static self,
        name: &str,
        template: &str,
    ) -> Result<TemporaryDatabase, BoxError> {
        {
            let _guard = template_lock();
            self.execute_admin_sql(&format!(
                "CREATE DATABASE {} TEMPLATE {}",
                quote_identifier(name),
                quote_identifier(template),
            ))?;
        }
        Ok(TemporaryDatabase {
            cluster: self,
            name: name.to_owned(),
            url: self.database_url(name),
        })
    }

    fn drop_database(&self, name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(name)
        ))
    }

    fn start(&mut self) -> Result<(), BoxError> {
        match self.bootstrap.privileges {
            ExecutionPrivileges::Root => {
                self.run_worker_operation(WorkerOperation::Setup, self.bootstrap.setup_timeout)?;
                self.run_worker_operation(WorkerOperation::Start, self.bootstrap.start_timeout)?;
            }
            ExecutionPrivileges::Unprivileged => self.start_in_process()?,
        }
        sync_port_from_pid(&mut self.bootstrap.settings)
    }

    fn start_in_process(&mut self) -> Result<(), BoxError> {
        let runtime = test_runtime()?;
        let guard = EnvVarGuard::set_many(&env_vars_to_os(&self.env_vars));
        let mut postgres = PostgreSQL::new(self.settings().clone());
        let started = runtime.block_on(async {
            postgres
                .setup()
                .await
                .map_err(|err| Box::new(err) as BoxError)?;
            if !matches!(postgres.status(), Status::Started) {
                postgres
                    .start()
                    .await
                    .map_err(|err| Box::new(err) as BoxError)?;
            }
            Ok::<(), BoxError>(())
        });
        drop(guard);
        started?;
        self.bootstrap.settings = postgres.settings().clone();
        self.runtime = Some(runtime);
        self.postgres = Some(postgres);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), BoxError> {
        match (self.postgres.take(), &self.runtime) {
            (Some(postgres), Some(runtime)) => runtime
                .block_on(postgres.stop())
                .map_err(|err| Box::new(err) as BoxError),
            (None, _) if matches!(self.bootstrap.privileges, ExecutionPrivileges::Root) => {
                self.run_worker_operation(WorkerOperation::Stop, self.bootstrap.shutdown_timeout)
            }
            _ => Ok(()),
        }
    }

    fn run_worker_operation(
        &self,
        operation: WorkerOperation,
        timeout: Duration,
    ) -> Result<(), BoxError> {
        let worker = self.bootstrap.worker_binary.as_ref().ok_or_else(|| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "PG_EMBEDDED_WORKER is not set for worker operation",
            )) as BoxError
        })?;
        let args = WorkerRequestArgs {
            worker: worker.as_path(),
            settings: self.settings(),
            env_vars: &self.env_vars,
            operation,
            timeout,
        };
        run_worker(&WorkerRequest::new(args)).map_err(|err| Box::new(err) as BoxError)
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut conn)
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    fn database_exists(&self, name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut conn = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(name)
        .get_result::<ExistsRow>(&mut conn)
        .map_err(|err| Box::new(err) as BoxError)?;
        Ok(row.exists)
    }
}

impl Drop for ManagedCluster {
    fn drop(&mut self) {
        drop(self.stop());
    }
}

/// Database cloned from the template, dropped when the handle goes away.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Connection URL for this database.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Starts the shared cluster on first use.
///
/// # Panics
///
/// Panics when the cluster cannot be started.
#[fixture]
pub fn postgres_cluster() -> PostgresCluster {
    SHARED_CLUSTER.get_or_init(|| match ManagedCluster::new() {
        Ok(cluster) => cluster,
        Err(err) => panic!("failed to start embedded PostgreSQL: {err}"),
    })
}

fn template_lock() -> std::sync::MutexGuard<'static, ()> {
    TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
