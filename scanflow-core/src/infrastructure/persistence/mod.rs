//! SQLite persistence - the workspace database and its repositories

mod error_repository;
mod package_repository;
mod project_repository;
mod resource_repository;
mod run_repository;

pub use error_repository::SqliteProjectErrorRepository;
pub use package_repository::SqlitePackageRepository;
pub use project_repository::SqliteProjectRepository;
pub use resource_repository::SqliteResourceRepository;
pub use run_repository::SqliteRunRepository;

use std::path::Path;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::domain::error::DomainError;
use crate::domain::repositories::{
    PackageRepository, ProjectErrorRepository, ProjectRepository, ResourceRepository,
    RunRepository,
};

/// Schema statements, applied on connect. `IF NOT EXISTS` keeps the
/// application startup idempotent.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS projects (
        uuid TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        work_directory TEXT NOT NULL,
        created_date TEXT NOT NULL,
        extra_data TEXT NOT NULL DEFAULT '{}'
    )",
    "CREATE TABLE IF NOT EXISTS codebase_resources (
        uuid TEXT PRIMARY KEY,
        project_uuid TEXT NOT NULL REFERENCES projects(uuid) ON DELETE CASCADE,
        path TEXT NOT NULL,
        rootfs_path TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT '',
        resource_type TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL DEFAULT '',
        extension TEXT NOT NULL DEFAULT '',
        size INTEGER,
        mime_type TEXT NOT NULL DEFAULT '',
        file_type TEXT NOT NULL DEFAULT '',
        licenses TEXT NOT NULL DEFAULT '[]',
        license_expressions TEXT NOT NULL DEFAULT '[]',
        UNIQUE (project_uuid, path)
    )",
    "CREATE TABLE IF NOT EXISTS discovered_packages (
        uuid TEXT PRIMARY KEY,
        project_uuid TEXT NOT NULL REFERENCES projects(uuid) ON DELETE CASCADE,
        type TEXT NOT NULL DEFAULT '',
        namespace TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL DEFAULT '',
        version TEXT NOT NULL DEFAULT '',
        qualifiers TEXT NOT NULL DEFAULT '',
        subpath TEXT NOT NULL DEFAULT '',
        filename TEXT NOT NULL DEFAULT '',
        primary_language TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        release_date TEXT NOT NULL DEFAULT '',
        homepage_url TEXT NOT NULL DEFAULT '',
        download_url TEXT NOT NULL DEFAULT '',
        bug_tracking_url TEXT NOT NULL DEFAULT '',
        code_view_url TEXT NOT NULL DEFAULT '',
        vcs_url TEXT NOT NULL DEFAULT '',
        size INTEGER,
        license_expression TEXT NOT NULL DEFAULT '',
        declared_license TEXT NOT NULL DEFAULT '',
        copyright TEXT NOT NULL DEFAULT '',
        source_packages TEXT NOT NULL DEFAULT '[]',
        UNIQUE (project_uuid, type, namespace, name, version, qualifiers, subpath)
    )",
    "CREATE TABLE IF NOT EXISTS runs (
        uuid TEXT PRIMARY KEY,
        project_uuid TEXT NOT NULL REFERENCES projects(uuid) ON DELETE CASCADE,
        pipeline_name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_date TEXT NOT NULL,
        task_id TEXT,
        task_start_date TEXT,
        task_end_date TEXT,
        task_exitcode INTEGER,
        log TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS project_errors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_uuid TEXT NOT NULL REFERENCES projects(uuid) ON DELETE CASCADE,
        model TEXT NOT NULL,
        details TEXT NOT NULL DEFAULT '{}',
        message TEXT NOT NULL DEFAULT '',
        traceback TEXT NOT NULL DEFAULT '',
        created_date TEXT NOT NULL
    )",
];

/// Handle to the workspace SQLite database.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database file and apply the schema.
    pub async fn connect(path: &Path) -> Result<Self, DomainError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    /// In-memory database for tests. A single connection keeps every
    /// query on the same memory store.
    pub async fn connect_in_memory() -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    async fn migrate(&self) -> Result<(), DomainError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build the repository set over this database.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            projects: Arc::new(SqliteProjectRepository::new(self.pool.clone())),
            resources: Arc::new(SqliteResourceRepository::new(self.pool.clone())),
            packages: Arc::new(SqlitePackageRepository::new(self.pool.clone())),
            runs: Arc::new(SqliteRunRepository::new(self.pool.clone())),
            errors: Arc::new(SqliteProjectErrorRepository::new(self.pool.clone())),
        }
    }
}

/// The full repository set, shared across services.
#[derive(Clone)]
pub struct Repositories {
    pub projects: Arc<dyn ProjectRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub packages: Arc<dyn PackageRepository>,
    pub runs: Arc<dyn RunRepository>,
    pub errors: Arc<dyn ProjectErrorRepository>,
}
