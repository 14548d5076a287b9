//! SQLite implementation of the run repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repositories::RunRepository;
use crate::domain::run::Run;

use super::project_repository::parse_uuid;

pub struct SqliteRunRepository {
    pool: SqlitePool,
}

impl SqliteRunRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_run(row: &SqliteRow) -> Result<Run, DomainError> {
    let task_id: Option<String> = row.try_get("task_id")?;
    let task_id = match task_id {
        Some(value) => Some(parse_uuid(&value)?),
        None => None,
    };

    Ok(Run {
        uuid: parse_uuid(&row.try_get::<String, _>("uuid")?)?,
        project_uuid: parse_uuid(&row.try_get::<String, _>("project_uuid")?)?,
        pipeline_name: row.try_get("pipeline_name")?,
        description: row.try_get("description")?,
        created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
        task_id,
        task_start_date: row.try_get::<Option<DateTime<Utc>>, _>("task_start_date")?,
        task_end_date: row.try_get::<Option<DateTime<Utc>>, _>("task_end_date")?,
        task_exitcode: row.try_get("task_exitcode")?,
        log: row.try_get("log")?,
    })
}

#[async_trait]
impl RunRepository for SqliteRunRepository {
    async fn create(&self, run: &Run) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO runs (
                uuid, project_uuid, pipeline_name, description, created_date,
                task_id, task_start_date, task_end_date, task_exitcode, log
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(run.uuid.to_string())
        .bind(run.project_uuid.to_string())
        .bind(&run.pipeline_name)
        .bind(&run.description)
        .bind(run.created_date)
        .bind(run.task_id.map(|id| id.to_string()))
        .bind(run.task_start_date)
        .bind(run.task_end_date)
        .bind(run.task_exitcode)
        .bind(&run.log)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, run: &Run) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE runs SET
                task_id = ?2, task_start_date = ?3, task_end_date = ?4,
                task_exitcode = ?5, log = ?6
             WHERE uuid = ?1",
        )
        .bind(run.uuid.to_string())
        .bind(run.task_id.map(|id| id.to_string()))
        .bind(run.task_start_date)
        .bind(run.task_end_date)
        .bind(run.task_exitcode)
        .bind(&run.log)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_project(&self, project_uuid: Uuid) -> Result<Vec<Run>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM runs WHERE project_uuid = ?1 ORDER BY created_date, rowid",
        )
        .bind(project_uuid.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_run).collect()
    }

    async fn next_not_started(&self, project_uuid: Uuid) -> Result<Option<Run>, DomainError> {
        let row = sqlx::query(
            "SELECT * FROM runs
             WHERE project_uuid = ?1 AND task_id IS NULL AND task_start_date IS NULL
             ORDER BY created_date, rowid LIMIT 1",
        )
        .bind(project_uuid.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_run).transpose()
    }

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM runs WHERE project_uuid = ?1")
            .bind(project_uuid.to_string())
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count as u64)
    }
}
