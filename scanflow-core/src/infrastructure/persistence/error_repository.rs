//! SQLite implementation of the project error repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::error::{DomainError, ProjectError};
use crate::domain::repositories::ProjectErrorRepository;

use super::project_repository::{parse_json, parse_uuid};

pub struct SqliteProjectErrorRepository {
    pool: SqlitePool,
}

impl SqliteProjectErrorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_error(row: &SqliteRow) -> Result<ProjectError, DomainError> {
    Ok(ProjectError {
        project_uuid: parse_uuid(&row.try_get::<String, _>("project_uuid")?)?,
        model: row.try_get("model")?,
        details: parse_json(&row.try_get::<String, _>("details")?)?,
        message: row.try_get("message")?,
        traceback: row.try_get("traceback")?,
        created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
    })
}

#[async_trait]
impl ProjectErrorRepository for SqliteProjectErrorRepository {
    async fn create(&self, error: &ProjectError) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO project_errors (
                project_uuid, model, details, message, traceback, created_date
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(error.project_uuid.to_string())
        .bind(&error.model)
        .bind(error.details.to_string())
        .bind(&error.message)
        .bind(&error.traceback)
        .bind(error.created_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_project(&self, project_uuid: Uuid) -> Result<Vec<ProjectError>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM project_errors WHERE project_uuid = ?1 ORDER BY created_date, id",
        )
        .bind(project_uuid.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_error).collect()
    }

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM project_errors WHERE project_uuid = ?1")
            .bind(project_uuid.to_string())
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count as u64)
    }
}
