//! SQLite implementation of the project repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::project::Project;
use crate::domain::repositories::ProjectRepository;

pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Database {
        message: format!("invalid uuid in database: {e}"),
    })
}

pub(crate) fn parse_json(value: &str) -> Result<serde_json::Value, DomainError> {
    serde_json::from_str(value).map_err(|e| DomainError::Database {
        message: format!("invalid JSON in database: {e}"),
    })
}

fn row_to_project(row: &SqliteRow) -> Result<Project, DomainError> {
    Ok(Project {
        uuid: parse_uuid(&row.try_get::<String, _>("uuid")?)?,
        name: row.try_get("name")?,
        work_directory: std::path::PathBuf::from(row.try_get::<String, _>("work_directory")?),
        created_date: row.try_get::<DateTime<Utc>, _>("created_date")?,
        extra_data: parse_json(&row.try_get::<String, _>("extra_data")?)?,
    })
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: &Project) -> Result<(), DomainError> {
        let result = sqlx::query(
            "INSERT INTO projects (uuid, name, work_directory, created_date, extra_data)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(project.uuid.to_string())
        .bind(&project.name)
        .bind(project.work_directory.to_string_lossy().into_owned())
        .bind(project.created_date)
        .bind(project.extra_data.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let unique = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if unique {
                    Err(DomainError::ProjectAlreadyExists)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query("SELECT * FROM projects WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_project).transpose()
    }

    async fn update_extra_data(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query("UPDATE projects SET extra_data = ?2 WHERE uuid = ?1")
            .bind(project.uuid.to_string())
            .bind(project.extra_data.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, project_uuid: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM projects WHERE uuid = ?1")
            .bind(project_uuid.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
