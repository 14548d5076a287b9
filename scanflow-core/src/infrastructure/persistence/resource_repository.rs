//! SQLite implementation of the codebase resource repository

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repositories::ResourceRepository;
use crate::domain::resource::{CodebaseResource, ResourceStatus};

use super::project_repository::{parse_json, parse_uuid};

pub struct SqliteResourceRepository {
    pool: SqlitePool,
}

impl SqliteResourceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_resource(row: &SqliteRow) -> Result<CodebaseResource, DomainError> {
    let status: String = row.try_get("status")?;
    let resource_type: String = row.try_get("resource_type")?;
    let license_expressions: Vec<String> =
        serde_json::from_str(&row.try_get::<String, _>("license_expressions")?).map_err(|e| {
            DomainError::Database {
                message: format!("invalid license expressions in database: {e}"),
            }
        })?;

    Ok(CodebaseResource {
        uuid: parse_uuid(&row.try_get::<String, _>("uuid")?)?,
        project_uuid: parse_uuid(&row.try_get::<String, _>("project_uuid")?)?,
        path: row.try_get("path")?,
        rootfs_path: row.try_get("rootfs_path")?,
        status: status.parse().ok(),
        resource_type: resource_type.parse().ok(),
        name: row.try_get("name")?,
        extension: row.try_get("extension")?,
        size: row.try_get("size")?,
        mime_type: row.try_get("mime_type")?,
        file_type: row.try_get("file_type")?,
        licenses: parse_json(&row.try_get::<String, _>("licenses")?)?,
        license_expressions,
    })
}

#[async_trait]
impl ResourceRepository for SqliteResourceRepository {
    async fn create(&self, resource: &CodebaseResource) -> Result<bool, DomainError> {
        let status = resource.status.map(|s| s.to_string()).unwrap_or_default();
        let resource_type = resource
            .resource_type
            .map(|t| t.to_string())
            .unwrap_or_default();
        let license_expressions =
            serde_json::to_string(&resource.license_expressions).unwrap_or_else(|_| "[]".into());

        let result = sqlx::query(
            "INSERT INTO codebase_resources (
                uuid, project_uuid, path, rootfs_path, status, resource_type,
                name, extension, size, mime_type, file_type, licenses,
                license_expressions
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(resource.uuid.to_string())
        .bind(resource.project_uuid.to_string())
        .bind(&resource.path)
        .bind(&resource.rootfs_path)
        .bind(status)
        .bind(resource_type)
        .bind(&resource.name)
        .bind(&resource.extension)
        .bind(resource.size)
        .bind(&resource.mime_type)
        .bind(&resource.file_type)
        .bind(resource.licenses.to_string())
        .bind(license_expressions)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                let unique = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if unique {
                    // duplicate path: idempotent creation, not an error
                    tracing::debug!(path = %resource.path, "resource already exists, skipped");
                    Ok(false)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn get_by_path(
        &self,
        project_uuid: Uuid,
        path: &str,
    ) -> Result<Option<CodebaseResource>, DomainError> {
        let row =
            sqlx::query("SELECT * FROM codebase_resources WHERE project_uuid = ?1 AND path = ?2")
                .bind(project_uuid.to_string())
                .bind(path)
                .fetch_optional(&self.pool)
                .await?;

        row.as_ref().map(row_to_resource).transpose()
    }

    async fn list_for_project(
        &self,
        project_uuid: Uuid,
    ) -> Result<Vec<CodebaseResource>, DomainError> {
        let rows =
            sqlx::query("SELECT * FROM codebase_resources WHERE project_uuid = ?1 ORDER BY path")
                .bind(project_uuid.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_resource).collect()
    }

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM codebase_resources WHERE project_uuid = ?1")
            .bind(project_uuid.to_string())
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count as u64)
    }

    async fn update_scanned_without_licenses(
        &self,
        project_uuid: Uuid,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE codebase_resources SET status = ?2
             WHERE project_uuid = ?1 AND status = ?3 AND resource_type = 'file'
               AND licenses = '[]'",
        )
        .bind(project_uuid.to_string())
        .bind(ResourceStatus::NoLicenses.as_str())
        .bind(ResourceStatus::Scanned.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_scanned_with_unknown_license(
        &self,
        project_uuid: Uuid,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE codebase_resources SET status = ?2
             WHERE project_uuid = ?1 AND status = ?3 AND resource_type = 'file'
               AND license_expressions LIKE '%unknown%'",
        )
        .bind(project_uuid.to_string())
        .bind(ResourceStatus::UnknownLicense.as_str())
        .bind(ResourceStatus::Scanned.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_no_status(
        &self,
        project_uuid: Uuid,
        status: ResourceStatus,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE codebase_resources SET status = ?2
             WHERE project_uuid = ?1 AND status = ''",
        )
        .bind(project_uuid.to_string())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_files_without_status(
        &self,
        project_uuid: Uuid,
        status: ResourceStatus,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE codebase_resources SET status = ?2
             WHERE project_uuid = ?1 AND status = '' AND resource_type = 'file'",
        )
        .bind(project_uuid.to_string())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
