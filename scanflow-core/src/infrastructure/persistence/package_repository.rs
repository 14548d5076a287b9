//! SQLite implementation of the discovered package repository

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::package::{DiscoveredPackage, PackageIdentity};
use crate::domain::repositories::PackageRepository;

use super::project_repository::parse_uuid;

pub struct SqlitePackageRepository {
    pool: SqlitePool,
}

impl SqlitePackageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_package(row: &SqliteRow) -> Result<DiscoveredPackage, DomainError> {
    let source_packages: Vec<String> =
        serde_json::from_str(&row.try_get::<String, _>("source_packages")?).map_err(|e| {
            DomainError::Database {
                message: format!("invalid source packages in database: {e}"),
            }
        })?;

    Ok(DiscoveredPackage {
        uuid: parse_uuid(&row.try_get::<String, _>("uuid")?)?,
        project_uuid: parse_uuid(&row.try_get::<String, _>("project_uuid")?)?,
        package_type: row.try_get("type")?,
        namespace: row.try_get("namespace")?,
        name: row.try_get("name")?,
        version: row.try_get("version")?,
        qualifiers: row.try_get("qualifiers")?,
        subpath: row.try_get("subpath")?,
        filename: row.try_get("filename")?,
        primary_language: row.try_get("primary_language")?,
        description: row.try_get("description")?,
        release_date: row.try_get("release_date")?,
        homepage_url: row.try_get("homepage_url")?,
        download_url: row.try_get("download_url")?,
        bug_tracking_url: row.try_get("bug_tracking_url")?,
        code_view_url: row.try_get("code_view_url")?,
        vcs_url: row.try_get("vcs_url")?,
        size: row.try_get("size")?,
        license_expression: row.try_get("license_expression")?,
        declared_license: row.try_get("declared_license")?,
        copyright: row.try_get("copyright")?,
        source_packages,
    })
}

#[async_trait]
impl PackageRepository for SqlitePackageRepository {
    async fn create(&self, package: &DiscoveredPackage) -> Result<(), DomainError> {
        let source_packages =
            serde_json::to_string(&package.source_packages).unwrap_or_else(|_| "[]".into());

        sqlx::query(
            "INSERT INTO discovered_packages (
                uuid, project_uuid, type, namespace, name, version, qualifiers,
                subpath, filename, primary_language, description, release_date,
                homepage_url, download_url, bug_tracking_url, code_view_url,
                vcs_url, size, license_expression, declared_license, copyright,
                source_packages
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                       ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)",
        )
        .bind(package.uuid.to_string())
        .bind(package.project_uuid.to_string())
        .bind(&package.package_type)
        .bind(&package.namespace)
        .bind(&package.name)
        .bind(&package.version)
        .bind(&package.qualifiers)
        .bind(&package.subpath)
        .bind(&package.filename)
        .bind(&package.primary_language)
        .bind(&package.description)
        .bind(&package.release_date)
        .bind(&package.homepage_url)
        .bind(&package.download_url)
        .bind(&package.bug_tracking_url)
        .bind(&package.code_view_url)
        .bind(&package.vcs_url)
        .bind(package.size)
        .bind(&package.license_expression)
        .bind(&package.declared_license)
        .bind(&package.copyright)
        .bind(source_packages)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_identity(
        &self,
        project_uuid: Uuid,
        identity: &PackageIdentity,
    ) -> Result<Option<DiscoveredPackage>, DomainError> {
        let row = sqlx::query(
            "SELECT * FROM discovered_packages
             WHERE project_uuid = ?1 AND type = ?2 AND namespace = ?3 AND name = ?4
               AND version = ?5 AND qualifiers = ?6 AND subpath = ?7",
        )
        .bind(project_uuid.to_string())
        .bind(&identity.package_type)
        .bind(&identity.namespace)
        .bind(&identity.name)
        .bind(&identity.version)
        .bind(&identity.qualifiers)
        .bind(&identity.subpath)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_package).transpose()
    }

    async fn update(&self, package: &DiscoveredPackage) -> Result<(), DomainError> {
        let source_packages =
            serde_json::to_string(&package.source_packages).unwrap_or_else(|_| "[]".into());

        sqlx::query(
            "UPDATE discovered_packages SET
                filename = ?2, primary_language = ?3, description = ?4,
                release_date = ?5, homepage_url = ?6, download_url = ?7,
                bug_tracking_url = ?8, code_view_url = ?9, vcs_url = ?10,
                size = ?11, license_expression = ?12, declared_license = ?13,
                copyright = ?14, source_packages = ?15
             WHERE uuid = ?1",
        )
        .bind(package.uuid.to_string())
        .bind(&package.filename)
        .bind(&package.primary_language)
        .bind(&package.description)
        .bind(&package.release_date)
        .bind(&package.homepage_url)
        .bind(&package.download_url)
        .bind(&package.bug_tracking_url)
        .bind(&package.code_view_url)
        .bind(&package.vcs_url)
        .bind(package.size)
        .bind(&package.license_expression)
        .bind(&package.declared_license)
        .bind(&package.copyright)
        .bind(source_packages)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_project(
        &self,
        project_uuid: Uuid,
    ) -> Result<Vec<DiscoveredPackage>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM discovered_packages WHERE project_uuid = ?1
             ORDER BY type, namespace, name, version",
        )
        .bind(project_uuid.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_package).collect()
    }

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM discovered_packages WHERE project_uuid = ?1")
            .bind(project_uuid.to_string())
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count as u64)
    }
}
