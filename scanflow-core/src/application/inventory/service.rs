//! Resource and package ingestion
//!
//! Turns scan output into persisted records: packages keyed by their
//! normalized Package URL tuple with additive field merging, resources
//! keyed by their project-relative path with idempotent creation.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::error::{DomainError, ProjectError};
use crate::domain::package::{DiscoveredPackage, PackageIdentity, KNOWN_PACKAGE_FIELDS};
use crate::domain::project::Project;
use crate::domain::repositories::{
    PackageRepository, ProjectErrorRepository, ResourceRepository,
};
use crate::domain::resource::{CodebaseResource, ResourceStatus};
use crate::infrastructure::scanner::FileScanner;

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub struct InventoryService {
    resources: Arc<dyn ResourceRepository>,
    packages: Arc<dyn PackageRepository>,
    errors: Arc<dyn ProjectErrorRepository>,
    scanner: Arc<dyn FileScanner>,
}

impl InventoryService {
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        packages: Arc<dyn PackageRepository>,
        errors: Arc<dyn ProjectErrorRepository>,
        scanner: Arc<dyn FileScanner>,
    ) -> Self {
        Self {
            resources,
            packages,
            errors,
            scanner,
        }
    }

    /// Get, update or create a DiscoveredPackage from a package data
    /// mapping, using the normalized Package URL tuple as the unique key.
    ///
    /// Unknown keys and empty values are dropped up front. A mapping with
    /// no Package URL fields at all is recorded as a project error and
    /// fails for that single record. On an existing record, empty fields
    /// are filled from the new data; a conflicting non-empty field keeps
    /// its stored value and the skipped update is logged.
    ///
    /// An empty mapping is a no-op returning `None`.
    pub async fn update_or_create_package(
        &self,
        project: &Project,
        package_data: Value,
    ) -> Result<Option<DiscoveredPackage>, DomainError> {
        let source = match package_data.as_object() {
            Some(map) if !map.is_empty() => map,
            _ => return Ok(None),
        };

        // keep only known fields with values
        let mut data: serde_json::Map<String, Value> = source
            .iter()
            .filter(|(key, value)| {
                KNOWN_PACKAGE_FIELDS.contains(&key.as_str()) && is_truthy(value)
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let identity = match PackageIdentity::extract(&mut data) {
            Some(identity) => identity,
            None => {
                let error = ProjectError::new(
                    project.uuid,
                    "DiscoveredPackage",
                    "Package without any Package URL fields",
                    Value::Object(source.clone()),
                );
                self.errors.create(&error).await?;
                return Err(DomainError::MissingPackageIdentity);
            }
        };

        let existing = self
            .packages
            .get_by_identity(project.uuid, &identity)
            .await?;

        let package = match existing {
            None => {
                let mut package = DiscoveredPackage::new(project.uuid, identity);
                for (field, value) in &data {
                    package.set_field(field, value);
                }
                self.packages.create(&package).await?;
                package
            }
            Some(mut package) => {
                let mut has_updates = false;
                for (field, value) in &data {
                    if package.field_is_empty(field) {
                        if package.set_field(field, value) {
                            has_updates = true;
                        }
                    } else if package.field_value(field) != *value {
                        // first-wins: the stored value is kept
                        tracing::warn!(
                            purl = %package.purl().unwrap_or_default(),
                            field = %field,
                            existing = %package.field_value(field),
                            incoming = %value,
                            "conflicting package field skipped"
                        );
                    }
                }
                if has_updates {
                    self.packages.update(&package).await?;
                }
                package
            }
        };

        Ok(Some(package))
    }

    /// Create a CodebaseResource for the absolute `location`, which must be
    /// rooted under the project codebase directory. The stored path is the
    /// location relative to that directory. Creating the same path twice
    /// leaves exactly one record.
    pub async fn make_codebase_resource(
        &self,
        project: &Project,
        location: &Path,
        rootfs_path: Option<&str>,
    ) -> Result<(), DomainError> {
        let codebase_dir = project.codebase_path();

        let relative = location.strip_prefix(&codebase_dir).map_err(|_| {
            DomainError::ResourceOutsideCodebase {
                location: location.display().to_string(),
                codebase_dir: codebase_dir.display().to_string(),
            }
        })?;
        let path = relative
            .to_string_lossy()
            .trim_end_matches('/')
            .to_string();

        let info = self.scanner.resource_info(location).await?;

        let mut resource = CodebaseResource::new(project.uuid, &path);
        resource.rootfs_path = rootfs_path.map(crate::util::normalize_path).unwrap_or_default();
        resource.resource_type = Some(info.resource_type);
        resource.name = info.name;
        resource.extension = info.extension;
        resource.size = info.size;

        self.resources.create(&resource).await?;
        Ok(())
    }

    /// Flag file resources that have no status yet as scanned.
    pub async fn mark_files_scanned(&self, project: &Project) -> Result<u64, DomainError> {
        self.resources
            .update_files_without_status(project.uuid, ResourceStatus::Scanned)
            .await
    }

    /// Reclassify scanned files into `no-licenses` or `unknown-license`.
    /// Both are set-based bulk updates; resource ordering is irrelevant.
    pub async fn analyze_scanned_files(&self, project: &Project) -> Result<(u64, u64), DomainError> {
        let no_licenses = self
            .resources
            .update_scanned_without_licenses(project.uuid)
            .await?;
        let unknown = self
            .resources
            .update_scanned_with_unknown_license(project.uuid)
            .await?;
        Ok((no_licenses, unknown))
    }

    /// Flag any resource without a status as `not-analyzed`.
    pub async fn tag_not_analyzed(&self, project: &Project) -> Result<u64, DomainError> {
        self.resources
            .update_no_status(project.uuid, ResourceStatus::NotAnalyzed)
            .await
    }
}
