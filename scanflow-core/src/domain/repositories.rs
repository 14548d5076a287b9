//! Repository traits - the data-access contract implemented by the
//! persistence layer.

use async_trait::async_trait;
use uuid::Uuid;

use super::error::{DomainError, ProjectError};
use super::package::{DiscoveredPackage, PackageIdentity};
use super::project::Project;
use super::resource::{CodebaseResource, ResourceStatus};
use super::run::Run;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project. A duplicate name surfaces as
    /// [`DomainError::ProjectAlreadyExists`].
    async fn create(&self, project: &Project) -> Result<(), DomainError>;

    async fn get_by_name(&self, name: &str) -> Result<Option<Project>, DomainError>;

    async fn update_extra_data(&self, project: &Project) -> Result<(), DomainError>;

    /// Delete the project row; related records are removed by the store.
    async fn delete(&self, project_uuid: Uuid) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Persist a resource. Returns false, without error, when a resource
    /// with the same (project, path) already exists.
    async fn create(&self, resource: &CodebaseResource) -> Result<bool, DomainError>;

    async fn get_by_path(
        &self,
        project_uuid: Uuid,
        path: &str,
    ) -> Result<Option<CodebaseResource>, DomainError>;

    async fn list_for_project(
        &self,
        project_uuid: Uuid,
    ) -> Result<Vec<CodebaseResource>, DomainError>;

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError>;

    /// Bulk update: file resources with `scanned` status and no license
    /// detections become `no-licenses`. Returns the affected row count.
    async fn update_scanned_without_licenses(&self, project_uuid: Uuid)
        -> Result<u64, DomainError>;

    /// Bulk update: file resources with `scanned` status and an unknown
    /// license reference become `unknown-license`.
    async fn update_scanned_with_unknown_license(
        &self,
        project_uuid: Uuid,
    ) -> Result<u64, DomainError>;

    /// Bulk update: resources without any status get the given one.
    async fn update_no_status(
        &self,
        project_uuid: Uuid,
        status: ResourceStatus,
    ) -> Result<u64, DomainError>;

    /// Bulk update: file resources without any status get the given one.
    async fn update_files_without_status(
        &self,
        project_uuid: Uuid,
        status: ResourceStatus,
    ) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn create(&self, package: &DiscoveredPackage) -> Result<(), DomainError>;

    async fn get_by_identity(
        &self,
        project_uuid: Uuid,
        identity: &PackageIdentity,
    ) -> Result<Option<DiscoveredPackage>, DomainError>;

    async fn update(&self, package: &DiscoveredPackage) -> Result<(), DomainError>;

    async fn list_for_project(
        &self,
        project_uuid: Uuid,
    ) -> Result<Vec<DiscoveredPackage>, DomainError>;

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait RunRepository: Send + Sync {
    async fn create(&self, run: &Run) -> Result<(), DomainError>;

    async fn update(&self, run: &Run) -> Result<(), DomainError>;

    /// Runs for a project in creation order.
    async fn list_for_project(&self, project_uuid: Uuid) -> Result<Vec<Run>, DomainError>;

    /// The oldest run that was not started yet, if any.
    async fn next_not_started(&self, project_uuid: Uuid) -> Result<Option<Run>, DomainError>;

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait ProjectErrorRepository: Send + Sync {
    async fn create(&self, error: &ProjectError) -> Result<(), DomainError>;

    async fn list_for_project(&self, project_uuid: Uuid) -> Result<Vec<ProjectError>, DomainError>;

    async fn count_for_project(&self, project_uuid: Uuid) -> Result<u64, DomainError>;
}
