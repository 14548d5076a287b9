//! Project lifecycle: creation, inputs, pipelines, deletion

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::project::Project;
use crate::domain::repositories::{
    PackageRepository, ProjectErrorRepository, ProjectRepository, ResourceRepository,
    RunRepository,
};
use crate::domain::run::Run;
use crate::infrastructure::pipeline_registry::PipelineRegistry;

/// Per-entity record counts for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectCounts {
    pub resources: u64,
    pub packages: u64,
    pub errors: u64,
}

/// What a project deletion removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionSummary {
    pub projects: u64,
    pub resources: u64,
    pub packages: u64,
    pub runs: u64,
    pub errors: u64,
}

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    resources: Arc<dyn ResourceRepository>,
    packages: Arc<dyn PackageRepository>,
    runs: Arc<dyn RunRepository>,
    errors: Arc<dyn ProjectErrorRepository>,
    projects_dir: PathBuf,
}

impl ProjectService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        resources: Arc<dyn ResourceRepository>,
        packages: Arc<dyn PackageRepository>,
        runs: Arc<dyn RunRepository>,
        errors: Arc<dyn ProjectErrorRepository>,
        projects_dir: PathBuf,
    ) -> Self {
        Self {
            projects,
            resources,
            packages,
            runs,
            errors,
            projects_dir,
        }
    }

    /// Create a project record and its work directory tree.
    pub async fn create_project(&self, name: &str) -> Result<Project, DomainError> {
        let project = Project::new(name, &self.projects_dir)?;
        self.projects.create(&project).await?;
        project.setup_work_directory()?;
        tracing::info!(project = %project.name, work_directory = %project.work_path().display(), "project created");
        Ok(project)
    }

    /// Fetch a project by name or fail with a not-found error.
    pub async fn get_project(&self, name: &str) -> Result<Project, DomainError> {
        self.projects
            .get_by_name(name)
            .await?
            .ok_or_else(|| DomainError::ProjectNotFound {
                name: name.to_string(),
            })
    }

    /// Check that every given input path exists and is a file.
    pub fn validate_input_files(&self, files: &[PathBuf]) -> Result<(), DomainError> {
        for file in files {
            if !file.is_file() {
                return Err(DomainError::InputFileNotFound {
                    path: file.display().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Copy the given files into the project inputs directory.
    pub fn add_input_files(&self, project: &Project, files: &[PathBuf]) -> Result<(), DomainError> {
        self.validate_input_files(files)?;
        for file in files {
            project.copy_input_from(file)?;
        }
        Ok(())
    }

    /// Check that every pipeline name is registered.
    pub fn validate_pipelines(
        &self,
        registry: &PipelineRegistry,
        names: &[String],
    ) -> Result<(), DomainError> {
        for name in names {
            if !registry.is_valid(name) {
                return Err(DomainError::UnknownPipeline { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Attach a pipeline to the project as a new not-started run.
    pub async fn add_pipeline(
        &self,
        project: &Project,
        registry: &PipelineRegistry,
        name: &str,
    ) -> Result<Run, DomainError> {
        let pipeline = registry
            .get(name)
            .ok_or_else(|| DomainError::UnknownPipeline {
                name: name.to_string(),
            })?;
        let run = Run::new(project.uuid, pipeline.name(), pipeline.description());
        self.runs.create(&run).await?;
        Ok(run)
    }

    /// Runs attached to the project, in creation order.
    pub async fn project_runs(&self, project: &Project) -> Result<Vec<Run>, DomainError> {
        self.runs.list_for_project(project.uuid).await
    }

    /// The oldest run not started yet, if any.
    pub async fn next_run(&self, project: &Project) -> Result<Option<Run>, DomainError> {
        self.runs.next_not_started(project.uuid).await
    }

    /// Per-entity record counts, as shown by the status command.
    pub async fn counts(&self, project: &Project) -> Result<ProjectCounts, DomainError> {
        Ok(ProjectCounts {
            resources: self.resources.count_for_project(project.uuid).await?,
            packages: self.packages.count_for_project(project.uuid).await?,
            errors: self.errors.count_for_project(project.uuid).await?,
        })
    }

    /// Persist merged extra data on the project record.
    pub async fn save_extra_data(&self, project: &Project) -> Result<(), DomainError> {
        self.projects.update_extra_data(project).await
    }

    /// Remove the project records and its work directory tree.
    pub async fn delete_project(&self, project: &Project) -> Result<DeletionSummary, DomainError> {
        let summary = DeletionSummary {
            projects: 1,
            resources: self.resources.count_for_project(project.uuid).await?,
            packages: self.packages.count_for_project(project.uuid).await?,
            runs: self.runs.count_for_project(project.uuid).await?,
            errors: self.errors.count_for_project(project.uuid).await?,
        };

        self.projects.delete(project.uuid).await?;
        if project.work_path().exists() {
            std::fs::remove_dir_all(project.work_path())?;
        }
        tracing::info!(project = %project.name, "project deleted");
        Ok(summary)
    }

    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }
}
