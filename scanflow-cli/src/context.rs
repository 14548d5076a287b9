//! CLI context - wires configuration, the database and the services

use std::sync::Arc;

use anyhow::{Context, Result};

use scanflow_core::application::{InventoryService, ProjectService};
use scanflow_core::domain::project::Project;
use scanflow_core::infrastructure::persistence::{Database, Repositories};
use scanflow_core::infrastructure::{
    LocalFileScanner, PipelineContext, PipelineRegistry, PipelineRunner,
};
use scanflow_core::{init_tracing, Config};

use crate::cli::Cli;
use crate::output::OutputWriter;

pub struct CliContext {
    pub repositories: Repositories,
    pub registry: Arc<PipelineRegistry>,
    pub inventory: Arc<InventoryService>,
    pub projects: ProjectService,
    pub runner: PipelineRunner,
    pub output: OutputWriter,
}

impl CliContext {
    pub async fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: configuration not loaded, using defaults: {}", e);
            Config::default()
        });

        init_tracing(&config.logging).context("Failed to initialize logging")?;
        tracing::debug!(data_dir = %config.data_dir().display(), "workspace initialized");

        let database = Database::connect(&config.database_path())
            .await
            .with_context(|| {
                format!(
                    "Failed to open the workspace database at {}",
                    config.database_path().display()
                )
            })?;
        let repositories = database.repositories();

        let registry = Arc::new(PipelineRegistry::with_builtins());
        let inventory = Arc::new(InventoryService::new(
            repositories.resources.clone(),
            repositories.packages.clone(),
            repositories.errors.clone(),
            Arc::new(LocalFileScanner),
        ));
        let projects = ProjectService::new(
            repositories.projects.clone(),
            repositories.resources.clone(),
            repositories.packages.clone(),
            repositories.runs.clone(),
            repositories.errors.clone(),
            config.projects_dir(),
        );
        let runner = PipelineRunner::new(registry.clone(), repositories.runs.clone());
        let output = OutputWriter::new(cli.no_color);

        Ok(Self {
            repositories,
            registry,
            inventory,
            projects,
            runner,
            output,
        })
    }

    /// Execution context for pipelines running against `project`.
    pub fn pipeline_context(&self, project: &Project) -> PipelineContext {
        PipelineContext {
            project: project.clone(),
            inventory: self.inventory.clone(),
        }
    }
}
