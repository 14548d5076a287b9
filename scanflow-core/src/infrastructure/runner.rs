//! Pipeline run executor
//!
//! Runs one pipeline to completion and records the task lifecycle on the
//! run row. This is the seam where an asynchronous task queue would attach;
//! the CLI executes synchronously, one run at a time.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repositories::RunRepository;
use crate::domain::run::Run;

use super::pipeline_registry::{PipelineContext, PipelineRegistry};

pub struct PipelineRunner {
    registry: Arc<PipelineRegistry>,
    runs: Arc<dyn RunRepository>,
}

impl PipelineRunner {
    pub fn new(registry: Arc<PipelineRegistry>, runs: Arc<dyn RunRepository>) -> Self {
        Self { registry, runs }
    }

    /// Execute a run: stamp the task start, run the pipeline, stamp the
    /// exit code and log. Returns the updated run.
    pub async fn execute(&self, run: &Run, ctx: &PipelineContext) -> Result<Run, DomainError> {
        let mut run = run.clone();

        run.set_task_started(Uuid::new_v4());
        self.runs.update(&run).await?;
        tracing::info!(
            pipeline = %run.pipeline_name,
            project = %ctx.project.name,
            task_id = %run.task_id.unwrap_or_default(),
            "pipeline execution started"
        );

        let outcome = match self.registry.get(&run.pipeline_name) {
            Some(pipeline) => pipeline.run(ctx).await,
            None => Err(DomainError::UnknownPipeline {
                name: run.pipeline_name.clone(),
            }
            .into()),
        };

        match outcome {
            Ok(()) => {
                run.set_task_ended(0, "");
                tracing::info!(pipeline = %run.pipeline_name, "pipeline execution succeeded");
            }
            Err(e) => {
                run.set_task_ended(1, &e.to_string());
                tracing::error!(pipeline = %run.pipeline_name, error = %e, "pipeline execution failed");
            }
        }
        self.runs.update(&run).await?;

        Ok(run)
    }
}
