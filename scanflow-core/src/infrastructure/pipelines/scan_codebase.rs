//! Codebase scan pipeline

use std::path::Path;

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::infrastructure::pipeline_registry::{Pipeline, PipelineContext, PipelineError};

/// Copies project inputs into the codebase directory, creates one resource
/// record per filesystem entry, then classifies resource statuses.
pub struct ScanCodebase;

fn copy_recursive(source: &Path, destination: &Path) -> Result<(), std::io::Error> {
    if source.is_dir() {
        std::fs::create_dir_all(destination)?;
        for entry in std::fs::read_dir(source)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &destination.join(entry.file_name()))?;
        }
    } else {
        std::fs::copy(source, destination)?;
    }
    Ok(())
}

#[async_trait]
impl Pipeline for ScanCodebase {
    fn name(&self) -> &'static str {
        "scan_codebase"
    }

    fn description(&self) -> &'static str {
        "Scan the project codebase and catalog its resources"
    }

    async fn run(&self, ctx: &PipelineContext) -> Result<(), PipelineError> {
        let project = &ctx.project;
        let codebase_path = project.codebase_path();

        // stage inputs into codebase/
        for entry in std::fs::read_dir(project.input_path())? {
            let entry = entry?;
            copy_recursive(&entry.path(), &codebase_path.join(entry.file_name()))?;
        }

        let mut created = 0usize;
        for entry in WalkDir::new(&codebase_path).min_depth(1) {
            let entry = entry.map_err(|e| {
                PipelineError::Io(e.into())
            })?;
            ctx.inventory
                .make_codebase_resource(project, entry.path(), None)
                .await?;
            created += 1;
        }
        tracing::info!(project = %project.name, resources = created, "codebase cataloged");

        ctx.inventory.mark_files_scanned(project).await?;
        ctx.inventory.analyze_scanned_files(project).await?;
        ctx.inventory.tag_not_analyzed(project).await?;

        Ok(())
    }
}
