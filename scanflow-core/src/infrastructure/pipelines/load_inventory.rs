//! Inventory load pipeline

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error::DomainError;
use crate::infrastructure::pipeline_registry::{Pipeline, PipelineContext, PipelineError};

/// Reads JSON inventory files from the project inputs and upserts every
/// package mapping they contain.
///
/// Accepted shapes: `{"packages": [...]}` or a top-level array.
pub struct LoadInventory;

fn packages_from_document(document: &Value) -> Option<&Vec<Value>> {
    match document {
        Value::Array(packages) => Some(packages),
        Value::Object(map) => map.get("packages").and_then(Value::as_array),
        _ => None,
    }
}

#[async_trait]
impl Pipeline for LoadInventory {
    fn name(&self) -> &'static str {
        "load_inventory"
    }

    fn description(&self) -> &'static str {
        "Load package inventory from JSON input files"
    }

    async fn run(&self, ctx: &PipelineContext) -> Result<(), PipelineError> {
        let project = &ctx.project;

        let mut inventory_files: Vec<_> = project
            .inputs()
            .into_iter()
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|extension| extension == "json")
            })
            .collect();
        inventory_files.sort();

        if inventory_files.is_empty() {
            return Err(PipelineError::MissingInventoryInput(
                project.input_path().display().to_string(),
            ));
        }

        for path in inventory_files {
            let content = std::fs::read_to_string(&path)?;
            let document: Value =
                serde_json::from_str(&content).map_err(|e| PipelineError::InvalidInventory {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;

            let packages =
                packages_from_document(&document).ok_or_else(|| PipelineError::InvalidInventory {
                    path: path.display().to_string(),
                    message: "expected a \"packages\" list".to_string(),
                })?;

            let mut loaded = 0usize;
            for package_data in packages {
                match ctx
                    .inventory
                    .update_or_create_package(project, package_data.clone())
                    .await
                {
                    Ok(_) => loaded += 1,
                    // recorded as a project error, the rest of the file still loads
                    Err(DomainError::MissingPackageIdentity) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            tracing::info!(
                project = %project.name,
                file = %path.display(),
                packages = loaded,
                "inventory loaded"
            );
        }

        Ok(())
    }
}
