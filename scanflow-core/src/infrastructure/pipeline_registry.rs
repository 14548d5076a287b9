//! Pipeline trait and explicit registry
//!
//! The registry is a plain value owned by the caller and passed to commands,
//! never ambient global state.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::application::inventory::InventoryService;
use crate::domain::error::DomainError;
use crate::domain::project::Project;

/// Errors raised by pipeline execution
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no inventory input file found under {0}")]
    MissingInventoryInput(String),

    #[error("invalid inventory file {path}: {message}")]
    InvalidInventory { path: String, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a pipeline needs to operate on one project.
pub struct PipelineContext {
    pub project: Project,
    pub inventory: Arc<InventoryService>,
}

/// One named unit of work runnable against a project.
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn name(&self) -> &'static str;

    /// One-line description, recorded on the run when the pipeline is
    /// attached to a project.
    fn description(&self) -> &'static str;

    async fn run(&self, ctx: &PipelineContext) -> Result<(), PipelineError>;
}

/// Registry of available pipelines
pub struct PipelineRegistry {
    pipelines: HashMap<&'static str, Arc<dyn Pipeline>>,
}

impl PipelineRegistry {
    pub fn new() -> Self {
        Self {
            pipelines: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in pipelines.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::pipelines::ScanCodebase));
        registry.register(Arc::new(super::pipelines::LoadInventory));
        registry
    }

    pub fn register(&mut self, pipeline: Arc<dyn Pipeline>) {
        self.pipelines.insert(pipeline.name(), pipeline);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Pipeline>> {
        self.pipelines.get(name).cloned()
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.pipelines.contains_key(name)
    }

    /// Registered pipeline names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.pipelines.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for PipelineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = PipelineRegistry::with_builtins();
        assert!(registry.is_valid("scan_codebase"));
        assert!(registry.is_valid("load_inventory"));
        assert!(!registry.is_valid("non-existing"));
        assert_eq!(vec!["load_inventory", "scan_codebase"], registry.names());
    }

    #[test]
    fn test_get_returns_registered_pipeline() {
        let registry = PipelineRegistry::with_builtins();
        let pipeline = registry.get("scan_codebase").unwrap();
        assert_eq!("scan_codebase", pipeline.name());
        assert!(!pipeline.description().is_empty());
    }
}
