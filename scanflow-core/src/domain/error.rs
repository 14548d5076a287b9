//! Domain errors and per-project error records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by domain operations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Project with this Name already exists.")]
    ProjectAlreadyExists,

    #[error("Project {name} does not exist")]
    ProjectNotFound { name: String },

    #[error("Project name must not be empty")]
    EmptyProjectName,

    #[error("Location: {location} is not under the project codebase/ directory: {codebase_dir}")]
    ResourceOutsideCodebase {
        location: String,
        codebase_dir: String,
    },

    #[error("Package without any Package URL fields")]
    MissingPackageIdentity,

    #[error("Log messages must not span multiple lines")]
    MultilineLogMessage,

    #[error("Extra data must be a JSON object")]
    ExtraDataNotAnObject,

    #[error("{name} is not a valid pipeline")]
    UnknownPipeline { name: String },

    #[error("{path} not found or not a file")]
    InputFileNotFound { path: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// A recorded failure scoped to a project.
///
/// Ingestion failures (a package without a Package URL, a resource that
/// cannot be saved) are stored here instead of aborting the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectError {
    pub project_uuid: Uuid,
    pub model: String,
    pub details: Value,
    pub message: String,
    pub traceback: String,
    pub created_date: DateTime<Utc>,
}

impl ProjectError {
    pub fn new(project_uuid: Uuid, model: &str, message: &str, details: Value) -> Self {
        Self {
            project_uuid,
            model: model.to_string(),
            details,
            message: message.to_string(),
            traceback: String::new(),
            created_date: Utc::now(),
        }
    }
}
