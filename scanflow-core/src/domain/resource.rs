//! Codebase resource entity and status vocabulary

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::project::Project;

/// Filesystem entry kind for a codebase resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    File,
    Directory,
    Symlink,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Symlink => write!(f, "symlink"),
        }
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "directory" => Ok(Self::Directory),
            "symlink" => Ok(Self::Symlink),
            other => Err(format!("unknown resource type: {other}")),
        }
    }
}

/// Fixed status vocabulary for codebase resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceStatus {
    NotAnalyzed,
    Scanned,
    ScannedWithError,
    NoLicenses,
    UnknownLicense,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAnalyzed => "not-analyzed",
            Self::Scanned => "scanned",
            Self::ScannedWithError => "scanned-with-error",
            Self::NoLicenses => "no-licenses",
            Self::UnknownLicense => "unknown-license",
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-analyzed" => Ok(Self::NotAnalyzed),
            "scanned" => Ok(Self::Scanned),
            "scanned-with-error" => Ok(Self::ScannedWithError),
            "no-licenses" => Ok(Self::NoLicenses),
            "unknown-license" => Ok(Self::UnknownLicense),
            other => Err(format!("unknown resource status: {other}")),
        }
    }
}

/// One file or directory entry under a project's codebase root.
///
/// `path` is stored relative to the codebase directory, POSIX separators,
/// no leading slash. A resource path is unique within its project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodebaseResource {
    pub uuid: Uuid,
    pub project_uuid: Uuid,
    pub path: String,
    /// Optional path relative to a rootfs root within an image or VM
    /// filesystem context, e.g. "/var/log/file.log".
    pub rootfs_path: String,
    pub status: Option<ResourceStatus>,
    pub resource_type: Option<ResourceType>,
    pub name: String,
    pub extension: String,
    pub size: Option<i64>,
    pub mime_type: String,
    pub file_type: String,
    /// License detections, as produced by the scanner.
    pub licenses: Value,
    pub license_expressions: Vec<String>,
}

impl CodebaseResource {
    pub fn new(project_uuid: Uuid, path: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            project_uuid,
            path: path.to_string(),
            rootfs_path: String::new(),
            status: None,
            resource_type: None,
            name: String::new(),
            extension: String::new(),
            size: None,
            mime_type: String::new(),
            file_type: String::new(),
            licenses: Value::Array(Vec::new()),
            license_expressions: Vec::new(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.resource_type == Some(ResourceType::File)
    }

    pub fn is_dir(&self) -> bool {
        self.resource_type == Some(ResourceType::Directory)
    }

    pub fn is_symlink(&self) -> bool {
        self.resource_type == Some(ResourceType::Symlink)
    }

    /// Absolute location of this resource under the project codebase root.
    pub fn location(&self, project: &Project) -> PathBuf {
        project.codebase_path().join(self.path.trim_start_matches('/'))
    }

    pub fn has_licenses(&self) -> bool {
        self.licenses.as_array().is_some_and(|detections| !detections.is_empty())
    }

    /// Whether any license expression references an unknown license.
    pub fn has_unknown_license(&self) -> bool {
        self.license_expressions
            .iter()
            .any(|expression| expression.contains("unknown"))
    }

    /// Sorted, deduplicated license expressions.
    pub fn unique_license_expressions(&self) -> Vec<String> {
        let mut expressions = self.license_expressions.clone();
        expressions.sort();
        expressions.dedup();
        expressions
    }
}
