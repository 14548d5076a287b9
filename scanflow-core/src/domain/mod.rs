//! Domain layer - entities, value objects and repository traits
//!
//! Projects own a work directory tree and a set of pipeline runs; codebase
//! resources and discovered packages are the inventory records produced by
//! those runs.

pub mod error;
pub mod package;
pub mod project;
pub mod repositories;
pub mod resource;
pub mod run;

pub use error::{DomainError, ProjectError};
pub use package::{DiscoveredPackage, PackageIdentity, KNOWN_PACKAGE_FIELDS};
pub use project::Project;
pub use repositories::{
    PackageRepository, ProjectErrorRepository, ProjectRepository, ResourceRepository,
    RunRepository,
};
pub use resource::{CodebaseResource, ResourceStatus, ResourceType};
pub use run::{Run, RunStatus};
