//! Project lifecycle use cases

mod service;

pub use service::{DeletionSummary, ProjectCounts, ProjectService};
