//! Common test utilities for scanflow-core

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use scanflow_core::application::{InventoryService, ProjectService};
use scanflow_core::infrastructure::persistence::{Database, Repositories};
use scanflow_core::infrastructure::LocalFileScanner;

pub struct TestContext {
    pub repos: Repositories,
    pub inventory: Arc<InventoryService>,
    pub projects: ProjectService,
    pub projects_dir: PathBuf,
    // keep the workspace alive for the duration of the test
    pub _temp: TempDir,
}

pub async fn setup() -> TestContext {
    let temp = TempDir::new().unwrap();
    let projects_dir = temp.path().join("projects");

    let database = Database::connect_in_memory().await.unwrap();
    let repos = database.repositories();

    let inventory = Arc::new(InventoryService::new(
        repos.resources.clone(),
        repos.packages.clone(),
        repos.errors.clone(),
        Arc::new(LocalFileScanner),
    ));
    let projects = ProjectService::new(
        repos.projects.clone(),
        repos.resources.clone(),
        repos.packages.clone(),
        repos.runs.clone(),
        repos.errors.clone(),
        projects_dir.clone(),
    );

    TestContext {
        repos,
        inventory,
        projects,
        projects_dir,
        _temp: temp,
    }
}

/// A realistic package mapping, Debian adduser.
pub fn package_data1() -> serde_json::Value {
    json!({
        "type": "deb",
        "namespace": "debian",
        "name": "adduser",
        "version": "3.118",
        "qualifiers": "arch=all",
        "description": "add and remove users and groups",
        "size": 849,
        "license_expression": "gpl-2.0 AND gpl-2.0-plus AND unknown",
        "non_package_field": "dropped",
    })
}
