//! Pipeline execution lifecycle

mod common;

use std::sync::Arc;

use serde_json::json;

use scanflow_core::domain::run::RunStatus;
use scanflow_core::infrastructure::{PipelineContext, PipelineRegistry, PipelineRunner};

use common::{package_data1, setup};

#[tokio::test]
async fn test_execute_load_inventory_success() {
    let ctx = setup().await;
    let project = ctx.projects.create_project("Analysis").await.unwrap();
    let registry = Arc::new(PipelineRegistry::with_builtins());
    let runner = PipelineRunner::new(registry.clone(), ctx.repos.runs.clone());

    let inventory_file = project.input_path().join("inventory.json");
    std::fs::write(
        &inventory_file,
        serde_json::to_string(&json!({"packages": [package_data1()]})).unwrap(),
    )
    .unwrap();

    let run = ctx
        .projects
        .add_pipeline(&project, &registry, "load_inventory")
        .await
        .unwrap();
    assert_eq!(RunStatus::NotStarted, run.status());

    let pipeline_ctx = PipelineContext {
        project: project.clone(),
        inventory: ctx.inventory.clone(),
    };
    let executed = runner.execute(&run, &pipeline_ctx).await.unwrap();

    assert_eq!(RunStatus::Success, executed.status());
    assert_eq!(Some(0), executed.task_exitcode);
    assert!(executed.task_id.is_some());
    assert!(executed.task_start_date.is_some());
    assert!(executed.task_end_date.is_some());
    assert!(executed.execution_time().is_some());

    // the run row was persisted with the task values
    let stored = &ctx.projects.project_runs(&project).await.unwrap()[0];
    assert_eq!(RunStatus::Success, stored.status());

    assert_eq!(1, ctx.repos.packages.count_for_project(project.uuid).await.unwrap());
}

#[tokio::test]
async fn test_execute_load_inventory_without_inputs_fails() {
    let ctx = setup().await;
    let project = ctx.projects.create_project("Analysis").await.unwrap();
    let registry = Arc::new(PipelineRegistry::with_builtins());
    let runner = PipelineRunner::new(registry.clone(), ctx.repos.runs.clone());

    let run = ctx
        .projects
        .add_pipeline(&project, &registry, "load_inventory")
        .await
        .unwrap();

    let pipeline_ctx = PipelineContext {
        project: project.clone(),
        inventory: ctx.inventory.clone(),
    };
    let executed = runner.execute(&run, &pipeline_ctx).await.unwrap();

    assert_eq!(RunStatus::Failure, executed.status());
    assert_eq!(Some(1), executed.task_exitcode);
    assert!(executed.log.contains("no inventory input file found"));
}

#[tokio::test]
async fn test_execute_scan_codebase_catalogs_resources() {
    let ctx = setup().await;
    let project = ctx.projects.create_project("Analysis").await.unwrap();
    let registry = Arc::new(PipelineRegistry::with_builtins());
    let runner = PipelineRunner::new(registry.clone(), ctx.repos.runs.clone());

    std::fs::write(project.input_path().join("main.c"), "int main() {}").unwrap();
    let subdir = project.input_path().join("docs");
    std::fs::create_dir_all(&subdir).unwrap();
    std::fs::write(subdir.join("README"), "docs").unwrap();

    let run = ctx
        .projects
        .add_pipeline(&project, &registry, "scan_codebase")
        .await
        .unwrap();
    let pipeline_ctx = PipelineContext {
        project: project.clone(),
        inventory: ctx.inventory.clone(),
    };
    let executed = runner.execute(&run, &pipeline_ctx).await.unwrap();
    assert_eq!(RunStatus::Success, executed.status());

    // main.c, docs/ and docs/README
    assert_eq!(3, ctx.repos.resources.count_for_project(project.uuid).await.unwrap());

    let resources = ctx.repos.resources.list_for_project(project.uuid).await.unwrap();
    for resource in &resources {
        // every resource was classified: scanned files have no license
        // detections, directories are not analyzed
        assert!(resource.status.is_some(), "unclassified: {}", resource.path);
    }
}

#[tokio::test]
async fn test_execute_unknown_pipeline_records_failure() {
    let ctx = setup().await;
    let project = ctx.projects.create_project("Analysis").await.unwrap();
    let registry = Arc::new(PipelineRegistry::with_builtins());
    let runner = PipelineRunner::new(registry.clone(), ctx.repos.runs.clone());

    let run = scanflow_core::domain::run::Run::new(project.uuid, "vanished", "");
    ctx.repos.runs.create(&run).await.unwrap();

    let pipeline_ctx = PipelineContext {
        project: project.clone(),
        inventory: ctx.inventory.clone(),
    };
    let executed = runner.execute(&run, &pipeline_ctx).await.unwrap();

    assert_eq!(RunStatus::Failure, executed.status());
    assert!(executed.log.contains("vanished is not a valid pipeline"));
}
