use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scanflow(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scanflow"));
    cmd.env("SCANFLOW_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    scanflow(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "scanflow manages analysis projects",
        ));
}

#[test]
fn test_cli_version() {
    let temp = TempDir::new().unwrap();
    scanflow(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scanflow"));
}

#[test]
fn test_create_project_base() {
    let temp = TempDir::new().unwrap();

    scanflow(&temp)
        .arg("create-project")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));

    scanflow(&temp)
        .args(["create-project", "my_project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project my_project created"));

    scanflow(&temp)
        .args(["create-project", "my_project"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Project with this Name already exists.",
        ));
}

#[test]
fn test_create_project_pipelines() {
    let temp = TempDir::new().unwrap();

    scanflow(&temp)
        .args(["create-project", "my_project", "--pipeline", "non-existing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("non-existing is not a valid pipeline"));

    scanflow(&temp)
        .args([
            "create-project",
            "my_project",
            "--pipeline",
            "scan_codebase",
            "--pipeline",
            "load_inventory",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project my_project created"));

    scanflow(&temp)
        .args(["show-pipeline", "--project", "my_project", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::eq(
            " [NOT_STARTED] scan_codebase\n [NOT_STARTED] load_inventory\n",
        ));
}

#[test]
fn test_create_project_inputs() {
    let temp = TempDir::new().unwrap();

    scanflow(&temp)
        .args(["create-project", "my_project", "--input-file", "non-existing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("non-existing not found or not a file"));

    let input = temp.path().join("notice.txt");
    std::fs::write(&input, "NOTICE").unwrap();

    scanflow(&temp)
        .args(["create-project", "my_project"])
        .arg("--input-file")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project my_project created"));
}

#[test]
fn test_create_project_execute_requires_pipelines() {
    let temp = TempDir::new().unwrap();

    scanflow(&temp)
        .args(["create-project", "my_project", "--execute"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "The --execute option requires one or more pipelines.",
        ));
}

#[test]
fn test_add_input_and_add_pipeline() {
    let temp = TempDir::new().unwrap();
    scanflow(&temp)
        .args(["create-project", "my_project"])
        .assert()
        .success();

    let input = temp.path().join("inventory.json");
    std::fs::write(&input, r#"{"packages": []}"#).unwrap();

    scanflow(&temp)
        .args(["add-input", "--project", "my_project"])
        .arg("--input-file")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "File(s) copied to the project inputs directory",
        ));

    scanflow(&temp)
        .args([
            "add-input",
            "--project",
            "my_project",
            "--input-file",
            "non-existing.py",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "non-existing.py not found or not a file",
        ));

    scanflow(&temp)
        .args(["add-pipeline", "--project", "my_project", "scan_codebase"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pipeline(s) added to the project"));

    scanflow(&temp)
        .args(["add-pipeline", "--project", "my_project", "non-existing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("non-existing is not a valid pipeline"));

    // unknown project name
    scanflow(&temp)
        .args(["add-pipeline", "--project", "nothing", "scan_codebase"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Project nothing does not exist"));
}

#[test]
fn test_execute_without_pipelines_fails() {
    let temp = TempDir::new().unwrap();
    scanflow(&temp)
        .args(["create-project", "my_project"])
        .assert()
        .success();

    scanflow(&temp)
        .args(["execute", "--project", "my_project"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No pipelines to run on project my_project",
        ));
}

#[test]
fn test_execute_failure_reports_log() {
    let temp = TempDir::new().unwrap();
    // load_inventory without any input file fails at execution time
    scanflow(&temp)
        .args([
            "create-project",
            "my_project",
            "--pipeline",
            "load_inventory",
        ])
        .assert()
        .success();

    scanflow(&temp)
        .args(["execute", "--project", "my_project", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Pipeline load_inventory run in progress...",
        ))
        .stderr(predicate::str::contains("Error during load_inventory execution:"))
        .stderr(predicate::str::contains("no inventory input file found"));

    scanflow(&temp)
        .args(["show-pipeline", "--project", "my_project", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::eq(" [FAILURE] load_inventory\n"));
}

#[test]
fn test_full_inventory_flow() {
    let temp = TempDir::new().unwrap();

    let inventory = temp.path().join("inventory.json");
    std::fs::write(
        &inventory,
        r#"{"packages": [{
            "type": "deb",
            "namespace": "debian",
            "name": "adduser",
            "version": "3.118",
            "qualifiers": "arch=all",
            "description": "add and remove users and groups"
        }]}"#,
    )
    .unwrap();

    scanflow(&temp)
        .args([
            "create-project",
            "my_project",
            "--pipeline",
            "load_inventory",
            "--execute",
            "--no-color",
        ])
        .arg("--input-file")
        .arg(&inventory)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project my_project created"))
        .stdout(predicate::str::contains(
            "Pipeline load_inventory run in progress...",
        ))
        .stdout(predicate::str::contains(
            "load_inventory successfully executed on project my_project",
        ));

    scanflow(&temp)
        .args(["status", "--project", "my_project", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: my_project"))
        .stdout(predicate::str::contains("- CodebaseResource: 0"))
        .stdout(predicate::str::contains("- DiscoveredPackage: 1"))
        .stdout(predicate::str::contains("- ProjectError: 0"))
        .stdout(predicate::str::contains("[SUCCESS] load_inventory"))
        .stdout(predicate::str::contains("executed in"));
}

#[test]
fn test_status_not_started() {
    let temp = TempDir::new().unwrap();
    scanflow(&temp)
        .args([
            "create-project",
            "my_project",
            "--pipeline",
            "scan_codebase",
        ])
        .assert()
        .success();

    scanflow(&temp)
        .args(["status", "--project", "my_project", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[NOT_STARTED] scan_codebase"));
}

#[test]
fn test_output_formats() {
    let temp = TempDir::new().unwrap();
    scanflow(&temp)
        .args(["create-project", "my_project"])
        .assert()
        .success();

    scanflow(&temp)
        .args(["output", "--project", "my_project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("results-"))
        .stdout(predicate::str::contains(".json"));

    scanflow(&temp)
        .args(["output", "--project", "my_project", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("package-"))
        .stdout(predicate::str::contains("resource-"));

    // invalid format fails at argument parsing, before the data layer
    scanflow(&temp)
        .args(["output", "--project", "my_project", "--format", "WRONG"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'WRONG'"));
}

#[test]
fn test_delete_project() {
    let temp = TempDir::new().unwrap();
    scanflow(&temp)
        .args(["create-project", "my_project"])
        .assert()
        .success();

    scanflow(&temp)
        .args(["delete-project", "--project", "my_project", "--no-input"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "All the my_project project data have been removed.",
        ));

    scanflow(&temp)
        .args(["status", "--project", "my_project"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Project my_project does not exist"));
}
