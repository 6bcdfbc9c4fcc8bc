use assert_cmd::Command;
use predicates::prelude::*;

fn specflow() -> Command {
    Command::cargo_bin("specflow").unwrap()
}

#[test]
fn help_lists_subcommands() {
    specflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("auto-run-tasks"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn setup_installs_workflow() {
    let temp_dir = tempfile::tempdir().unwrap();

    specflow()
        .args(["setup", "--yes", "--project"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow installed successfully"));

    let claude_dir = temp_dir.path().join(".claude");
    assert!(claude_dir.join("commands").join("spec-create.md").is_file());
    assert!(claude_dir
        .join("templates")
        .join("requirements-template.md")
        .is_file());
    assert!(claude_dir.join("spec-config.json").is_file());
}

#[test]
fn setup_refuses_existing_without_force() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp_dir.path().join(".claude")).unwrap();

    specflow()
        .args(["setup", "--yes", "--project"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn migration_info_emits_json() {
    let temp_dir = tempfile::tempdir().unwrap();

    let output = specflow()
        .args(["migration-info", "--format", "json", "--project"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(summary["has_existing_claude"], false);
    assert!(summary["existing_specs"].as_array().unwrap().is_empty());
}

#[test]
fn generate_task_commands_requires_tasks_md() {
    let temp_dir = tempfile::tempdir().unwrap();

    specflow()
        .args(["generate-task-commands", "missing-spec", "--project"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tasks.md found"));
}

#[test]
fn generate_task_commands_writes_command_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let spec_dir = temp_dir
        .path()
        .join(".claude")
        .join("specs")
        .join("user-auth");
    std::fs::create_dir_all(&spec_dir).unwrap();
    std::fs::write(
        spec_dir.join("tasks.md"),
        "# Tasks\n\n- [ ] 1. Create the user model\n- [ ] 2. Add login endpoint\n",
    )
    .unwrap();

    specflow()
        .args(["generate-task-commands", "user-auth", "--project"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 task command(s)"));

    let commands_dir = temp_dir
        .path()
        .join(".claude")
        .join("commands")
        .join("user-auth");
    assert!(commands_dir.join("task-1.md").is_file());
    assert!(commands_dir.join("task-2.md").is_file());
}

#[test]
fn auto_run_rejects_invalid_mode() {
    let temp_dir = tempfile::tempdir().unwrap();

    specflow()
        .args(["auto-run-tasks", "user-auth", "--mode", "turbo", "--project"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --mode"));
}
