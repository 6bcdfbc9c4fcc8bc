use std::path::Path;

use anyhow::Result;
use colored::*;
use specflow_core::claude::find_claude_executable;
use specflow_core::setup::WorkflowSetup;

/// Run the full setup inside a temporary directory and verify the
/// produced layout, then check for the Claude Code CLI.
pub async fn execute(project: &Path) -> Result<()> {
    println!("{}", "Testing workflow setup".bold());
    println!();

    let mut failures = 0;

    let temp_dir = tempfile::tempdir()?;
    println!(
        "Running setup in temporary directory {}",
        temp_dir.path().display().to_string().dimmed()
    );

    let setup = WorkflowSetup::new(temp_dir.path());
    match setup.run_setup() {
        Ok(()) => report_ok("setup completed"),
        Err(e) => {
            report_fail(&format!("setup failed: {}", e));
            failures += 1;
        }
    }

    for subdir in ["commands", "specs", "templates", "steering", "bugs"] {
        if setup.claude_dir().join(subdir).is_dir() {
            report_ok(&format!(".claude/{subdir} created"));
        } else {
            report_fail(&format!(".claude/{subdir} is missing"));
            failures += 1;
        }
    }
    if setup.claude_dir().join("spec-config.json").is_file() {
        report_ok("spec-config.json created");
    } else {
        report_fail("spec-config.json is missing");
        failures += 1;
    }

    match find_claude_executable().await {
        Some(path) => report_ok(&format!("claude executable found at {}", path.display())),
        None => {
            report_fail("claude executable not found on PATH");
            failures += 1;
        }
    }

    let existing = WorkflowSetup::new(project);
    if existing.claude_directory_exists() {
        report_ok("project already has a .claude directory");
    } else {
        println!(
            "  {} project has no .claude directory yet (run `specflow setup`)",
            "i".blue()
        );
    }

    println!();
    if failures == 0 {
        println!(
            "{} {}",
            "✓".green().bold(),
            "All checks passed!".green().bold()
        );
        Ok(())
    } else {
        anyhow::bail!("{} check(s) failed", failures)
    }
}

fn report_ok(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

fn report_fail(message: &str) {
    println!("  {} {}", "✗".red(), message);
}
