use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use colored::*;
use specflow_core::claude::validate_claude_code;
use specflow_core::migration::MigrationManager;
use specflow_core::project::detect_project_types;
use specflow_core::setup::WorkflowSetup;

pub async fn execute(project: &Path, force: bool, yes: bool) -> Result<()> {
    let project = project
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Invalid project path {}: {}", project.display(), e))?;

    println!(
        "{} {}",
        "Setting up spec-driven workflow in".bold(),
        project.display().to_string().cyan()
    );

    if let Ok(types) = detect_project_types(&project) {
        if !types.is_empty() {
            println!("Detected project types: {}", types.join(", ").dimmed());
        }
    }

    if !validate_claude_code().await {
        println!(
            "{}",
            "Warning: claude executable not found. The workflow commands need Claude Code installed."
                .yellow()
        );
    }

    let setup = WorkflowSetup::new(&project);
    if setup.claude_directory_exists() {
        if !force {
            bail!(
                ".claude directory already exists at {}. Use --force to overwrite.",
                setup.claude_dir().display()
            );
        }

        let migration = MigrationManager::new(&project);
        let (compatible, issues) = migration.validate_compatibility();
        if !compatible {
            println!("{}", "Existing installation has issues:".yellow());
            for issue in &issues {
                println!("  - {}", issue.yellow());
            }
        }

        if let Some(backup) = migration.backup_existing_data(".backup")? {
            println!(
                "Backed up existing .claude directory to {}",
                backup.display().to_string().dimmed()
            );
        }
    }

    if !yes && !confirm("Proceed with setup?")? {
        println!("{}", "Setup cancelled".yellow());
        return Ok(());
    }

    setup
        .run_setup()
        .map_err(|e| anyhow::anyhow!("Setup failed: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        "Workflow installed successfully!".green().bold()
    );
    println!();
    println!("Next steps:");
    println!("  1. Run {} in Claude Code", "/spec-steering-setup".cyan());
    println!(
        "  2. Create your first spec with {}",
        "/spec-create <feature-name>".cyan()
    );

    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N]: ", question);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
