use std::path::Path;

use anyhow::{bail, Result};
use colored::*;
use specflow_core::tasks::{generate_task_command, parse_tasks_from_markdown};

/// Generate one slash command per pending task in a spec's tasks.md
pub fn execute(project: &Path, spec_name: &str) -> Result<()> {
    let spec_dir = project.join(".claude").join("specs").join(spec_name);
    let tasks_file = spec_dir.join("tasks.md");
    if !tasks_file.is_file() {
        bail!(
            "No tasks.md found for spec '{}' at {}",
            spec_name,
            tasks_file.display()
        );
    }

    let content = std::fs::read_to_string(&tasks_file)?;
    let tasks = parse_tasks_from_markdown(&content);
    if tasks.is_empty() {
        println!(
            "{}",
            format!("No pending tasks found in {}", tasks_file.display()).yellow()
        );
        return Ok(());
    }

    let commands_dir = project.join(".claude").join("commands").join(spec_name);
    std::fs::create_dir_all(&commands_dir)?;

    for task in &tasks {
        generate_task_command(&commands_dir, spec_name, task)
            .map_err(|e| anyhow::anyhow!("Failed to generate command for task {}: {}", task.id, e))?;
        println!(
            "  {} /{}-task-{}",
            "✓".green(),
            spec_name.cyan(),
            task.id.cyan()
        );
    }

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        format!("Generated {} task command(s)", tasks.len())
            .green()
            .bold()
    );
    println!(
        "{}",
        "Restart Claude Code for the new commands to appear.".dimmed()
    );

    Ok(())
}
