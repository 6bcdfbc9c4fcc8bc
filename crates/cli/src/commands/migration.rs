use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use specflow_core::migration::MigrationManager;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Summary,
    Json,
    Yaml,
}

pub fn execute(project: &Path, format: OutputFormat) -> Result<()> {
    let manager = MigrationManager::new(project);
    let summary = manager.migration_summary();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&summary)?),
        OutputFormat::Summary => {
            println!("{}", "Migration info".bold().underline());
            println!(
                "Existing .claude directory: {}",
                yes_no(summary.has_existing_claude)
            );
            println!(
                "Legacy Node.js installation: {}",
                yes_no(summary.has_node_installation)
            );
            println!(
                "Compatible with this version: {}",
                yes_no(summary.is_compatible)
            );

            if !summary.issues.is_empty() {
                println!();
                println!("{}", "Issues".bold());
                for issue in &summary.issues {
                    println!("  - {}", issue.yellow());
                }
            }

            println!();
            println!("{} ({})", "Specs".bold(), summary.existing_specs.len());
            for spec in &summary.existing_specs {
                println!("  {} [{}]", spec.name.cyan(), spec.phase.dimmed());
            }

            println!();
            println!("{} ({})", "Bugs".bold(), summary.existing_bugs.len());
            for bug in &summary.existing_bugs {
                println!("  {} [{}]", bug.name.cyan(), bug.phase.dimmed());
            }
        }
    }

    Ok(())
}

fn yes_no(value: bool) -> ColoredString {
    if value {
        "yes".green()
    } else {
        "no".dimmed()
    }
}
