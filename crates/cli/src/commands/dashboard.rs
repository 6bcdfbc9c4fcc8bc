use std::path::Path;

use anyhow::Result;
use colored::*;
use specflow_core::dashboard::{DashboardWatcher, SpecParser, SpecPhase, SpecStatus};
use specflow_core::git::GitUtils;

pub async fn execute(project: &Path, once: bool) -> Result<()> {
    let parser = SpecParser::new(project);
    let git_info = GitUtils::new(project).get_git_info().await;

    render_git_line(&git_info);
    render(&parser)?;

    if once {
        return Ok(());
    }

    let mut rx = DashboardWatcher::watch(project)
        .map_err(|e| anyhow::anyhow!("Failed to start file watcher: {}", e))?;
    println!();
    println!("{}", "Watching for changes (Ctrl-C to exit)...".dimmed());

    loop {
        tokio::select! {
            event = rx.recv() => {
                if event.is_none() {
                    return Ok(());
                }
                // Clear the screen before re-rendering
                print!("\x1b[2J\x1b[H");
                render_git_line(&GitUtils::new(project).get_git_info().await);
                render(&parser)?;
                println!();
                println!("{}", "Watching for changes (Ctrl-C to exit)...".dimmed());
            }
            _ = tokio::signal::ctrl_c() => {
                return Ok(());
            }
        }
    }
}

fn render_git_line(git_info: &specflow_core::git::GitInfo) {
    if let Some(branch) = &git_info.branch {
        let mut line = format!("Branch: {}", branch.cyan());
        if let Some(commit) = &git_info.head_commit {
            line.push_str(&format!(" @ {}", commit.dimmed()));
        }
        if let Some(url) = &git_info.github_url {
            line.push_str(&format!("  ({})", url.dimmed()));
        }
        println!("{}", line);
        println!();
    }
}

fn render(parser: &SpecParser) -> Result<()> {
    println!("{}", "Spec Dashboard".bold().underline());
    println!();

    let steering = parser.steering_status();
    if steering.exists {
        let mut present = Vec::new();
        let mut missing = Vec::new();
        for (name, has) in [
            ("product", steering.has_product),
            ("tech", steering.has_tech),
            ("structure", steering.has_structure),
        ] {
            if has {
                present.push(name);
            } else {
                missing.push(name);
            }
        }
        print!("Steering: {}", present.join(", ").green());
        if !missing.is_empty() {
            print!("  missing: {}", missing.join(", ").yellow());
        }
        println!();
    } else {
        println!(
            "Steering: {} (run {})",
            "not set up".yellow(),
            "/spec-steering-setup".cyan()
        );
    }
    println!();

    let specs = parser
        .get_all_specs()
        .map_err(|e| anyhow::anyhow!("Failed to read specs: {}", e))?;
    if specs.is_empty() {
        println!(
            "  {} (create one with {})",
            "No specs found".dimmed(),
            "/spec-create <feature-name>".cyan()
        );
        return Ok(());
    }

    for spec in &specs {
        render_spec(spec);
    }

    Ok(())
}

fn render_spec(spec: &SpecStatus) {
    let phase_label = format!("[{}]", spec.phase);
    let phase_colored = match spec.phase {
        SpecPhase::Completed => phase_label.green(),
        SpecPhase::InProgress => phase_label.cyan(),
        SpecPhase::NotStarted => phase_label.dimmed(),
        _ => phase_label.yellow(),
    };
    println!("{} {}", spec.display_name.blue().bold(), phase_colored);

    if let Some(requirements) = &spec.requirements {
        println!(
            "  requirements: {} user stories{}",
            requirements.user_stories,
            approval_suffix(requirements.approved)
        );
    }
    if let Some(design) = &spec.design {
        println!("  design: present{}", approval_suffix(design.approved));
    }
    if let Some(tasks) = &spec.tasks {
        println!(
            "  tasks: {}/{} complete {}",
            tasks.completed,
            tasks.total,
            progress_bar(tasks.completed, tasks.total)
        );
        if let Some(current) = &tasks.in_progress {
            println!("  current task: {}", current.cyan());
        }
    }
    if let Some(modified) = spec.last_modified {
        println!(
            "  {}",
            format!("last modified {}", modified.format("%Y-%m-%d %H:%M UTC")).dimmed()
        );
    }
    println!();
}

fn approval_suffix(approved: bool) -> ColoredString {
    if approved {
        " (approved)".green()
    } else {
        " (awaiting approval)".yellow()
    }
}

fn progress_bar(completed: usize, total: usize) -> String {
    const WIDTH: usize = 20;
    if total == 0 {
        return String::new();
    }
    let filled = completed * WIDTH / total;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(WIDTH - filled)
    )
}
