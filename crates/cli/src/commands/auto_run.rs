use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};
use colored::*;
use specflow_core::claude::find_claude_executable;
use specflow_core::runner::{AutoRunOptions, AutoRunResult, AutoRunner, ExecutionMode};

pub struct AutoRunArgs {
    pub project: PathBuf,
    pub spec_name: String,
    pub mode: String,
    pub tasks: String,
    pub continue_on_error: bool,
    pub resume_from: Option<String>,
    pub no_progress: bool,
}

pub async fn execute(args: AutoRunArgs) -> Result<()> {
    let execution_mode = ExecutionMode::from_str(&args.mode)
        .map_err(|e| anyhow::anyhow!("Invalid --mode: {}", e))?;

    let Some(claude_executable) = find_claude_executable().await else {
        bail!("claude executable not found on PATH. Install Claude Code first.");
    };

    let runner = AutoRunner::new(&args.project, claude_executable);
    let options = AutoRunOptions {
        execution_mode,
        task_selection: args.tasks.clone(),
        continue_on_error: args.continue_on_error,
        show_detailed_progress: !args.no_progress,
        resume_from_task: args.resume_from.clone(),
    };

    // Offer to pick up where an interrupted run left off
    let saved_state = if args.resume_from.is_none() {
        runner
            .check_for_resumable_execution(&args.spec_name)
            .filter(|state| {
                println!(
                    "{}",
                    format!(
                        "Found interrupted execution from {} ({:.0}% complete)",
                        state.last_updated.format("%Y-%m-%d %H:%M UTC"),
                        state.completion_rate() * 100.0
                    )
                    .yellow()
                );
                prompt_resume().unwrap_or(false)
            })
    } else {
        None
    };

    let spec_name = args.spec_name.clone();
    let run = async {
        if let Some(state) = saved_state {
            runner.resume_from_saved_state(state).await
        } else if let Some(task_id) = &args.resume_from {
            runner.resume_from_task(&spec_name, task_id, options).await
        } else {
            runner.run_all_tasks(&spec_name, options).await
        }
    };

    let result = tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("{}", "Interrupted. Saving execution state...".yellow());
            runner
                .mark_interrupted(&args.spec_name, "interrupted by user (Ctrl-C)")
                .map_err(|e| anyhow::anyhow!("Failed to save execution state: {}", e))?;
            println!(
                "Run {} to pick up where you left off.",
                format!("specflow auto-run-tasks {}", args.spec_name).cyan()
            );
            return Ok(());
        }
    };

    finish(result.map_err(|e| anyhow::anyhow!("{}", e))?)
}

// A run with nothing to execute (all tasks already complete) is a success,
// so the exit code hinges on failures alone
fn finish(result: AutoRunResult) -> Result<()> {
    if result.failed_tasks == 0 {
        Ok(())
    } else {
        bail!(
            "{} task(s) failed, {} succeeded, {} skipped",
            result.failed_tasks,
            result.successful_tasks,
            result.skipped_tasks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specflow_core::runner::{TaskResult, TaskStatus};

    #[test]
    fn finish_succeeds_when_nothing_was_pending() {
        // tasks.md with only completed entries yields an empty result
        let result = AutoRunResult::new("demo", 0);
        assert!(finish(result).is_ok());
    }

    #[test]
    fn finish_fails_on_failed_tasks() {
        let mut result = AutoRunResult::new("demo", 1);
        result.add_task_result(TaskResult {
            task_id: "1".to_string(),
            task_description: "first".to_string(),
            status: TaskStatus::Failed,
            execution_time: std::time::Duration::ZERO,
            error_message: Some("boom".to_string()),
        });
        assert!(finish(result).is_err());
    }
}

fn prompt_resume() -> Result<bool> {
    print!("Resume from saved state? [Y/n]: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(!matches!(line.trim().to_lowercase().as_str(), "n" | "no"))
}
