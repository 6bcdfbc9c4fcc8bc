//! Sequential task runner
//!
//! Executes generated task commands through the Claude Code CLI, one task
//! at a time, marking each completed task in tasks.md. State is persisted
//! after every task so an interrupted run can resume.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use colored::Colorize;
use tracing::{debug, warn};

use crate::claude;
use crate::runner::models::{
    AutoRunOptions, AutoRunResult, ExecutionMode, ExecutionState, SpecContext, TaskResult,
    TaskStatus,
};
use crate::runner::selection::filter_tasks;
use crate::tasks::{mark_task_complete, parse_tasks_from_markdown, ParsedTask};
use crate::types::{SpecflowError, SpecflowResult};

const STATE_FILE_NAME: &str = ".auto-run-state.json";

/// Upper bound for a single task execution
const TASK_TIMEOUT: Duration = Duration::from_secs(600);

/// What the user chose after a task failed in interactive mode
enum FailureAction {
    Retry,
    Skip,
    Abort,
}

pub struct AutoRunner {
    project_root: PathBuf,
    claude_executable: PathBuf,
}

impl AutoRunner {
    pub fn new(project_root: &Path, claude_executable: PathBuf) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            claude_executable,
        }
    }

    fn state_file_path(&self, spec_name: &str) -> PathBuf {
        self.project_root
            .join(".claude")
            .join("specs")
            .join(spec_name)
            .join(STATE_FILE_NAME)
    }

    fn save_execution_state(&self, state: &ExecutionState) -> SpecflowResult<()> {
        let path = self.state_file_path(&state.spec_name);
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "saved execution state");
        Ok(())
    }

    /// Load saved state, tolerating a missing or unreadable file
    pub fn load_execution_state(&self, spec_name: &str) -> Option<ExecutionState> {
        let path = self.state_file_path(spec_name);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt execution state");
                None
            }
        }
    }

    fn clear_execution_state(&self, spec_name: &str) -> SpecflowResult<()> {
        let path = self.state_file_path(spec_name);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Saved state that an interrupted run left behind, if resumable
    pub fn check_for_resumable_execution(&self, spec_name: &str) -> Option<ExecutionState> {
        self.load_execution_state(spec_name)
            .filter(ExecutionState::is_resumable)
    }

    /// Record an interruption reason so the saved state explains itself
    pub fn mark_interrupted(&self, spec_name: &str, reason: &str) -> SpecflowResult<()> {
        if let Some(mut state) = self.load_execution_state(spec_name) {
            state.interruption_reason = Some(reason.to_string());
            self.save_execution_state(&state)?;
        }
        Ok(())
    }

    /// Execute the selected tasks of a specification sequentially
    pub async fn run_all_tasks(
        &self,
        spec_name: &str,
        options: AutoRunOptions,
    ) -> SpecflowResult<AutoRunResult> {
        println!(
            "{}",
            format!("Starting auto-run for specification: {}", spec_name)
                .cyan()
                .bold()
        );

        let spec_context = SpecContext::load(&self.project_root, spec_name)?;
        let parsed_tasks = parse_tasks_from_markdown(&spec_context.tasks_content);
        println!("Parsed {} pending tasks from tasks.md", parsed_tasks.len());

        if parsed_tasks.is_empty() {
            println!("{}", "No pending tasks found in tasks.md".yellow());
            return Ok(AutoRunResult::new(spec_name, 0));
        }

        let selected_tasks = filter_tasks(&parsed_tasks, &options.task_selection)?;
        println!("Selected {} tasks for execution", selected_tasks.len());
        self.print_mode_summary(&options);

        let mut state = ExecutionState::new(spec_name, options.clone(), selected_tasks.len());
        self.save_execution_state(&state)?;

        let mut result = AutoRunResult::new(spec_name, selected_tasks.len());

        'tasks: for (index, task) in selected_tasks.iter().enumerate() {
            if options.show_detailed_progress {
                println!(
                    "{}",
                    format!(
                        "[{}/{}] Task {}: {}",
                        index + 1,
                        selected_tasks.len(),
                        task.id,
                        task.description
                    )
                    .blue()
                );
            }

            if options.execution_mode == ExecutionMode::Interactive
                && !prompt_task_confirmation(task)?
            {
                let skipped =
                    TaskResult::skipped(&task.id, &task.description, Some("skipped by user".into()));
                state.record_result(&skipped);
                result.add_task_result(skipped);
                self.save_execution_state(&state)?;
                continue;
            }

            state.current_task_id = Some(task.id.clone());
            self.save_execution_state(&state)?;

            let mut task_result = self.execute_single_task(task, &spec_context).await;
            state.record_result(&task_result);
            result.add_task_result(task_result.clone());
            self.save_execution_state(&state)?;

            while task_result.status == TaskStatus::Failed {
                if options.execution_mode == ExecutionMode::Interactive {
                    match prompt_failure_action(&task_result)? {
                        FailureAction::Retry => {
                            println!("{}", format!("Retrying task {}...", task.id).yellow());
                            task_result = self.execute_single_task(task, &spec_context).await;
                            state.record_result(&task_result);
                            result.update_last_task_result(task_result.clone());
                            self.save_execution_state(&state)?;
                        }
                        FailureAction::Skip => break,
                        FailureAction::Abort => {
                            println!("{}", "Execution aborted by user".red());
                            state.interruption_reason = Some("aborted by user".to_string());
                            self.save_execution_state(&state)?;
                            return Ok(result);
                        }
                    }
                } else if options.continue_on_error {
                    println!(
                        "{}",
                        format!(
                            "Task {} failed. Continuing due to --continue-on-error.",
                            task.id
                        )
                        .yellow()
                    );
                    break;
                } else {
                    println!(
                        "{}",
                        format!("Task {} failed. Stopping execution.", task.id).red()
                    );
                    break 'tasks;
                }
            }
        }

        result.finalize();

        if result.is_successful() {
            self.clear_execution_state(spec_name)?;
        } else {
            state.interruption_reason = Some("execution stopped due to failures".to_string());
            self.save_execution_state(&state)?;
        }

        report_completion_summary(&result);
        Ok(result)
    }

    /// Resume execution from a specific task ID onward
    pub async fn resume_from_task(
        &self,
        spec_name: &str,
        task_id: &str,
        options: AutoRunOptions,
    ) -> SpecflowResult<AutoRunResult> {
        let spec_context = SpecContext::load(&self.project_root, spec_name)?;
        let mut parsed_tasks = parse_tasks_from_markdown(&spec_context.tasks_content);
        crate::runner::selection::sort_tasks_hierarchically(&mut parsed_tasks);

        let resume_index = parsed_tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| {
                let mut available: Vec<&str> =
                    parsed_tasks.iter().map(|t| t.id.as_str()).collect();
                available.sort_unstable();
                SpecflowError::Selection(format!(
                    "task ID '{}' not found in specification '{}'. Available task IDs: {}",
                    task_id,
                    spec_name,
                    available.join(", ")
                ))
            })?;

        println!(
            "{}",
            format!("Resuming execution from task {}", task_id).cyan()
        );

        let remaining: Vec<String> = parsed_tasks[resume_index..]
            .iter()
            .map(|t| t.id.clone())
            .collect();
        let resume_options = AutoRunOptions {
            task_selection: remaining.join(","),
            resume_from_task: Some(task_id.to_string()),
            ..options
        };
        Box::pin(self.run_all_tasks(spec_name, resume_options)).await
    }

    /// Resume execution from a previously saved state
    pub async fn resume_from_saved_state(
        &self,
        saved_state: ExecutionState,
    ) -> SpecflowResult<AutoRunResult> {
        println!("{}", "Resuming auto-run from saved state".cyan());
        println!("Spec: {}", saved_state.spec_name);

        let spec_context = SpecContext::load(&self.project_root, &saved_state.spec_name)?;
        let parsed_tasks = parse_tasks_from_markdown(&spec_context.tasks_content);

        let done: Vec<&str> = saved_state
            .completed_task_ids
            .iter()
            .chain(saved_state.skipped_task_ids.iter())
            .map(String::as_str)
            .collect();
        let remaining: Vec<String> = parsed_tasks
            .iter()
            .filter(|t| !done.contains(&t.id.as_str()))
            .map(|t| t.id.clone())
            .collect();

        if remaining.is_empty() {
            println!("{}", "All tasks already completed".green());
            self.clear_execution_state(&saved_state.spec_name)?;
            let mut result =
                AutoRunResult::new(&saved_state.spec_name, parsed_tasks.len());
            result.executed_tasks = saved_state.completed_task_ids.len();
            result.successful_tasks = saved_state.completed_task_ids.len();
            result.summary_message = "All tasks were already completed".to_string();
            return Ok(result);
        }

        println!("{} tasks remaining to execute", remaining.len());

        let resume_options = AutoRunOptions {
            task_selection: remaining.join(","),
            resume_from_task: remaining.first().cloned(),
            ..saved_state.options
        };
        Box::pin(self.run_all_tasks(&saved_state.spec_name, resume_options)).await
    }

    /// Run one generated task command and mark the task complete on success
    async fn execute_single_task(
        &self,
        task: &ParsedTask,
        spec_context: &SpecContext,
    ) -> TaskResult {
        let command = format!("/{}-task-{}", spec_context.spec_name, task.id);
        let started = Instant::now();

        let outcome = claude::run_slash_command(
            &self.claude_executable,
            &self.project_root,
            &command,
            TASK_TIMEOUT,
        )
        .await;

        let (status, error_message) = match outcome {
            Ok(output) if output.success => {
                if let Err(e) = mark_task_complete(&spec_context.tasks_file(), &task.id) {
                    warn!(task = %task.id, error = %e, "task succeeded but could not update tasks.md");
                }
                println!("{}", format!("Task {} completed", task.id).green());
                (TaskStatus::Success, None)
            }
            Ok(output) => {
                let detail = if output.stderr.trim().is_empty() {
                    "task command reported failure".to_string()
                } else {
                    output.stderr.trim().to_string()
                };
                println!("{}", format!("Task {} failed: {}", task.id, detail).red());
                (TaskStatus::Failed, Some(detail))
            }
            Err(e) => {
                println!("{}", format!("Task {} failed: {}", task.id, e).red());
                (TaskStatus::Failed, Some(e.to_string()))
            }
        };

        TaskResult {
            task_id: task.id.clone(),
            task_description: task.description.clone(),
            status,
            execution_time: started.elapsed(),
            error_message,
        }
    }

    fn print_mode_summary(&self, options: &AutoRunOptions) {
        match options.execution_mode {
            ExecutionMode::Interactive => {
                println!("{}", "Execution mode: interactive".dimmed());
                println!(
                    "{}",
                    "Failed tasks will offer retry/skip/abort options".dimmed()
                );
            }
            ExecutionMode::Automatic if options.continue_on_error => {
                println!(
                    "{}",
                    "Execution mode: automatic (continue-on-error enabled)".dimmed()
                );
            }
            ExecutionMode::Automatic => {
                println!(
                    "{}",
                    "Execution mode: automatic (stops on first failure)".dimmed()
                );
            }
        }
    }
}

fn prompt_task_confirmation(task: &ParsedTask) -> SpecflowResult<bool> {
    println!();
    println!("Next task: {} - {}", task.id.bold(), task.description);
    if let Some(requirements) = &task.requirements {
        println!("  Requirements: {}", requirements.dimmed());
    }
    if let Some(leverage) = &task.leverage {
        println!("  Leverage: {}", leverage.dimmed());
    }
    loop {
        let answer = prompt_line("Execute this task? [y/n/s(kip)] ")?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "s" | "skip" => return Ok(false),
            _ => println!("Please answer 'y', 'n', or 's'."),
        }
    }
}

fn prompt_failure_action(task_result: &TaskResult) -> SpecflowResult<FailureAction> {
    println!();
    println!(
        "{}",
        format!(
            "Task {} failed: {}",
            task_result.task_id,
            task_result
                .error_message
                .as_deref()
                .unwrap_or("unknown error")
        )
        .red()
    );
    loop {
        let answer = prompt_line("Choose an action: [r]etry, [s]kip, [a]bort ")?;
        match answer.to_lowercase().as_str() {
            "r" | "retry" => return Ok(FailureAction::Retry),
            "s" | "skip" => return Ok(FailureAction::Skip),
            "a" | "abort" => return Ok(FailureAction::Abort),
            _ => println!("Please answer 'r', 's', or 'a'."),
        }
    }
}

fn prompt_line(prompt: &str) -> SpecflowResult<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn report_completion_summary(result: &AutoRunResult) {
    println!();
    if result.is_successful() {
        println!("{}", result.summary_message.green().bold());
    } else {
        println!("{}", result.summary_message.yellow().bold());
    }
    if result.executed_tasks > 0 {
        println!(
            "{}",
            format!("Success rate: {:.0}%", result.success_rate() * 100.0).dimmed()
        );
    }

    let failed: Vec<&TaskResult> = result
        .task_results
        .iter()
        .filter(|r| r.status == TaskStatus::Failed)
        .collect();
    if !failed.is_empty() {
        println!();
        println!("{}", "Failed tasks:".red().bold());
        for task_result in failed {
            println!(
                "  {} - {} ({})",
                task_result.task_id.red(),
                task_result.task_description,
                task_result
                    .error_message
                    .as_deref()
                    .unwrap_or("unknown error")
            );
        }
        println!();
        println!("{}", "Use --mode interactive for step-by-step control,".dimmed());
        println!("{}", "--continue-on-error to skip failures,".dimmed());
        println!("{}", "or --resume-from <task-id> to pick up from a task.".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::models::AutoRunOptions;

    fn runner_in(dir: &Path) -> AutoRunner {
        AutoRunner::new(dir, PathBuf::from("claude"))
    }

    #[test]
    fn test_state_persistence_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let spec_dir = temp_dir.path().join(".claude").join("specs").join("demo");
        std::fs::create_dir_all(&spec_dir).unwrap();

        let runner = runner_in(temp_dir.path());
        let mut state = ExecutionState::new("demo", AutoRunOptions::default(), 3);
        state.completed_task_ids.push("1".to_string());
        state.current_task_id = Some("2".to_string());
        runner.save_execution_state(&state).unwrap();

        let loaded = runner.load_execution_state("demo").unwrap();
        assert_eq!(loaded.completed_task_ids, vec!["1"]);
        assert_eq!(loaded.current_task_id.as_deref(), Some("2"));

        runner.clear_execution_state("demo").unwrap();
        assert!(runner.load_execution_state("demo").is_none());
    }

    #[test]
    fn test_resumable_check_requires_progress() {
        let temp_dir = tempfile::tempdir().unwrap();
        let spec_dir = temp_dir.path().join(".claude").join("specs").join("demo");
        std::fs::create_dir_all(&spec_dir).unwrap();

        let runner = runner_in(temp_dir.path());

        // Fresh state with no current task and nothing completed is not resumable
        let state = ExecutionState::new("demo", AutoRunOptions::default(), 3);
        runner.save_execution_state(&state).unwrap();
        assert!(runner.check_for_resumable_execution("demo").is_none());

        let mut state = ExecutionState::new("demo", AutoRunOptions::default(), 3);
        state.completed_task_ids.push("1".to_string());
        runner.save_execution_state(&state).unwrap();
        assert!(runner.check_for_resumable_execution("demo").is_some());
    }

    #[test]
    fn test_corrupt_state_ignored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let spec_dir = temp_dir.path().join(".claude").join("specs").join("demo");
        std::fs::create_dir_all(&spec_dir).unwrap();
        std::fs::write(spec_dir.join(STATE_FILE_NAME), "not json").unwrap();

        let runner = runner_in(temp_dir.path());
        assert!(runner.load_execution_state("demo").is_none());
    }

    #[tokio::test]
    async fn test_resume_from_unknown_task_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let spec_dir = temp_dir.path().join(".claude").join("specs").join("demo");
        std::fs::create_dir_all(&spec_dir).unwrap();
        std::fs::write(spec_dir.join("requirements.md"), "# Requirements").unwrap();
        std::fs::write(spec_dir.join("design.md"), "# Design").unwrap();
        std::fs::write(spec_dir.join("tasks.md"), "- [ ] 1. Only task\n").unwrap();

        let runner = runner_in(temp_dir.path());
        let err = runner
            .resume_from_task("demo", "9", AutoRunOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Available task IDs: 1"));
    }

    #[tokio::test]
    async fn test_run_missing_spec_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = runner_in(temp_dir.path());

        let err = runner
            .run_all_tasks("ghost", AutoRunOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
