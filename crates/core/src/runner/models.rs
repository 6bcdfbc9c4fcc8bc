//! Data models for automated task execution
//!
//! Execution state is persisted as JSON alongside the spec so an
//! interrupted run can be resumed later.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::steering::SteeringManager;
use crate::types::{SpecflowError, SpecflowResult};

/// How the runner proceeds between tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Execute all tasks without user intervention
    Automatic,
    /// Prompt before each task and on failures
    Interactive,
}

impl FromStr for ExecutionMode {
    type Err = SpecflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "automatic" => Ok(Self::Automatic),
            "interactive" => Ok(Self::Interactive),
            other => Err(SpecflowError::Selection(format!(
                "unknown execution mode '{}' (expected 'automatic' or 'interactive')",
                other
            ))),
        }
    }
}

/// Outcome of a single task execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Success,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoRunOptions {
    pub execution_mode: ExecutionMode,
    /// "all", "1-3", "2,4,6", "2.1-2.3", or mixed
    pub task_selection: String,
    pub continue_on_error: bool,
    pub show_detailed_progress: bool,
    pub resume_from_task: Option<String>,
}

impl Default for AutoRunOptions {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Automatic,
            task_selection: "all".to_string(),
            continue_on_error: false,
            show_detailed_progress: true,
            resume_from_task: None,
        }
    }
}

/// Result of one task run
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task_id: String,
    pub task_description: String,
    pub status: TaskStatus,
    pub execution_time: std::time::Duration,
    pub error_message: Option<String>,
}

impl TaskResult {
    pub fn skipped(task_id: &str, description: &str, reason: Option<String>) -> Self {
        Self {
            task_id: task_id.to_string(),
            task_description: description.to_string(),
            status: TaskStatus::Skipped,
            execution_time: std::time::Duration::ZERO,
            error_message: reason,
        }
    }
}

/// Aggregate result of an auto-run session
#[derive(Debug, Default)]
pub struct AutoRunResult {
    pub spec_name: String,
    pub total_tasks: usize,
    pub executed_tasks: usize,
    pub successful_tasks: usize,
    pub failed_tasks: usize,
    pub skipped_tasks: usize,
    pub task_results: Vec<TaskResult>,
    pub summary_message: String,
}

impl AutoRunResult {
    pub fn new(spec_name: &str, total_tasks: usize) -> Self {
        Self {
            spec_name: spec_name.to_string(),
            total_tasks,
            ..Default::default()
        }
    }

    pub fn add_task_result(&mut self, result: TaskResult) {
        self.bump_counter(result.status, 1);
        self.executed_tasks += 1;
        self.task_results.push(result);
    }

    /// Replace the last result, used after an interactive retry
    pub fn update_last_task_result(&mut self, result: TaskResult) {
        if let Some(old) = self.task_results.pop() {
            self.bump_counter(old.status, -1);
            self.executed_tasks -= 1;
        }
        self.add_task_result(result);
    }

    fn bump_counter(&mut self, status: TaskStatus, delta: i64) {
        let counter = match status {
            TaskStatus::Success => &mut self.successful_tasks,
            TaskStatus::Failed => &mut self.failed_tasks,
            TaskStatus::Skipped => &mut self.skipped_tasks,
        };
        *counter = counter.saturating_add_signed(delta as isize);
    }

    pub fn finalize(&mut self) {
        self.summary_message = if self.failed_tasks == 0 {
            format!(
                "Auto-run completed successfully: {}/{} tasks completed",
                self.successful_tasks, self.total_tasks
            )
        } else {
            format!(
                "Auto-run completed with issues: {} successful, {} failed, {} skipped",
                self.successful_tasks, self.failed_tasks, self.skipped_tasks
            )
        };
    }

    pub fn is_successful(&self) -> bool {
        self.failed_tasks == 0 && self.executed_tasks > 0
    }

    /// Fraction of executed tasks that succeeded, 0.0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        if self.executed_tasks == 0 {
            return 0.0;
        }
        self.successful_tasks as f64 / self.executed_tasks as f64
    }
}

/// Loaded spec documents used as execution context
#[derive(Debug, Clone)]
pub struct SpecContext {
    pub spec_name: String,
    pub requirements_content: String,
    pub design_content: String,
    pub tasks_content: String,
    pub steering_documents: BTreeMap<String, String>,
    pub spec_directory: PathBuf,
}

impl SpecContext {
    /// Load all spec documents from `.claude/specs/<name>/` under the project
    pub fn load(project_root: &Path, spec_name: &str) -> SpecflowResult<Self> {
        let spec_dir = project_root.join(".claude").join("specs").join(spec_name);
        if !spec_dir.exists() {
            return Err(SpecflowError::Spec(format!(
                "specification '{}' not found at {}",
                spec_name,
                spec_dir.display()
            )));
        }

        let read_doc = |file: &str| -> SpecflowResult<String> {
            std::fs::read_to_string(spec_dir.join(file)).map_err(|e| {
                SpecflowError::Spec(format!("could not read {} for '{}': {}", file, spec_name, e))
            })
        };

        let requirements_content = read_doc("requirements.md")?;
        let design_content = read_doc("design.md")?;
        let tasks_content = read_doc("tasks.md")?;

        let docs = SteeringManager::new(project_root).load_documents();
        let mut steering_documents = BTreeMap::new();
        for (steering_file, content) in [
            ("product.md", docs.product),
            ("tech.md", docs.tech),
            ("structure.md", docs.structure),
        ] {
            if let Some(content) = content {
                steering_documents.insert(steering_file.to_string(), content);
            }
        }

        Ok(Self {
            spec_name: spec_name.to_string(),
            requirements_content,
            design_content,
            tasks_content,
            steering_documents,
            spec_directory: spec_dir,
        })
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.spec_directory.join("tasks.md")
    }
}

/// Persisted runner state, enables `--resume-from` and saved-state resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionState {
    pub spec_name: String,
    pub start_time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub options: AutoRunOptions,
    #[serde(default)]
    pub completed_task_ids: Vec<String>,
    #[serde(default)]
    pub failed_task_ids: Vec<String>,
    #[serde(default)]
    pub skipped_task_ids: Vec<String>,
    pub current_task_id: Option<String>,
    #[serde(default)]
    pub total_tasks: usize,
    pub interruption_reason: Option<String>,
}

impl ExecutionState {
    pub fn new(spec_name: &str, options: AutoRunOptions, total_tasks: usize) -> Self {
        let now = Utc::now();
        Self {
            spec_name: spec_name.to_string(),
            start_time: now,
            last_updated: now,
            options,
            completed_task_ids: Vec::new(),
            failed_task_ids: Vec::new(),
            skipped_task_ids: Vec::new(),
            current_task_id: None,
            total_tasks,
            interruption_reason: None,
        }
    }

    pub fn record_result(&mut self, result: &TaskResult) {
        let bucket = match result.status {
            TaskStatus::Success => &mut self.completed_task_ids,
            TaskStatus::Failed => &mut self.failed_task_ids,
            TaskStatus::Skipped => &mut self.skipped_task_ids,
        };
        if !bucket.contains(&result.task_id) {
            bucket.push(result.task_id.clone());
        }
        // A retry that succeeds clears the earlier failure record
        if result.status == TaskStatus::Success {
            self.failed_task_ids.retain(|id| id != &result.task_id);
        }
        self.last_updated = Utc::now();
    }

    pub fn is_resumable(&self) -> bool {
        self.total_tasks > 0
            && self.completed_task_ids.len() < self.total_tasks
            && (self.current_task_id.is_some() || !self.completed_task_ids.is_empty())
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_task_ids.len() as f64 / self.total_tasks as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_mode_from_str() {
        assert_eq!(
            "automatic".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Automatic
        );
        assert_eq!(
            "INTERACTIVE".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Interactive
        );
        assert!("batch".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn test_result_counters() {
        let mut result = AutoRunResult::new("demo", 3);
        result.add_task_result(TaskResult {
            task_id: "1".to_string(),
            task_description: "first".to_string(),
            status: TaskStatus::Success,
            execution_time: std::time::Duration::from_secs(1),
            error_message: None,
        });
        result.add_task_result(TaskResult {
            task_id: "2".to_string(),
            task_description: "second".to_string(),
            status: TaskStatus::Failed,
            execution_time: std::time::Duration::from_secs(1),
            error_message: Some("boom".to_string()),
        });

        assert_eq!(result.executed_tasks, 2);
        assert_eq!(result.successful_tasks, 1);
        assert_eq!(result.failed_tasks, 1);
        assert!(!result.is_successful());
        assert!((result.success_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_zero_when_nothing_ran() {
        let result = AutoRunResult::new("demo", 3);
        assert_eq!(result.success_rate(), 0.0);
    }

    #[test]
    fn test_retry_replaces_last_result() {
        let mut result = AutoRunResult::new("demo", 1);
        result.add_task_result(TaskResult {
            task_id: "1".to_string(),
            task_description: "first".to_string(),
            status: TaskStatus::Failed,
            execution_time: std::time::Duration::ZERO,
            error_message: Some("boom".to_string()),
        });
        result.update_last_task_result(TaskResult {
            task_id: "1".to_string(),
            task_description: "first".to_string(),
            status: TaskStatus::Success,
            execution_time: std::time::Duration::from_secs(2),
            error_message: None,
        });

        assert_eq!(result.executed_tasks, 1);
        assert_eq!(result.successful_tasks, 1);
        assert_eq!(result.failed_tasks, 0);
        assert!(result.is_successful());
    }

    #[test]
    fn test_state_retry_clears_failure() {
        let mut state = ExecutionState::new("demo", AutoRunOptions::default(), 2);
        state.record_result(&TaskResult {
            task_id: "1".to_string(),
            task_description: "first".to_string(),
            status: TaskStatus::Failed,
            execution_time: std::time::Duration::ZERO,
            error_message: Some("boom".to_string()),
        });
        assert_eq!(state.failed_task_ids, vec!["1"]);

        state.record_result(&TaskResult {
            task_id: "1".to_string(),
            task_description: "first".to_string(),
            status: TaskStatus::Success,
            execution_time: std::time::Duration::ZERO,
            error_message: None,
        });
        assert!(state.failed_task_ids.is_empty());
        assert_eq!(state.completed_task_ids, vec!["1"]);
        assert!(state.is_resumable());
    }

    #[test]
    fn test_state_round_trip() {
        let state = ExecutionState::new("demo", AutoRunOptions::default(), 4);
        let json = serde_json::to_string(&state).unwrap();
        let restored: ExecutionState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.spec_name, "demo");
        assert_eq!(restored.total_tasks, 4);
        assert_eq!(restored.options.task_selection, "all");
    }
}
