//! Task parsing and per-task command generation
//!
//! Tasks live in a spec's `tasks.md` as a numbered markdown checklist.
//! Agents produce the list in slightly varying formats, so the parser is
//! deliberately lenient about spacing and punctuation:
//!
//! ```markdown
//! - [ ] 1. Create the data model
//! - [ ] 2.1 Wire up persistence
//!   - _Requirements: 1.1, 2.2_
//!   - _Leverage: existing storage module_
//! ```

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::types::SpecflowResult;

/// A pending task parsed from a `tasks.md` checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    pub id: String,
    pub description: String,
    pub leverage: Option<String>,
    pub requirements: Option<String>,
}

#[allow(clippy::expect_used)]
fn task_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-\s*\[\s*\]\s*([0-9]+(?:\.[0-9]+)*)\s*\.?\s*(.+)$").expect("valid regex")
    })
}

#[allow(clippy::expect_used)]
fn requirements_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"_Requirements:\s*(.+?)(?:_|$)").expect("valid regex")
    })
}

#[allow(clippy::expect_used)]
fn leverage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"_Leverage:\s*(.+?)(?:_|$)").expect("valid regex")
    })
}

/// Parse pending tasks from `tasks.md` content
///
/// Completed tasks (`- [x]`) are not returned. Metadata lines
/// (`_Requirements: ...`, `_Leverage: ...`) anywhere inside a task block
/// attach to that task; collection stops at the next task line or at a
/// blank line followed by unindented content.
pub fn parse_tasks_from_markdown(content: &str) -> Vec<ParsedTask> {
    let lines: Vec<&str> = content.lines().collect();
    let mut tasks: Vec<ParsedTask> = Vec::new();
    let mut current_task: Option<ParsedTask> = None;
    let mut collecting = false;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if let Some(captures) = task_line_re().captures(trimmed) {
            if let Some(task) = current_task.take() {
                tasks.push(task);
            }

            current_task = Some(ParsedTask {
                id: captures[1].to_string(),
                description: captures[2].trim().to_string(),
                leverage: None,
                requirements: None,
            });
            collecting = true;
        } else if let Some(task) = current_task.as_mut() {
            if !collecting {
                continue;
            }

            if let Some(captures) = requirements_re().captures(line) {
                task.requirements = Some(captures[1].trim().to_string());
            }

            if let Some(captures) = leverage_re().captures(line) {
                task.leverage = Some(captures[1].trim().to_string());
            }

            // A blank line followed by unindented content ends the block
            if trimmed.is_empty() {
                if let Some(next) = lines.get(i + 1) {
                    if !next.is_empty() && !next.starts_with(' ') && !next.starts_with('\t') {
                        collecting = false;
                    }
                }
            }
        }
    }

    if let Some(task) = current_task {
        tasks.push(task);
    }

    debug!(count = tasks.len(), "parsed tasks from markdown");
    if tasks.is_empty() && !content.trim().is_empty() {
        warn!("no pending tasks found in tasks.md content");
    }

    tasks
}

/// Generate a command file (`task-<id>.md`) for a single task
pub fn generate_task_command(
    commands_dir: &Path,
    spec_name: &str,
    task: &ParsedTask,
) -> SpecflowResult<()> {
    let command_file = commands_dir.join(format!("task-{}.md", task.id));

    let mut content = format!(
        "# {spec} - Task {id}\n\n\
         Execute task {id} for the {spec} specification.\n\n\
         ## Task Description\n{description}\n\n",
        spec = spec_name,
        id = task.id,
        description = task.description,
    );

    if let Some(leverage) = &task.leverage {
        content.push_str(&format!(
            "## Code Reuse\n**Leverage existing code**: {}\n\n",
            leverage
        ));
    }

    if let Some(requirements) = &task.requirements {
        content.push_str(&format!(
            "## Requirements Reference\n**Requirements**: {}\n\n",
            requirements
        ));
    }

    content.push_str(&format!(
        "## Usage\n\
         ```\n\
         /{spec}-task-{id}\n\
         ```\n\n\
         ## Instructions\n\
         This command executes a specific task from the {spec} specification.\n\n\
         **Automatic Execution**: This command will automatically execute:\n\
         ```\n\
         /spec-execute {id} {spec}\n\
         ```\n\n\
         **Context Loading**:\n\
         Before executing the task, load all relevant context:\n\
         1. **Specification Documents**:\n\
            - `.claude/specs/{spec}/requirements.md` for feature requirements\n\
            - `.claude/specs/{spec}/design.md` for technical design\n\
            - `.claude/specs/{spec}/tasks.md` for the complete task list\n\
         2. **Steering Documents** (if available):\n\
            - `.claude/steering/product.md` for product vision context\n\
            - `.claude/steering/tech.md` for technical standards\n\
            - `.claude/steering/structure.md` for project conventions\n\n\
         **Important Rules**:\n\
         - Execute ONLY this specific task\n\
         - Leverage existing code whenever possible\n\
         - Follow project conventions from steering documents\n\
         - Mark the task as complete by changing [ ] to [x] in tasks.md\n\
         - Stop after completion and wait for user approval\n\
         - Validate the implementation against referenced requirements\n\n\
         ## Task Completion Protocol\n\
         When completing this task:\n\
         1. **Update tasks.md**: Change task {id} status from `- [ ]` to `- [x]`\n\
         2. **Confirm to user**: State clearly \"Task {id} has been marked as complete\"\n\
         3. **Stop execution**: Do not proceed to the next task automatically\n\n\
         ## Next Steps\n\
         After task completion, you can:\n\
         - Review the implementation\n\
         - Run tests if applicable\n\
         - Execute the next task using /{spec}-task-[next-id]\n\
         - Check overall progress with /spec-status {spec}\n",
        spec = spec_name,
        id = task.id,
    ));

    std::fs::write(&command_file, content)?;
    Ok(())
}

/// Mark a single task as complete in `tasks.md` by flipping `[ ]` to `[x]`
///
/// Only the line whose parsed id matches exactly is changed, so marking
/// task `1` leaves `1.1` untouched.
pub fn mark_task_complete(tasks_md: &Path, task_id: &str) -> SpecflowResult<()> {
    let content = std::fs::read_to_string(tasks_md)?;

    let updated: Vec<String> = content
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if let Some(captures) = task_line_re().captures(trimmed) {
                if &captures[1] == task_id {
                    return line.replacen("[ ]", "[x]", 1);
                }
            }
            line.to_string()
        })
        .collect();

    let mut output = updated.join("\n");
    if content.ends_with('\n') {
        output.push('\n');
    }

    std::fs::write(tasks_md, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tasks() {
        let content = "- [ ] 1. First task\n- [ ] 2. Second task\n";
        let tasks = parse_tasks_from_markdown(content);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "1");
        assert_eq!(tasks[0].description, "First task");
        assert_eq!(tasks[1].id, "2");
    }

    #[test]
    fn test_parse_subtask_ids() {
        let content = "- [ ] 2.1 Wire up persistence\n- [ ] 2.2. Add caching\n";
        let tasks = parse_tasks_from_markdown(content);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "2.1");
        assert_eq!(tasks[0].description, "Wire up persistence");
        assert_eq!(tasks[1].id, "2.2");
        assert_eq!(tasks[1].description, "Add caching");
    }

    #[test]
    fn test_parse_metadata() {
        let content = "\
- [ ] 1. Create the data model
  - Some detail line
  - _Requirements: 1.1, 2.2_
  - _Leverage: existing storage module_
- [ ] 2. Another task
";
        let tasks = parse_tasks_from_markdown(content);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].requirements.as_deref(), Some("1.1, 2.2"));
        assert_eq!(tasks[0].leverage.as_deref(), Some("existing storage module"));
        assert!(tasks[1].requirements.is_none());
    }

    #[test]
    fn test_completed_tasks_excluded() {
        let content = "- [x] 1. Done already\n- [ ] 2. Still pending\n";
        let tasks = parse_tasks_from_markdown(content);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "2");
    }

    #[test]
    fn test_flexible_spacing() {
        let content = "- [  ] 1 Task without dot\n-  [ ]  3.  Spaced out\n";
        let tasks = parse_tasks_from_markdown(content);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "1");
        assert_eq!(tasks[0].description, "Task without dot");
        assert_eq!(tasks[1].id, "3");
        assert_eq!(tasks[1].description, "Spaced out");
    }

    #[test]
    fn test_metadata_stops_at_unindented_content() {
        let content = "\
- [ ] 1. First task

Some prose section.
_Requirements: 9.9_
";
        let tasks = parse_tasks_from_markdown(content);

        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].requirements.is_none());
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_tasks_from_markdown("").is_empty());
        assert!(parse_tasks_from_markdown("# Tasks\n\nNo checklist here.\n").is_empty());
    }

    #[test]
    fn test_generate_task_command_writes_sections() {
        let temp_dir = tempfile::tempdir().unwrap();
        let task = ParsedTask {
            id: "2.1".to_string(),
            description: "Wire up persistence".to_string(),
            leverage: Some("storage module".to_string()),
            requirements: Some("1.1".to_string()),
        };

        generate_task_command(temp_dir.path(), "my-feature", &task).unwrap();

        let content =
            std::fs::read_to_string(temp_dir.path().join("task-2.1.md")).unwrap();
        assert!(content.contains("# my-feature - Task 2.1"));
        assert!(content.contains("## Code Reuse"));
        assert!(content.contains("## Requirements Reference"));
        assert!(content.contains("/my-feature-task-2.1"));
    }

    #[test]
    fn test_mark_task_complete_exact_id() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tasks_md = temp_dir.path().join("tasks.md");
        std::fs::write(&tasks_md, "- [ ] 1. Parent\n- [ ] 1.1 Child\n").unwrap();

        mark_task_complete(&tasks_md, "1").unwrap();

        let content = std::fs::read_to_string(&tasks_md).unwrap();
        assert_eq!(content, "- [x] 1. Parent\n- [ ] 1.1 Child\n");
    }

    #[test]
    fn test_mark_subtask_complete() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tasks_md = temp_dir.path().join("tasks.md");
        std::fs::write(&tasks_md, "- [ ] 1. Parent\n- [ ] 1.1 Child\n").unwrap();

        mark_task_complete(&tasks_md, "1.1").unwrap();

        let content = std::fs::read_to_string(&tasks_md).unwrap();
        assert_eq!(content, "- [ ] 1. Parent\n- [x] 1.1 Child\n");
    }
}
