//! Spec file parsing for the status dashboard
//!
//! Walks `.claude/specs/` and derives a phase for each spec from which
//! documents exist, their approval markers, and task completion counts.
//! Unlike the task runner's parser this one keeps completed tasks and
//! the subtask hierarchy, both of which the dashboard displays.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::types::SpecflowResult;

const APPROVAL_MARKERS: &[&str] = &["\u{2705} APPROVED", "**Approved:** \u{2713}"];

/// One checklist entry from tasks.md, with nested subtasks
#[derive(Debug, Clone)]
pub struct DashboardTask {
    pub id: String,
    pub description: String,
    pub completed: bool,
    pub requirements: Vec<String>,
    pub leverage: Option<String>,
    pub subtasks: Vec<DashboardTask>,
}

/// One requirement section from requirements.md
#[derive(Debug, Clone)]
pub struct RequirementDetail {
    pub id: String,
    pub title: String,
    pub user_story: Option<String>,
    pub acceptance_criteria: Vec<String>,
}

/// Which steering documents exist in the project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteeringStatus {
    pub exists: bool,
    pub has_product: bool,
    pub has_tech: bool,
    pub has_structure: bool,
}

/// Workflow phase of a spec as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecPhase {
    NotStarted,
    Requirements,
    Design,
    Tasks,
    InProgress,
    Completed,
}

impl fmt::Display for SpecPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotStarted => "not-started",
            Self::Requirements => "requirements",
            Self::Design => "design",
            Self::Tasks => "tasks",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct RequirementsInfo {
    pub user_stories: usize,
    pub approved: bool,
    pub details: Vec<RequirementDetail>,
}

#[derive(Debug, Clone)]
pub struct DesignInfo {
    pub approved: bool,
    pub has_code_reuse_analysis: bool,
}

#[derive(Debug, Clone)]
pub struct TasksInfo {
    pub approved: bool,
    pub total: usize,
    pub completed: usize,
    /// First incomplete task, shown as "current" while in progress
    pub in_progress: Option<String>,
    pub task_list: Vec<DashboardTask>,
}

/// Complete status of one spec
#[derive(Debug, Clone)]
pub struct SpecStatus {
    pub name: String,
    pub display_name: String,
    pub phase: SpecPhase,
    pub requirements: Option<RequirementsInfo>,
    pub design: Option<DesignInfo>,
    pub tasks: Option<TasksInfo>,
    pub last_modified: Option<DateTime<Utc>>,
}

pub struct SpecParser {
    project_path: PathBuf,
    specs_path: PathBuf,
}

impl SpecParser {
    pub fn new(project_path: &Path) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            specs_path: project_path.join(".claude").join("specs"),
        }
    }

    pub fn steering_status(&self) -> SteeringStatus {
        let steering_path = self.project_path.join(".claude").join("steering");
        if !steering_path.exists() {
            return SteeringStatus::default();
        }
        SteeringStatus {
            exists: true,
            has_product: steering_path.join("product.md").exists(),
            has_tech: steering_path.join("tech.md").exists(),
            has_structure: steering_path.join("structure.md").exists(),
        }
    }

    /// All specs in the project, newest first
    pub fn get_all_specs(&self) -> SpecflowResult<Vec<SpecStatus>> {
        let Ok(entries) = std::fs::read_dir(&self.specs_path) else {
            return Ok(Vec::new());
        };

        let mut specs = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if !entry.path().is_dir() || name.starts_with('.') {
                continue;
            }
            if let Some(spec) = self.get_spec(&name)? {
                specs.push(spec);
            }
        }
        debug!(count = specs.len(), "parsed specs");

        specs.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(specs)
    }

    pub fn get_spec(&self, name: &str) -> SpecflowResult<Option<SpecStatus>> {
        let spec_path = self.specs_path.join(name);
        if !spec_path.exists() {
            return Ok(None);
        }

        let default_display = format_display_name(name);
        let mut spec = SpecStatus {
            name: name.to_string(),
            display_name: default_display.clone(),
            phase: SpecPhase::NotStarted,
            requirements: None,
            design: None,
            tasks: None,
            last_modified: None,
        };

        if let Ok(content) = std::fs::read_to_string(spec_path.join("requirements.md")) {
            if let Some(title) = extract_title(&content, "Requirements") {
                spec.display_name = title;
            }
            let user_stories = user_story_re().find_iter(&content).count();
            let approved = is_approved(&content);
            spec.requirements = Some(RequirementsInfo {
                user_stories,
                approved,
                details: extract_requirements(&content),
            });
            spec.phase = if approved {
                SpecPhase::Design
            } else {
                SpecPhase::Requirements
            };
        }

        if let Ok(content) = std::fs::read_to_string(spec_path.join("design.md")) {
            if spec.display_name == default_display {
                if let Some(title) = extract_title(&content, "Design") {
                    spec.display_name = title;
                }
            }
            let approved = is_approved(&content);
            spec.design = Some(DesignInfo {
                approved,
                has_code_reuse_analysis: content.contains("## Code Reuse Analysis"),
            });
            if approved {
                spec.phase = SpecPhase::Tasks;
            }
        }

        if let Ok(content) = std::fs::read_to_string(spec_path.join("tasks.md")) {
            if spec.display_name == default_display {
                if let Some(title) = extract_title(&content, "Tasks") {
                    spec.display_name = title;
                }
            }
            let task_list = parse_task_tree(&content);
            let total = count_tasks(&task_list);
            let completed = count_completed(&task_list);
            let approved = is_approved(&content);

            if approved {
                spec.phase = if completed == 0 {
                    SpecPhase::Tasks
                } else if completed < total {
                    SpecPhase::InProgress
                } else {
                    SpecPhase::Completed
                };
            }

            spec.tasks = Some(TasksInfo {
                approved,
                total,
                completed,
                in_progress: find_in_progress_task(&task_list),
                task_list,
            });
        }

        spec.last_modified = ["requirements.md", "design.md", "tasks.md"]
            .iter()
            .filter_map(|file| std::fs::metadata(spec_path.join(file)).ok())
            .filter_map(|meta| meta.modified().ok())
            .map(DateTime::<Utc>::from)
            .max();

        Ok(Some(spec))
    }
}

#[allow(clippy::expect_used)]
fn task_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)- \[([ x])\] (?:\*\*)?(\d+(?:\.\d+)*)\.? (.+?)(?:\*\*)?$")
            .expect("task line regex is valid")
    })
}

#[allow(clippy::expect_used)]
fn requirements_meta_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_Requirements: ([\d., ]+)").expect("requirements regex is valid"))
}

#[allow(clippy::expect_used)]
fn leverage_meta_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_Leverage: (.+)$").expect("leverage regex is valid"))
}

#[allow(clippy::expect_used)]
fn user_story_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\*\*User Story:\*\*|## User Story \d+)").expect("user story regex is valid")
    })
}

#[allow(clippy::expect_used)]
fn requirement_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#{2,3} (?:Requirement )?(\d+)[:.] (.+)$").expect("heading regex is valid")
    })
}

fn is_approved(content: &str) -> bool {
    APPROVAL_MARKERS.iter().any(|marker| content.contains(marker))
}

/// Title from the first heading, with a trailing document-type word removed
fn extract_title(content: &str, suffix: &str) -> Option<String> {
    let heading = content
        .lines()
        .find_map(|line| line.strip_prefix("# "))?
        .trim();
    let title = heading.strip_suffix(suffix).unwrap_or(heading).trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

fn format_display_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the checklist into a tree, nesting by indentation depth
fn parse_task_tree(content: &str) -> Vec<DashboardTask> {
    let mut tasks: Vec<DashboardTask> = Vec::new();
    // Index path into the tree for the most recent task at each level
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for line in content.lines() {
        if let Some(caps) = task_line_re().captures(line) {
            let level = caps[1].len() / 2;
            let task = DashboardTask {
                id: caps[3].to_string(),
                description: caps[4].trim().to_string(),
                completed: &caps[2] == "x",
                requirements: Vec::new(),
                leverage: None,
                subtasks: Vec::new(),
            };

            while stack.last().is_some_and(|(l, _)| *l >= level) {
                stack.pop();
            }

            let siblings = siblings_mut(&mut tasks, &stack);
            siblings.push(task);
            let index = siblings.len() - 1;
            stack.push((level, index));
        } else if let Some((_, current)) = stack.last() {
            let current = *current;
            let parent_stack = &stack[..stack.len() - 1];
            let task = &mut siblings_mut(&mut tasks, parent_stack)[current];
            if let Some(caps) = requirements_meta_re().captures(line) {
                task.requirements = caps[1].split(',').map(|r| r.trim().to_string()).collect();
            }
            if let Some(caps) = leverage_meta_re().captures(line) {
                task.leverage = Some(caps[1].trim().to_string());
            }
        }
    }

    tasks
}

fn siblings_mut<'a>(
    tasks: &'a mut Vec<DashboardTask>,
    stack: &[(usize, usize)],
) -> &'a mut Vec<DashboardTask> {
    let mut current = tasks;
    for (_, index) in stack {
        current = &mut current[*index].subtasks;
    }
    current
}

fn count_tasks(tasks: &[DashboardTask]) -> usize {
    tasks.len() + tasks.iter().map(|t| count_tasks(&t.subtasks)).sum::<usize>()
}

fn count_completed(tasks: &[DashboardTask]) -> usize {
    tasks
        .iter()
        .map(|t| usize::from(t.completed) + count_completed(&t.subtasks))
        .sum()
}

fn find_in_progress_task(tasks: &[DashboardTask]) -> Option<String> {
    for task in tasks {
        if !task.completed {
            return Some(task.id.clone());
        }
        if let Some(id) = find_in_progress_task(&task.subtasks) {
            return Some(id);
        }
    }
    None
}

/// Requirement sections with user stories and acceptance criteria
fn extract_requirements(content: &str) -> Vec<RequirementDetail> {
    let mut requirements = Vec::new();
    let mut current: Option<RequirementDetail> = None;
    let mut in_acceptance_criteria = false;

    for line in content.lines() {
        if let Some(caps) = requirement_heading_re().captures(line) {
            if let Some(finished) = current.take() {
                requirements.push(finished);
            }
            current = Some(RequirementDetail {
                id: caps[1].to_string(),
                title: caps[2].trim().to_string(),
                user_story: None,
                acceptance_criteria: Vec::new(),
            });
            in_acceptance_criteria = false;
        } else if let Some(req) = current.as_mut() {
            if line.contains("**User Story:**") {
                req.user_story = Some(line.replace("**User Story:**", "").trim().to_string());
            } else if line.contains("#### Acceptance Criteria") {
                in_acceptance_criteria = true;
            } else if in_acceptance_criteria {
                if let Some(rest) = line
                    .trim_start()
                    .split_once(". ")
                    .filter(|(n, _)| n.chars().all(|c| c.is_ascii_digit()) && !n.is_empty())
                    .map(|(_, rest)| rest)
                {
                    req.acceptance_criteria.push(rest.trim().to_string());
                } else if line.starts_with("## ") || line.starts_with("### ") {
                    in_acceptance_criteria = false;
                }
            }
        }
    }

    if let Some(finished) = current {
        requirements.push(finished);
    }
    requirements
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS_MD: &str = "\
# User Auth Tasks

\u{2705} APPROVED

- [x] 1. Set up structure
  - _Requirements: 1.1_
- [ ] 2. Implement models
  - [x] 2.1 Base models
    - _Requirements: 2.1, 2.2_
    - _Leverage: src/models.rs_
  - [ ] 2.2 Concrete models
- [ ] 3. Service layer
";

    fn write_spec(root: &Path, name: &str, files: &[(&str, &str)]) {
        let dir = root.join(".claude").join("specs").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            std::fs::write(dir.join(file), content).unwrap();
        }
    }

    #[test]
    fn test_task_tree_parsing() {
        let tasks = parse_task_tree(TASKS_MD);
        assert_eq!(tasks.len(), 3);
        assert!(tasks[0].completed);
        assert_eq!(tasks[1].subtasks.len(), 2);
        assert_eq!(tasks[1].subtasks[0].id, "2.1");
        assert!(tasks[1].subtasks[0].completed);
        assert_eq!(tasks[1].subtasks[0].requirements, vec!["2.1", "2.2"]);
        assert_eq!(
            tasks[1].subtasks[0].leverage.as_deref(),
            Some("src/models.rs")
        );

        assert_eq!(count_tasks(&tasks), 5);
        assert_eq!(count_completed(&tasks), 2);
        assert_eq!(find_in_progress_task(&tasks).as_deref(), Some("2"));
    }

    #[test]
    fn test_bold_task_lines() {
        let tasks = parse_task_tree("- [ ] **1. Bold task**\n");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Bold task");
    }

    #[test]
    fn test_spec_phase_progression() {
        let temp_dir = tempfile::tempdir().unwrap();
        let parser = SpecParser::new(temp_dir.path());

        write_spec(
            temp_dir.path(),
            "user-auth",
            &[("requirements.md", "# User Auth Requirements\n\n**User Story:** x\n")],
        );
        let spec = parser.get_spec("user-auth").unwrap().unwrap();
        assert_eq!(spec.phase, SpecPhase::Requirements);
        assert_eq!(spec.display_name, "User Auth");

        write_spec(
            temp_dir.path(),
            "user-auth",
            &[(
                "requirements.md",
                "# User Auth Requirements\n\n\u{2705} APPROVED\n\n**User Story:** x\n",
            )],
        );
        let spec = parser.get_spec("user-auth").unwrap().unwrap();
        assert_eq!(spec.phase, SpecPhase::Design);

        write_spec(
            temp_dir.path(),
            "user-auth",
            &[
                ("design.md", "# User Auth Design\n\n\u{2705} APPROVED\n"),
                ("tasks.md", TASKS_MD),
            ],
        );
        let spec = parser.get_spec("user-auth").unwrap().unwrap();
        assert_eq!(spec.phase, SpecPhase::InProgress);
        let tasks = spec.tasks.unwrap();
        assert_eq!(tasks.total, 5);
        assert_eq!(tasks.completed, 2);
        assert_eq!(tasks.in_progress.as_deref(), Some("2"));
    }

    #[test]
    fn test_completed_phase() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_spec(
            temp_dir.path(),
            "done",
            &[("tasks.md", "\u{2705} APPROVED\n\n- [x] 1. Only task\n")],
        );

        let parser = SpecParser::new(temp_dir.path());
        let spec = parser.get_spec("done").unwrap().unwrap();
        assert_eq!(spec.phase, SpecPhase::Completed);
    }

    #[test]
    fn test_get_all_specs_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let parser = SpecParser::new(temp_dir.path());
        assert!(parser.get_all_specs().unwrap().is_empty());
    }

    #[test]
    fn test_requirement_extraction() {
        let content = "\
# Requirements

### Requirement 1: Sign up
**User Story:** As a user, I want to sign up, so that I have an account

#### Acceptance Criteria
1. WHEN the form is submitted THEN the system SHALL create an account
2. IF the email is taken THEN the system SHALL show an error

### 2. Log in
**User Story:** As a user, I want to log in, so that I can access my data
";
        let requirements = extract_requirements(content);
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0].id, "1");
        assert_eq!(requirements[0].title, "Sign up");
        assert_eq!(requirements[0].acceptance_criteria.len(), 2);
        assert!(requirements[1].user_story.as_deref().unwrap_or("").contains("log in"));
    }

    #[test]
    fn test_steering_status() {
        let temp_dir = tempfile::tempdir().unwrap();
        let parser = SpecParser::new(temp_dir.path());
        assert!(!parser.steering_status().exists);

        let steering = temp_dir.path().join(".claude").join("steering");
        std::fs::create_dir_all(&steering).unwrap();
        std::fs::write(steering.join("tech.md"), "# Tech").unwrap();

        let status = parser.steering_status();
        assert!(status.exists);
        assert!(status.has_tech);
        assert!(!status.has_product);
    }
}
