//! Task selection parsing and hierarchical ordering
//!
//! Selections combine single IDs, numeric ranges, and subtask ranges:
//! `all`, `*`, `1-3`, `2,4,6`, `2.1-2.3`, `1,3-5`. Selected tasks are
//! always executed in hierarchical order regardless of selection order.

use std::collections::HashSet;

use crate::tasks::ParsedTask;
use crate::types::{SpecflowError, SpecflowResult};

/// Filter tasks by a selection expression, sorted hierarchically
pub fn filter_tasks(tasks: &[ParsedTask], selection: &str) -> SpecflowResult<Vec<ParsedTask>> {
    let trimmed = selection.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") || trimmed == "*" {
        let mut all = tasks.to_vec();
        sort_tasks_hierarchically(&mut all);
        return Ok(all);
    }

    let selected_ids = parse_task_selection(trimmed)?;

    let available: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let invalid: Vec<&str> = selected_ids
        .iter()
        .map(String::as_str)
        .filter(|id| !available.contains(id))
        .collect();
    if !invalid.is_empty() {
        let mut available_sorted: Vec<&str> = available.into_iter().collect();
        available_sorted.sort_unstable();
        return Err(SpecflowError::Selection(format!(
            "task IDs not found: {}. Available task IDs: {}",
            invalid.join(", "),
            available_sorted.join(", ")
        )));
    }

    let wanted: HashSet<&str> = selected_ids.iter().map(String::as_str).collect();
    let mut filtered: Vec<ParsedTask> = tasks
        .iter()
        .filter(|t| wanted.contains(t.id.as_str()))
        .cloned()
        .collect();

    if filtered.is_empty() {
        return Err(SpecflowError::Selection(format!(
            "no tasks match selection criteria: {}",
            selection
        )));
    }

    sort_tasks_hierarchically(&mut filtered);
    Ok(filtered)
}

/// Expand a selection expression into task IDs, deduplicated in order
pub fn parse_task_selection(selection: &str) -> SpecflowResult<Vec<String>> {
    if selection.trim().is_empty() {
        return Err(SpecflowError::Selection("selection cannot be empty".to_string()));
    }

    let mut task_ids = Vec::new();
    let mut seen = HashSet::new();

    for part in selection.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if part.contains('-') {
            if part.matches('-').count() > 1 {
                return Err(SpecflowError::Selection(format!(
                    "invalid range format: '{}' (too many dashes)",
                    part
                )));
            }
            let (start, end) = part
                .split_once('-')
                .map(|(s, e)| (s.trim(), e.trim()))
                .unwrap_or(("", ""));
            if start.is_empty() || end.is_empty() {
                return Err(SpecflowError::Selection(format!(
                    "invalid range format: '{}' (missing start or end)",
                    part
                )));
            }
            for id in generate_task_range(start, end)? {
                if seen.insert(id.clone()) {
                    task_ids.push(id);
                }
            }
        } else if seen.insert(part.to_string()) {
            task_ids.push(part.to_string());
        }
    }

    Ok(task_ids)
}

/// Expand `start-end` into the IDs it covers
///
/// Simple ranges (`1-3`) enumerate top-level tasks; subtask ranges
/// (`2.1-2.3`) require matching parents and vary only the last segment.
pub fn generate_task_range(start: &str, end: &str) -> SpecflowResult<Vec<String>> {
    if !start.contains('.') && !end.contains('.') {
        let start_num = parse_segment(start)?;
        let end_num = parse_segment(end)?;
        if start_num > end_num {
            return Err(SpecflowError::Selection(format!(
                "start ({}) is greater than end ({})",
                start, end
            )));
        }
        return Ok((start_num..=end_num).map(|i| i.to_string()).collect());
    }

    let start_parts = parse_segments(start)?;
    let end_parts = parse_segments(end)?;

    if start_parts.len() != end_parts.len() {
        return Err(SpecflowError::Selection(format!(
            "hierarchy level mismatch between '{}' and '{}'",
            start, end
        )));
    }
    if start_parts[..start_parts.len() - 1] != end_parts[..end_parts.len() - 1] {
        return Err(SpecflowError::Selection(format!(
            "parent task mismatch between '{}' and '{}'",
            start, end
        )));
    }

    let last_start = start_parts[start_parts.len() - 1];
    let last_end = end_parts[end_parts.len() - 1];
    if last_start > last_end {
        return Err(SpecflowError::Selection(format!(
            "start subtask ({}) is greater than end subtask ({})",
            start, end
        )));
    }

    let prefix = start_parts[..start_parts.len() - 1]
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".");
    Ok((last_start..=last_end)
        .map(|i| format!("{}.{}", prefix, i))
        .collect())
}

/// Order tasks so parents come before subtasks: 1, 2, 2.1, 2.2, 3
pub fn sort_tasks_hierarchically(tasks: &mut [ParsedTask]) {
    tasks.sort_by_cached_key(|task| {
        let mut parts: Vec<u32> = task
            .id
            .split('.')
            .map(|p| p.parse().unwrap_or(u32::MAX))
            .collect();
        parts.resize(3, 0);
        parts
    });
}

fn parse_segment(value: &str) -> SpecflowResult<u32> {
    value.parse().map_err(|_| {
        SpecflowError::Selection(format!("non-numeric task ID in range: '{}'", value))
    })
}

fn parse_segments(value: &str) -> SpecflowResult<Vec<u32>> {
    value.split('.').map(parse_segment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> ParsedTask {
        ParsedTask {
            id: id.to_string(),
            description: format!("task {}", id),
            leverage: None,
            requirements: None,
        }
    }

    #[test]
    fn test_all_selection() {
        let tasks = vec![task("2.1"), task("1"), task("2")];
        let filtered = filter_tasks(&tasks, "all").unwrap();
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "2.1"]);

        assert_eq!(filter_tasks(&tasks, "*").unwrap().len(), 3);
    }

    #[test]
    fn test_numeric_range() {
        assert_eq!(generate_task_range("1", "3").unwrap(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_subtask_range() {
        assert_eq!(
            generate_task_range("2.1", "2.3").unwrap(),
            vec!["2.1", "2.2", "2.3"]
        );
    }

    #[test]
    fn test_mixed_selection_dedup() {
        let ids = parse_task_selection("1,3-5,4").unwrap();
        assert_eq!(ids, vec!["1", "3", "4", "5"]);
    }

    #[test]
    fn test_unknown_id_lists_available() {
        let tasks = vec![task("1"), task("2")];
        let err = filter_tasks(&tasks, "7").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("7"));
        assert!(message.contains("Available task IDs: 1, 2"));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(generate_task_range("3", "1").is_err());
        assert!(generate_task_range("2.1", "3.2").is_err());
        assert!(generate_task_range("1", "2.1").is_err());
        assert!(generate_task_range("a", "b").is_err());
        assert!(parse_task_selection("1-2-3").is_err());
        assert!(parse_task_selection("1-").is_err());
        assert!(parse_task_selection("   ").is_err());
    }

    #[test]
    fn test_filter_sorts_hierarchically() {
        let tasks = vec![task("3"), task("2.2"), task("2"), task("2.1"), task("1")];
        let filtered = filter_tasks(&tasks, "2.1-2.2,1,3").unwrap();
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2.1", "2.2", "3"]);
    }
}
