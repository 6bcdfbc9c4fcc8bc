//! File watching for live dashboard refresh
//!
//! Watches the `.claude/` directory recursively and emits a debounced
//! event whenever a spec, bug, or steering document changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use tokio::sync::mpsc;
use tracing::debug;

use crate::types::{SpecflowError, SpecflowResult};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// A change under `.claude/` relevant to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
}

pub struct DashboardWatcher;

impl DashboardWatcher {
    /// Watch a project's `.claude/` directory for changes
    ///
    /// Returns a receiver of debounced change events. The watcher runs
    /// until the receiver is dropped.
    pub fn watch(project_root: &Path) -> SpecflowResult<mpsc::Receiver<WatchEvent>> {
        let claude_dir = project_root.join(".claude");
        if !claude_dir.exists() {
            return Err(SpecflowError::Watch(format!(
                "no .claude directory found at {}",
                claude_dir.display()
            )));
        }

        let (tx, rx) = mpsc::channel(100);

        let mut debouncer = new_debouncer(
            DEBOUNCE,
            move |res: notify_debouncer_mini::DebounceEventResult| {
                if let Ok(events) = res {
                    for event in events {
                        if is_relevant(&event.path)
                            && tx.blocking_send(WatchEvent { path: event.path }).is_err()
                        {
                            // Receiver dropped, nothing left to notify
                            return;
                        }
                    }
                }
            },
        )
        .map_err(|e| SpecflowError::Watch(format!("failed to create file watcher: {e}")))?;

        debouncer
            .watcher()
            .watch(&claude_dir, RecursiveMode::Recursive)
            .map_err(|e| {
                SpecflowError::Watch(format!("failed to watch {}: {e}", claude_dir.display()))
            })?;

        // Pick up branch switches and new commits for the git info line
        for git_path in git_watch_paths(project_root) {
            if let Err(e) = debouncer
                .watcher()
                .watch(&git_path, RecursiveMode::NonRecursive)
            {
                debug!(path = %git_path.display(), error = %e, "could not watch git path");
            }
        }

        // The debouncer stops watching when dropped, so park it in a task
        // that lives as long as the process
        tokio::spawn(async move {
            let _debouncer = debouncer;
            std::future::pending::<()>().await;
        });

        Ok(rx)
    }
}

/// `.git/HEAD` plus, for a symbolic HEAD, the branch ref it points to
fn git_watch_paths(project_root: &Path) -> Vec<PathBuf> {
    let git_dir = project_root.join(".git");
    let head = git_dir.join("HEAD");
    if !head.exists() {
        return Vec::new();
    }

    let mut paths = vec![head.clone()];
    if let Ok(content) = std::fs::read_to_string(&head) {
        if let Some(reference) = content.trim().strip_prefix("ref: ") {
            let ref_path = git_dir.join(reference);
            if ref_path.exists() {
                paths.push(ref_path);
            }
        }
    }
    paths
}

/// Markdown documents and status files drive the dashboard; editor
/// temp files and the runner's state file do not. Git paths are only
/// watched selectively, so any event under `.git/` is relevant.
fn is_relevant(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if path.components().any(|c| c.as_os_str() == ".git") {
        return true;
    }
    if name.starts_with('.') || name.ends_with('~') || name.ends_with(".swp") {
        return false;
    }
    name.ends_with(".md") || name.ends_with(".json")
}
