//! Claude Code CLI integration
//!
//! Locates the `claude` executable across platforms and runs slash commands
//! through it. The auto-runner drives task execution exclusively through
//! this module.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::types::{SpecflowError, SpecflowResult};

/// Output of a slash command invocation
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Well-known install locations, probed before falling back to PATH
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        if cfg!(windows) {
            paths.push(home.join(".claude").join("local").join("claude.exe"));
            paths.push(home.join("AppData").join("Local").join("claude").join("claude.exe"));
            paths.push(home.join("AppData").join("Roaming").join("claude").join("claude.exe"));
        } else {
            paths.push(home.join(".claude").join("local").join("claude"));
        }
    }

    if cfg!(windows) {
        paths.push(PathBuf::from("C:\\Program Files\\claude\\claude.exe"));
        paths.push(PathBuf::from("C:\\Program Files (x86)\\claude\\claude.exe"));
    } else {
        paths.push(PathBuf::from("/usr/local/bin/claude"));
        paths.push(PathBuf::from("/usr/bin/claude"));
        paths.push(PathBuf::from("/opt/claude/claude"));
        if cfg!(target_os = "macos") {
            paths.push(PathBuf::from("/opt/homebrew/bin/claude"));
        }
    }

    paths
}

async fn probe(executable: &Path) -> bool {
    Command::new(executable)
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Find a usable `claude` executable
///
/// Probes well-known install locations first, then falls back to whatever
/// is on PATH. Each candidate is verified by running `--version`.
pub async fn find_claude_executable() -> Option<PathBuf> {
    for path in candidate_paths() {
        if path.exists() && probe(&path).await {
            debug!(path = %path.display(), "found claude executable");
            return Some(path);
        }
    }

    // PATH-based installation
    let path_candidate = PathBuf::from("claude");
    if probe(&path_candidate).await {
        debug!("found claude executable on PATH");
        return Some(path_candidate);
    }

    None
}

/// Check whether Claude Code is installed and responsive
pub async fn validate_claude_code() -> bool {
    find_claude_executable().await.is_some()
}

/// Run a slash command (e.g. `/my-spec-task-1`) in a project directory
///
/// The command is passed as a prompt in print mode with edits accepted
/// automatically, which is how generated task commands are meant to run
/// non-interactively.
pub async fn run_slash_command(
    executable: &Path,
    project_root: &Path,
    command: &str,
    timeout: Duration,
) -> SpecflowResult<CommandOutput> {
    let child = Command::new(executable)
        .arg("-p")
        .arg(command)
        .arg("--permission-mode")
        .arg("acceptEdits")
        .current_dir(project_root)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .map_err(|e| SpecflowError::Claude(format!("Failed to launch claude: {}", e)))?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| {
            SpecflowError::Claude(format!(
                "Command '{}' timed out after {}s",
                command,
                timeout.as_secs()
            ))
        })?
        .map_err(|e| SpecflowError::Claude(format!("Failed to run claude: {}", e)))?;

    Ok(CommandOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
