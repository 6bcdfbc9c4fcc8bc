//! Git repository inspection
//!
//! Shells out to the `git` CLI for branch, remote, and cleanliness checks.
//! A directory that is not a repository yields empty info rather than an
//! error, since the workflow works fine without version control.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tokio::process::Command;

/// Repository information for dashboard and workflow context
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GitInfo {
    pub branch: Option<String>,
    pub remote_url: Option<String>,
    pub github_url: Option<String>,
    pub head_commit: Option<String>,
}

pub struct GitUtils {
    project_path: PathBuf,
}

impl GitUtils {
    pub fn new(project_path: &Path) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
        }
    }

    async fn git_output(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.project_path)
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Current branch name, None when detached or not a repository
    pub async fn current_branch(&self) -> Option<String> {
        let branch = self.git_output(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        if branch == "HEAD" {
            // Detached HEAD
            None
        } else {
            Some(branch)
        }
    }

    /// URL of the `origin` remote
    pub async fn remote_url(&self) -> Option<String> {
        self.git_output(&["remote", "get-url", "origin"]).await
    }

    /// Short hash of the current HEAD commit
    pub async fn head_commit(&self) -> Option<String> {
        self.git_output(&["rev-parse", "--short", "HEAD"]).await
    }

    /// True when there are no uncommitted changes (or no repository at all)
    pub async fn is_repo_clean(&self) -> bool {
        let output = Command::new("git")
            .args(["status", "--porcelain"])
            .current_dir(&self.project_path)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => output.stdout.is_empty(),
            _ => true,
        }
    }

    /// Gather branch, remote, and web URL in one call
    pub async fn get_git_info(&self) -> GitInfo {
        let branch = self.current_branch().await;
        let remote_url = self.remote_url().await;
        let head_commit = self.head_commit().await;
        let github_url = remote_url.as_deref().and_then(convert_to_github_url);

        GitInfo {
            branch,
            remote_url,
            github_url,
            head_commit,
        }
    }
}

fn host_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        #[allow(clippy::expect_used)]
        let compile = |pattern: &str| Regex::new(pattern).expect("valid regex");
        vec![
            (compile(r"^git@github\.com:(.+?)(?:\.git)?$"), "https://github.com/"),
            (compile(r"^https://github\.com/(.+?)(?:\.git)?$"), "https://github.com/"),
            (compile(r"^git@gitlab\.com:(.+?)(?:\.git)?$"), "https://gitlab.com/"),
            (compile(r"^https://gitlab\.com/(.+?)(?:\.git)?$"), "https://gitlab.com/"),
            (compile(r"^git@bitbucket\.org:(.+?)(?:\.git)?$"), "https://bitbucket.org/"),
            (compile(r"^https://bitbucket\.org/(.+?)(?:\.git)?$"), "https://bitbucket.org/"),
        ]
    })
}

/// Convert an SSH or HTTPS remote URL to a browsable web URL
///
/// Returns None for hosts other than GitHub, GitLab, and Bitbucket.
pub fn convert_to_github_url(remote_url: &str) -> Option<String> {
    for (pattern, base) in host_patterns() {
        if let Some(captures) = pattern.captures(remote_url) {
            return Some(format!("{}{}", base, &captures[1]));
        }
    }
    None
}
