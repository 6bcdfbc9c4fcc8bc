//! Migration checks for existing `.claude/` installations
//!
//! Earlier releases of the workflow shipped as a Node.js package. This
//! module detects existing installations, summarizes the specs and bugs
//! they contain, validates compatibility, and can back the directory up
//! before setup overwrites anything.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::{parse_spec_config, SpecConfig};
use crate::types::SpecflowResult;

/// Legacy package name looked up in package.json dependencies
const LEGACY_PACKAGE: &str = "claude-code-spec-workflow";

/// Directories whose presence marks an existing installation
const KEY_DIRS: &[&str] = &["commands", "specs", "templates"];

/// Files removed in newer versions that indicate a stale installation
const DEPRECATED_ENTRIES: &[&str] = &["CLAUDE.md", "scripts"];

/// Summary of a single spec directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecSummary {
    pub name: String,
    pub path: PathBuf,
    pub phase: String,
    pub files: Vec<String>,
}

/// Summary of a single bug directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugSummary {
    pub name: String,
    pub path: PathBuf,
    pub phase: String,
    pub files: Vec<String>,
}

/// Aggregate migration report, serializable for `--format json|yaml`
#[derive(Debug, Serialize)]
pub struct MigrationSummary {
    pub has_existing_claude: bool,
    pub has_node_installation: bool,
    pub existing_specs: Vec<SpecSummary>,
    pub existing_bugs: Vec<BugSummary>,
    pub is_compatible: bool,
    pub issues: Vec<String>,
}

pub struct MigrationManager {
    project_path: PathBuf,
    claude_dir: PathBuf,
}

impl MigrationManager {
    pub fn new(project_path: &Path) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            claude_dir: project_path.join(".claude"),
        }
    }

    /// Check for an existing installation with the expected structure
    pub fn has_existing_claude_directory(&self) -> bool {
        if !self.claude_dir.exists() {
            return false;
        }
        KEY_DIRS
            .iter()
            .any(|dir| self.claude_dir.join(dir).exists())
    }

    /// Detect the legacy Node.js package in package.json dependencies
    pub fn detect_node_installation(&self) -> bool {
        let package_json = self.project_path.join("package.json");
        let Ok(content) = std::fs::read_to_string(&package_json) else {
            return false;
        };
        let Ok(data) = serde_json::from_str::<Value>(&content) else {
            return false;
        };

        ["dependencies", "devDependencies"].iter().any(|section| {
            data.get(section)
                .and_then(|deps| deps.get(LEGACY_PACKAGE))
                .is_some()
        })
    }

    /// Read the existing `spec-config.json`, if any
    pub fn read_existing_config(&self) -> Option<SpecConfig> {
        let config_file = self.claude_dir.join("spec-config.json");
        let content = std::fs::read_to_string(&config_file).ok()?;
        match parse_spec_config(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(error = %e, "could not parse existing spec-config.json");
                None
            }
        }
    }

    /// Summaries of existing specs under `.claude/specs/`
    pub fn get_existing_specs(&self) -> Vec<SpecSummary> {
        self.collect_summaries(
            "specs",
            &["requirements.md", "design.md", "tasks.md"],
            &[
                ("requirements.md", "requirements"),
                ("design.md", "design"),
                ("tasks.md", "tasks"),
            ],
        )
        .into_iter()
        .map(|(name, path, phase, files)| SpecSummary {
            name,
            path,
            phase,
            files,
        })
        .collect()
    }

    /// Summaries of existing bug reports under `.claude/bugs/`
    pub fn get_existing_bugs(&self) -> Vec<BugSummary> {
        self.collect_summaries(
            "bugs",
            &["report.md", "analysis.md", "verification.md"],
            &[
                ("report.md", "report"),
                ("analysis.md", "analysis"),
                ("verification.md", "verification"),
            ],
        )
        .into_iter()
        .map(|(name, path, phase, files)| BugSummary {
            name,
            path,
            phase,
            files,
        })
        .collect()
    }

    /// Scan a subdirectory of entries, deriving the phase from the latest
    /// phase file present. Entries with no phase files are skipped.
    fn collect_summaries(
        &self,
        subdir: &str,
        known_files: &[&str],
        phases: &[(&str, &str)],
    ) -> Vec<(String, PathBuf, String, Vec<String>)> {
        let dir = self.claude_dir.join(subdir);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut summaries = Vec::new();

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();

            let mut files = Vec::new();
            let mut phase = "unknown".to_string();

            for file_name in known_files {
                if path.join(file_name).exists() {
                    files.push(file_name.to_string());
                    if let Some((_, phase_name)) =
                        phases.iter().find(|(marker, _)| marker == file_name)
                    {
                        phase = phase_name.to_string();
                    }
                }
            }

            // status.json, when readable, overrides the file-derived phase
            let status_file = path.join("status.json");
            if status_file.exists() {
                files.push("status.json".to_string());
                if let Some(status_phase) = read_status_phase(&status_file) {
                    phase = status_phase;
                }
            }

            if !files.is_empty() {
                summaries.push((name, path, phase, files));
            }
        }

        summaries.sort_by(|a, b| a.0.cmp(&b.0));
        summaries
    }

    /// Validate that an existing installation is compatible
    pub fn validate_compatibility(&self) -> (bool, Vec<String>) {
        if !self.has_existing_claude_directory() {
            return (true, Vec::new());
        }

        let mut issues = Vec::new();

        for dir_name in KEY_DIRS {
            if !self.claude_dir.join(dir_name).exists() {
                issues.push(format!("Missing required directory: {}", dir_name));
            }
        }

        let config_file = self.claude_dir.join("spec-config.json");
        if config_file.exists() {
            let valid = std::fs::read_to_string(&config_file)
                .ok()
                .and_then(|content| serde_json::from_str::<Value>(&content).ok())
                .map(|data| data.get("spec_workflow").is_some())
                .unwrap_or(false);
            if !valid {
                issues.push("Invalid spec-config.json format".to_string());
            }
        }

        for entry in DEPRECATED_ENTRIES {
            if self.claude_dir.join(entry).exists() {
                issues.push(format!("Deprecated file/directory found: {}", entry));
            }
        }

        (issues.is_empty(), issues)
    }

    /// Copy the existing `.claude` directory to `.claude<suffix>`
    pub fn backup_existing_data(&self, suffix: &str) -> SpecflowResult<Option<PathBuf>> {
        if !self.has_existing_claude_directory() {
            return Ok(None);
        }

        let backup_dir = self.project_path.join(format!(".claude{}", suffix));
        copy_dir_recursive(&self.claude_dir, &backup_dir)?;
        Ok(Some(backup_dir))
    }

    /// Full migration report
    pub fn migration_summary(&self) -> MigrationSummary {
        let (is_compatible, issues) = self.validate_compatibility();

        MigrationSummary {
            has_existing_claude: self.has_existing_claude_directory(),
            has_node_installation: self.detect_node_installation(),
            existing_specs: self.get_existing_specs(),
            existing_bugs: self.get_existing_bugs(),
            is_compatible,
            issues,
        }
    }
}

/// Phase recorded in a `status.json`, None when missing or malformed
fn read_status_phase(status_file: &Path) -> Option<String> {
    let content = std::fs::read_to_string(status_file).ok()?;
    match serde_json::from_str::<Value>(&content) {
        Ok(data) => data
            .get("phase")
            .and_then(Value::as_str)
            .map(str::to_string),
        Err(e) => {
            warn!(path = %status_file.display(), error = %e, "ignoring malformed status.json");
            None
        }
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> SpecflowResult<()> {
    std::fs::create_dir_all(dst)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_spec(root: &Path, name: &str, files: &[&str]) {
        let spec_dir = root.join(".claude").join("specs").join(name);
        std::fs::create_dir_all(&spec_dir).unwrap();
        for file in files {
            std::fs::write(spec_dir.join(file), "content").unwrap();
        }
    }

    #[test]
    fn test_no_claude_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = MigrationManager::new(temp_dir.path());

        assert!(!manager.has_existing_claude_directory());
        let (compatible, issues) = manager.validate_compatibility();
        assert!(compatible);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_spec_phase_derivation() {
        let temp_dir = tempfile::tempdir().unwrap();
        make_spec(temp_dir.path(), "alpha", &["requirements.md"]);
        make_spec(temp_dir.path(), "beta", &["requirements.md", "design.md", "tasks.md"]);

        let manager = MigrationManager::new(temp_dir.path());
        let specs = manager.get_existing_specs();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "alpha");
        assert_eq!(specs[0].phase, "requirements");
        assert_eq!(specs[1].name, "beta");
        assert_eq!(specs[1].phase, "tasks");
    }

    #[test]
    fn test_status_json_overrides_phase() {
        let temp_dir = tempfile::tempdir().unwrap();
        make_spec(temp_dir.path(), "alpha", &["requirements.md"]);
        let spec_dir = temp_dir.path().join(".claude").join("specs").join("alpha");
        std::fs::write(spec_dir.join("status.json"), r#"{"phase": "design"}"#).unwrap();

        let manager = MigrationManager::new(temp_dir.path());
        let specs = manager.get_existing_specs();

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].phase, "design");
        assert!(specs[0].files.contains(&"status.json".to_string()));
    }

    #[test]
    fn test_malformed_status_json_keeps_derived_phase() {
        let temp_dir = tempfile::tempdir().unwrap();
        make_spec(temp_dir.path(), "alpha", &["requirements.md"]);
        let spec_dir = temp_dir.path().join(".claude").join("specs").join("alpha");
        std::fs::write(spec_dir.join("status.json"), "not json").unwrap();

        let manager = MigrationManager::new(temp_dir.path());
        let specs = manager.get_existing_specs();

        assert_eq!(specs[0].phase, "requirements");
    }

    #[test]
    fn test_empty_spec_dirs_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let empty = temp_dir
            .path()
            .join(".claude")
            .join("specs")
            .join("empty");
        std::fs::create_dir_all(&empty).unwrap();

        let manager = MigrationManager::new(temp_dir.path());
        assert!(manager.get_existing_specs().is_empty());
    }

    #[test]
    fn test_detect_node_installation() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("package.json"),
            r#"{"devDependencies": {"claude-code-spec-workflow": "^1.0.0"}}"#,
        )
        .unwrap();

        let manager = MigrationManager::new(temp_dir.path());
        assert!(manager.detect_node_installation());
    }

    #[test]
    fn test_compatibility_issues() {
        let temp_dir = tempfile::tempdir().unwrap();
        let claude_dir = temp_dir.path().join(".claude");
        std::fs::create_dir_all(claude_dir.join("commands")).unwrap();
        std::fs::write(claude_dir.join("CLAUDE.md"), "stale").unwrap();
        std::fs::write(claude_dir.join("spec-config.json"), r#"{"other": 1}"#).unwrap();

        let manager = MigrationManager::new(temp_dir.path());
        let (compatible, issues) = manager.validate_compatibility();

        assert!(!compatible);
        assert!(issues.iter().any(|i| i.contains("specs")));
        assert!(issues.iter().any(|i| i.contains("templates")));
        assert!(issues.iter().any(|i| i.contains("CLAUDE.md")));
        assert!(issues.iter().any(|i| i.contains("spec-config.json")));
    }

    #[test]
    fn test_backup_copies_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        make_spec(temp_dir.path(), "alpha", &["requirements.md"]);
        std::fs::create_dir_all(temp_dir.path().join(".claude").join("commands")).unwrap();

        let manager = MigrationManager::new(temp_dir.path());
        let backup = manager.backup_existing_data(".backup").unwrap().unwrap();

        assert!(backup.ends_with(".claude.backup"));
        assert!(backup
            .join("specs")
            .join("alpha")
            .join("requirements.md")
            .exists());
    }
}
