//! Workflow installer
//!
//! Creates the `.claude/` directory layout, writes the slash command and
//! template files, and installs the default configuration.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{write_spec_config, SpecConfig};
use crate::migration::{MigrationManager, MigrationSummary};
use crate::slash_commands::all_commands;
use crate::templates::all_templates;
use crate::types::{SpecflowError, SpecflowResult};

/// Subdirectories created under `.claude/`
const CLAUDE_SUBDIRS: &[&str] = &["commands", "specs", "templates", "steering", "bugs"];

pub struct WorkflowSetup {
    project_path: PathBuf,
    claude_dir: PathBuf,
}

impl WorkflowSetup {
    pub fn new(project_path: &Path) -> Self {
        Self {
            project_path: project_path.to_path_buf(),
            claude_dir: project_path.join(".claude"),
        }
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    pub fn claude_directory_exists(&self) -> bool {
        self.claude_dir.exists()
    }

    /// Create the `.claude/` directory tree
    pub fn create_directories(&self) -> SpecflowResult<()> {
        for subdir in CLAUDE_SUBDIRS {
            let dir = self.claude_dir.join(subdir);
            std::fs::create_dir_all(&dir)?;
            debug!(dir = %dir.display(), "created directory");
        }
        Ok(())
    }

    /// Write all slash command files to `.claude/commands/`
    pub fn create_slash_commands(&self) -> SpecflowResult<Vec<String>> {
        let commands_dir = self.claude_dir.join("commands");
        if !commands_dir.exists() {
            return Err(SpecflowError::Setup(
                "commands directory does not exist; run directory setup first".to_string(),
            ));
        }

        let mut written = Vec::new();
        for (file_name, content) in all_commands() {
            std::fs::write(commands_dir.join(file_name), content)?;
            written.push(file_name.to_string());
        }
        Ok(written)
    }

    /// Write all document templates to `.claude/templates/`
    pub fn create_templates(&self) -> SpecflowResult<Vec<String>> {
        let templates_dir = self.claude_dir.join("templates");
        if !templates_dir.exists() {
            return Err(SpecflowError::Setup(
                "templates directory does not exist; run directory setup first".to_string(),
            ));
        }

        let mut written = Vec::new();
        for (file_name, content) in all_templates() {
            std::fs::write(templates_dir.join(file_name), content)?;
            written.push(file_name.to_string());
        }
        Ok(written)
    }

    /// Write the default `spec-config.json`
    pub fn create_config_file(&self) -> SpecflowResult<()> {
        let config_file = self.claude_dir.join("spec-config.json");
        write_spec_config(&config_file, &SpecConfig::default())?;
        Ok(())
    }

    /// Run the complete installation
    pub fn run_setup(&self) -> SpecflowResult<()> {
        self.create_directories()?;
        self.create_slash_commands()?;
        self.create_templates()?;
        self.create_config_file()?;
        Ok(())
    }

    /// Migration report for the project, used by `migration-info`
    pub fn get_migration_info(&self) -> MigrationSummary {
        MigrationManager::new(&self.project_path).migration_summary()
    }
}
