//! Specflow Core Library
//!
//! This is the core library for the Specflow spec-driven development tool. It
//! provides all the business logic for workflow setup, spec and task parsing,
//! automated task execution, and project status reporting.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`setup`] - Installs the `.claude/` workflow directory into a project
//! - [`slash_commands`] - The built-in slash command definitions
//! - [`templates`] - Document templates for specs, steering, and bug reports
//! - [`tasks`] - Task list parsing and per-task command generation
//! - [`runner`] - Automated task execution with resumable state
//! - [`dashboard`] - Spec status parsing and live file watching
//! - [`migration`] - Detection of legacy workflow installations
//! - [`steering`] - Steering document discovery
//! - [`claude`] - Claude Code CLI integration
//! - [`config`] - The `spec-config.json` configuration file
//! - [`project`] - Project root and directory helpers
//! - [`git`] - Git repository helpers
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! Installing the workflow into a project:
//!
//! ```rust,no_run
//! use specflow_core::setup::WorkflowSetup;
//! use std::path::Path;
//!
//! # fn example() -> specflow_core::types::SpecflowResult<()> {
//! let setup = WorkflowSetup::new(Path::new("."));
//! setup.run_setup()?;
//! # Ok(())
//! # }
//! ```

pub mod claude;
pub mod config;
pub mod dashboard;
pub mod git;
pub mod migration;
pub mod project;
pub mod runner;
pub mod setup;
pub mod slash_commands;
pub mod steering;
pub mod tasks;
pub mod templates;
pub mod types;

// Re-export the main types for easier usage
pub use setup::WorkflowSetup;
pub use types::{SpecflowError, SpecflowResult};
