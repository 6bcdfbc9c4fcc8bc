use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Specflow - A spec-driven development workflow for Claude Code
#[derive(Parser)]
#[command(name = "specflow")]
#[command(about = "Spec-driven development workflow for Claude Code")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the workflow into a project's .claude/ directory
    Setup {
        /// Path to the project root (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
        /// Overwrite an existing .claude/ directory
        #[arg(short, long)]
        force: bool,
        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },
    /// Verify the installation and the Claude Code CLI
    Test {
        /// Path to the project root (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
    /// Report on existing workflow installations before setup
    MigrationInfo {
        /// Path to the project root (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
        /// Output format
        #[arg(long, default_value = "summary")]
        format: commands::migration::OutputFormat,
    },
    /// Generate per-task slash commands from a spec's tasks.md
    GenerateTaskCommands {
        /// Name of the specification
        spec_name: String,
        /// Path to the project root (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
    /// Execute a spec's pending tasks via Claude Code
    AutoRunTasks {
        /// Name of the specification
        spec_name: String,
        /// Path to the project root (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
        /// Execution mode: automatic or interactive
        #[arg(long, default_value = "automatic")]
        mode: String,
        /// Task selection, e.g. "all", "1-3", "2,4", "2.1-2.3"
        #[arg(long, default_value = "all")]
        tasks: String,
        /// Keep executing remaining tasks after a failure
        #[arg(long)]
        continue_on_error: bool,
        /// Resume execution starting from this task ID
        #[arg(long)]
        resume_from: Option<String>,
        /// Suppress per-task progress detail
        #[arg(long)]
        no_progress: bool,
    },
    /// Show the status of all specs in the project
    Dashboard {
        /// Path to the project root (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
        /// Render once and exit instead of watching for changes
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Setup {
            project,
            force,
            yes,
        } => commands::setup::execute(&project, force, yes).await,
        Commands::Test { project } => commands::test::execute(&project).await,
        Commands::MigrationInfo { project, format } => {
            commands::migration::execute(&project, format)
        }
        Commands::GenerateTaskCommands { spec_name, project } => {
            commands::generate::execute(&project, &spec_name)
        }
        Commands::AutoRunTasks {
            spec_name,
            project,
            mode,
            tasks,
            continue_on_error,
            resume_from,
            no_progress,
        } => {
            commands::auto_run::execute(commands::auto_run::AutoRunArgs {
                project,
                spec_name,
                mode,
                tasks,
                continue_on_error,
                resume_from,
                no_progress,
            })
            .await
        }
        Commands::Dashboard { project, once } => {
            commands::dashboard::execute(&project, once).await
        }
    }
}
