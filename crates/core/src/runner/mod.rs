//! Automated sequential task execution

pub mod executor;
pub mod models;
pub mod selection;

pub use executor::AutoRunner;
pub use models::{
    AutoRunOptions, AutoRunResult, ExecutionMode, ExecutionState, SpecContext, TaskResult,
    TaskStatus,
};
