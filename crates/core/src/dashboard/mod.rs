//! Project status dashboard

pub mod parser;
pub mod watcher;

pub use parser::{SpecParser, SpecPhase, SpecStatus, SteeringStatus};
pub use watcher::{DashboardWatcher, WatchEvent};
