//! Command-line driver: runs the stores against a JSON file standing in for
//! browser storage.
pub mod models;
pub mod run_tool;

pub use models::{Args, Command, Config, ProfileCommand, ScheduleCommand};
pub use run_tool::{get_seed_teacher, read_config, run, RunError};
