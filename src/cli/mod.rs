//! CLI module for erlang-planner.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, GlobalOptions};
pub use commands::{command_name, execute, resolve_config, run_cli};
pub use output::{
    format_report, format_value, print_help, print_report, print_version, version_string,
};
