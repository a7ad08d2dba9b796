//! erlang-planner CLI
//!
//! Command-line front end for Erlang B/C and Engset capacity planning.

use std::process::ExitCode;

use erlang_planner::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
