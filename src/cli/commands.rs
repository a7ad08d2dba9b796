//! CLI command handlers.
//!
//! Commands call the typed API so that a failure is reported as an error
//! message and a non-zero exit code, not as a silent zero.

use std::fmt::Display;
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::args::GlobalOptions;
use super::output::{format_value, print_help, print_report, print_version};
use super::{Args, Command};
use crate::config::{ErlangConfig, HOUR_SECS};
use crate::engine::recurrence::{erlang_b, erlang_b_ext, erlang_c};
use crate::error::ErlangResult;
use crate::metrics::StaffingReport;
use crate::solvers::{agents, nb_trunks, traffic};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    init_tracing(args.options.verbose);

    let (name, result) = match args.command {
        Command::Help => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            print_version();
            return ExitCode::SUCCESS;
        }
        command => {
            let name = command_name(&command);
            (name, execute(&command, &args.options))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {name}: {e}");
            ExitCode::from(1)
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "erlang_planner=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Settings from `--config` and `--hourly`.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or is
/// invalid.
pub fn resolve_config(options: &GlobalOptions) -> ErlangResult<ErlangConfig> {
    let mut config = match &options.config_path {
        Some(path) => ErlangConfig::load(path)?,
        None => ErlangConfig::default(),
    };
    if options.hourly {
        config.time_interval = HOUR_SECS;
    }
    debug!(?config, "resolved configuration");
    Ok(config)
}

/// Run one numeric command.
///
/// # Errors
///
/// Returns the first error from configuration loading or evaluation.
pub fn execute(command: &Command, options: &GlobalOptions) -> ErlangResult<()> {
    let config = resolve_config(options)?;
    let name = command_name(command);
    match *command {
        Command::ErlangB {
            servers,
            intensity,
            retry,
        } => {
            let b = match retry {
                Some(r) => erlang_b_ext(servers, intensity, r)?,
                None => erlang_b(servers, intensity)?,
            };
            emit(name, &b, options.json);
        }
        Command::ErlangC { servers, intensity } => {
            emit(name, &erlang_c(servers, intensity)?, options.json);
        }
        Command::Agents {
            sla,
            service_time,
            calls,
            aht,
        } => {
            emit(name, &agents(&config, sla, service_time, calls, aht)?, options.json);
        }
        Command::Traffic { servers, blocking } => {
            emit(name, &traffic(&config, servers, blocking)?, options.json);
        }
        Command::Trunks {
            intensity,
            blocking,
        } => {
            emit(name, &nb_trunks(&config, intensity, blocking)?, options.json);
        }
        Command::Report {
            agents,
            service_time,
            calls,
            aht,
        } => {
            let report = StaffingReport::evaluate(&config, agents, service_time, calls, aht)?;
            print_report(&report, &config, options.json);
        }
        Command::Help | Command::Version => {}
    }
    Ok(())
}

fn emit<T: Display + serde::Serialize>(name: &str, value: &T, json: bool) {
    println!("{}", format_value(name, value, json));
}

/// Command name as typed on the command line.
#[must_use]
pub const fn command_name(command: &Command) -> &'static str {
    match command {
        Command::ErlangB { .. } => "erlang-b",
        Command::ErlangC { .. } => "erlang-c",
        Command::Agents { .. } => "agents",
        Command::Traffic { .. } => "traffic",
        Command::Trunks { .. } => "trunks",
        Command::Report { .. } => "report",
        Command::Help => "help",
        Command::Version => "version",
    }
}
