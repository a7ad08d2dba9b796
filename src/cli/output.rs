//! CLI output formatting.
//!
//! Formatting is split from printing so the text and JSON renderings can
//! be tested without capturing stdout.

use std::fmt::Display;

use serde_json::json;
use tracing::warn;

use crate::config::ErlangConfig;
use crate::metrics::StaffingReport;

/// Version string, with the git hash when the build captured one.
#[must_use]
pub fn version_string() -> String {
    let version = env!("ERLANG_PLANNER_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            let short = hash.get(..8).unwrap_or(hash);
            format!("erlang-planner {version} ({short})")
        }
        _ => format!("erlang-planner {version}"),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"erlang-planner - Erlang B/C and Engset capacity planning

USAGE:
    erlang-planner <COMMAND> [ARGS] [OPTIONS]

COMMANDS:
    erlang-b <servers> <erlangs>          Blocking probability
        --retry <R>                       Fraction of blocked callers that retry
    erlang-c <servers> <erlangs>          Probability of queueing
    agents <sla> <secs> <calls> <aht>     Agents to answer <sla> within <secs>
    traffic <servers> <blocking>          Erlangs a trunk group carries
    trunks <erlangs> <blocking>           Trunks for a load
    report <agents> <secs> <calls> <aht>  Staffing summary for a headcount

    help                                  Show this help message
    version                               Show version information

OPTIONS:
    --config <file.yaml>                  Load settings from YAML
    --hourly                              Calls are per hour (default: per 30 minutes)
    --json                                Print JSON
    -v, --verbose                         Log solver steps (RUST_LOG overrides)

EXAMPLES:
    erlang-planner erlang-b 10 5
    erlang-planner agents 0.8 20 100 300
    erlang-planner report 21 20 200 300 --hourly --json
"
    );
}

/// Render one computed value.
#[must_use]
pub fn format_value<T>(command: &str, value: &T, json: bool) -> String
where
    T: Display + serde::Serialize,
{
    if json {
        json!({ "command": command, "result": value }).to_string()
    } else {
        format!("{command}: {value}")
    }
}

/// Render a staffing report. Falls back to text if JSON rendering fails.
#[must_use]
pub fn format_report(report: &StaffingReport, config: &ErlangConfig, json: bool) -> String {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(out) => return out,
            Err(error) => warn!(%error, "JSON rendering failed, printing text"),
        }
    }
    let window_mins = config.time_interval / 60.0;
    let mut out = String::new();
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    out.push_str(&format!(
        "Agents: {}   Calls: {} per {window_mins} min   AHT: {} s\n",
        report.agents, report.calls_per_hour, report.aht
    ));
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    out.push_str(&format!("  Traffic:       {:.3} Erlangs\n", report.traffic_erlangs));
    out.push_str(&format!("  Utilisation:   {:.1}%\n", report.utilisation * 100.0));
    out.push_str(&format!(
        "  Service level: {:.1}% within {} s\n",
        report.service_level * 100.0,
        report.service_time
    ));
    out.push_str(&format!("  Queued:        {:.1}%\n", report.queued * 100.0));
    out.push_str(&format!("  ASA:           {} s\n", report.asa_secs));
    out.push_str(&format!("  Queue time:    {} s\n", report.queue_time_secs));
    out.push_str(&format!("  Queue size:    {} calls\n", report.queue_size));
    out.push_str(&format!("  Trunks:        {}\n", report.trunks));
    out
}

/// Print a staffing report.
pub fn print_report(report: &StaffingReport, config: &ErlangConfig, json: bool) {
    println!("{}", format_report(report, config, json));
}
