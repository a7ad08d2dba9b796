//! CLI argument parsing.
//!
//! Hand-rolled parser for the erlang-planner CLI. Global options may
//! appear anywhere after the command name; everything else is a
//! positional number.

use std::path::PathBuf;

/// Options accepted by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// YAML configuration file.
    pub config_path: Option<PathBuf>,
    /// Use a one-hour window instead of the configured one.
    pub hourly: bool,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Log solver decisions at debug level.
    pub verbose: bool,
}

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
    /// Global options.
    pub options: GlobalOptions,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Blocking probability of a loss system
    ErlangB {
        /// Trunks.
        servers: f64,
        /// Offered load in Erlangs.
        intensity: f64,
        /// Fraction of blocked callers that retry.
        retry: Option<f64>,
    },
    /// Waiting probability of a delay system
    ErlangC {
        /// Agents.
        servers: f64,
        /// Offered load in Erlangs.
        intensity: f64,
    },
    /// Agents needed for a service level
    Agents {
        /// Target service level.
        sla: f64,
        /// Answer-time threshold in seconds.
        service_time: f64,
        /// Calls per window.
        calls: f64,
        /// Average handling time in seconds.
        aht: f64,
    },
    /// Load a trunk group carries at a blocking target
    Traffic {
        /// Trunks.
        servers: f64,
        /// Target blocking.
        blocking: f64,
    },
    /// Trunks needed for a load at a blocking target
    Trunks {
        /// Offered load in Erlangs.
        intensity: f64,
        /// Target blocking.
        blocking: f64,
    },
    /// Staffing summary for a headcount
    Report {
        /// Agents.
        agents: f64,
        /// Answer-time threshold in seconds.
        service_time: f64,
        /// Calls per window.
        calls: f64,
        /// Average handling time in seconds.
        aht: f64,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        let mut options = GlobalOptions::default();
        let mut retry = None;
        let mut bad_option = false;
        let mut positional: Vec<&str> = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    if let Some(path) = args.get(i + 1) {
                        options.config_path = Some(PathBuf::from(path));
                        i += 2;
                    } else {
                        eprintln!("Error: '--config' requires a file path");
                        i += 1;
                    }
                }
                "--retry" => match args.get(i + 1).map(|r| r.parse::<f64>()) {
                    Some(Ok(r)) => {
                        retry = Some(r);
                        i += 2;
                    }
                    Some(Err(_)) => {
                        eprintln!("Error: '--retry' requires a number, got '{}'", args[i + 1]);
                        bad_option = true;
                        i += 2;
                    }
                    None => {
                        eprintln!("Error: '--retry' requires a number");
                        bad_option = true;
                        i += 1;
                    }
                },
                "--hourly" => {
                    options.hourly = true;
                    i += 1;
                }
                "--json" => {
                    options.json = true;
                    i += 1;
                }
                "-v" | "--verbose" => {
                    options.verbose = true;
                    i += 1;
                }
                other => {
                    positional.push(other);
                    i += 1;
                }
            }
        }

        let command = match positional.first().copied() {
            _ if bad_option => Command::Help,
            None | Some("-h" | "--help" | "help") => Command::Help,
            Some("-V" | "--version" | "version") => Command::Version,
            Some(name) => Self::parse_command(name, &positional[1..], retry),
        };

        Self { command, options }
    }

    /// Parse a numeric command; malformed input falls back to help.
    fn parse_command(name: &str, rest: &[&str], retry: Option<f64>) -> Command {
        let arity = match name {
            "erlang-b" | "erlang-c" | "traffic" | "trunks" => 2,
            "agents" | "report" => 4,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                return Command::Help;
            }
        };

        let Some(v) = parse_numbers(name, rest, arity) else {
            return Command::Help;
        };

        match name {
            "erlang-b" => Command::ErlangB {
                servers: v[0],
                intensity: v[1],
                retry,
            },
            "erlang-c" => Command::ErlangC {
                servers: v[0],
                intensity: v[1],
            },
            "traffic" => Command::Traffic {
                servers: v[0],
                blocking: v[1],
            },
            "trunks" => Command::Trunks {
                intensity: v[0],
                blocking: v[1],
            },
            "agents" => Command::Agents {
                sla: v[0],
                service_time: v[1],
                calls: v[2],
                aht: v[3],
            },
            _ => Command::Report {
                agents: v[0],
                service_time: v[1],
                calls: v[2],
                aht: v[3],
            },
        }
    }
}

/// Parse exactly `arity` numbers.
fn parse_numbers(command: &str, rest: &[&str], arity: usize) -> Option<Vec<f64>> {
    if rest.len() != arity {
        eprintln!("Error: '{command}' takes {arity} numeric arguments, got {}", rest.len());
        return None;
    }
    let mut values = Vec::with_capacity(arity);
    for raw in rest {
        match raw.parse::<f64>() {
            Ok(v) => values.push(v),
            Err(_) => {
                eprintln!("Error: '{raw}' is not a number");
                return None;
            }
        }
    }
    Some(values)
}
