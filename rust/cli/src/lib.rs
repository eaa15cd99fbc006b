//! # Cribbage CLI Library
//!
//! This library provides the command-line interface for the cribbage
//! engine. It exposes subcommands for playing, simulating, scoring, and
//! inspecting cribbage hands.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["cribbage", "deal", "--seed", "42"];
//! let code = cribbage_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `cfg`: Display current configuration settings
//! - `deal`: Deal a single hand for inspection
//! - `score`: Score four cards against a cut card
//! - `play`: Play matches against the baseline bot
//! - `sim`: Run bot-vs-bot simulations and generate game histories
//! - `stats`: Aggregate statistics from JSONL game history files
//! - `rng`: Verify RNG properties

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, CribbageCli};

use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_rng_command,
    handle_score_command, handle_sim_command, handle_stats_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["cribbage", "score", "--cards", "5H,5D,5S,JC", "--cut", "5C"];
/// let code = cribbage_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["cfg", "deal", "score", "play", "sim", "stats", "rng"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = CribbageCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    // Print clap error first
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Cribbage CLI").is_err()
                        || writeln!(err, "Usage: cribbage <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: cribbage --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Cfg => report(handle_cfg_command(out, err), err),
            Commands::Deal { seed, players } => {
                report(handle_deal_command(seed, players, out), err)
            }
            Commands::Score { cards, cut, crib } => {
                report(handle_score_command(&cards, &cut, crib, out, err), err)
            }
            Commands::Play { games, seed } => {
                // Use stdin for real input (supports both TTY and piped stdin)
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                report(
                    handle_play_command(games, seed, out, err, &mut stdin_lock),
                    err,
                )
            }
            Commands::Sim {
                games,
                output,
                seed,
            } => match handle_sim_command(games, output, seed, out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Stats { input } => report(handle_stats_command(input, out, err), err),
            Commands::Rng { seed } => report(handle_rng_command(seed, out), err),
        },
    }
}

fn report(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}
