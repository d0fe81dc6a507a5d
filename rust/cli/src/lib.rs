//! # Hold'em CLI Library
//!
//! Command-line front end for the Hold'em engine and its AI strategies.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves the configuration (defaults, the
//! `HOLDEM_CONFIG` TOML file, `HOLDEM_*` environment variables, then flags)
//! and dispatches to a subcommand. It returns the process exit status.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--hands", "50", "--lineup", "kelly,montecarlo"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: play at a table against AI opponents
//! - `sim`: all-AI simulation with per-strategy statistics and JSONL output
//! - `eval`: two strategies heads-up over duplicate deals
//! - `deal`: deal and show a single seeded hand
//! - `strategies`: list the registered strategies
//! - `cfg`: show the resolved configuration

use std::io::Write;

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli, TableArgs, COMMANDS};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command, handle_strategies_command, overrides, SimOptions,
};
use config::Config;
pub use error::CliError;

fn usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Hold'em CLI")?;
    writeln!(err, "Usage: holdem <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem --help")
}

fn load(table: &TableArgs, think_delay_ms: Option<u64>) -> Result<Config, CliError> {
    Ok(config::load_with_overrides(&overrides(table, think_delay_ms))?.config)
}

fn warn_unused_lineup(
    config: &Config,
    ai_seats: usize,
    err: &mut dyn Write,
) -> std::io::Result<()> {
    if config.lineup.len() > ai_seats {
        ui::display_warning(
            err,
            &format!(
                "lineup lists {} strategies but the table has {} AI seats; the rest are unused",
                config.lineup.len(),
                ai_seats
            ),
        )?;
    }
    Ok(())
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Play {
            table,
            hands,
            think_delay_ms,
        } => {
            let config = load(&table, think_delay_ms)?;
            warn_unused_lineup(&config, config.players - 1, err)?;
            // Real stdin, either a TTY or a pipe.
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&config, hands, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            table,
            hands,
            output,
            max_trials,
            json,
        } => {
            let config = load(&table, None)?;
            warn_unused_lineup(&config, config.players, err)?;
            let opts = SimOptions {
                hands,
                output,
                max_trials,
                json,
            };
            handle_sim_command(&config, &opts, out)
        }
        Commands::Eval {
            ai_a,
            ai_b,
            hands,
            seed,
            max_trials,
        } => {
            let config = load(&TableArgs::default(), None)?;
            let mut tuning = config.tuning;
            if let Some(t) = max_trials {
                tuning = tuning.with_max_trials(t);
            }
            handle_eval_command(&ai_a, &ai_b, hands, seed.or(config.seed), tuning, out)
        }
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        Commands::Strategies { json } => handle_strategies_command(json, out),
        Commands::Cfg => handle_cfg_command(out),
    }
}

/// Parses `args`, runs the subcommand and returns the exit status:
/// `0` on success, `2` on usage, configuration, engine or I/O errors and
/// `130` when a simulation is interrupted.
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "deal", "--seed", "42"];
/// let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed.
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = usage(&e, err);
                    exit_code::ERROR
                }
            };
        }
    };

    let name = cli.cmd.name();
    tracing::debug!(command = name, "dispatching");
    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e @ CliError::Interrupted(_)) => {
            tracing::info!(command = name, "{}", e);
            e.exit_code()
        }
        Err(e) => {
            tracing::warn!(command = name, error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            e.exit_code()
        }
    }
}
