//! Command handler modules.
//!
//! Each subcommand lives in its own module and exposes one
//! `handle_COMMAND_command` function. Output streams are passed in as
//! `&mut dyn Write` so tests can capture them, and every failure is
//! returned as a [`CliError`](crate::error::CliError).

mod cfg;
mod deal;
pub mod eval;
mod play;
pub mod sim;
mod strategies;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::{handle_sim_command, SimOptions};
pub use strategies::handle_strategies_command;

use crate::cli::TableArgs;
use crate::config::{split_lineup, Overrides};

/// Turns shared table flags into configuration overrides.
pub fn overrides(table: &TableArgs, think_delay_ms: Option<u64>) -> Overrides {
    Overrides {
        seed: table.seed,
        players: table.players,
        lineup: table.lineup.as_deref().map(split_lineup),
        starting_stack: table.stack,
        think_delay_ms,
    }
}
