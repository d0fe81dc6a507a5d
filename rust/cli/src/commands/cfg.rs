//! `cfg`: prints the resolved configuration as JSON, each value paired
//! with the layer that set it.
//!
//! ```json
//! {
//!   "players": { "value": 6, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use std::io::Write;

use serde_json::json;

use crate::config;
use crate::error::CliError;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = json!({
        "starting_stack": { "value": config.starting_stack, "source": sources.starting_stack },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "seed": { "value": config.seed, "source": sources.seed },
        "players": { "value": config.players, "source": sources.players },
        "lineup": { "value": config.lineup, "source": sources.lineup },
        "think_delay_ms": { "value": config.think_delay_ms, "source": sources.think_delay_ms },
        "max_raises_per_round": {
            "value": config.max_raises_per_round,
            "source": sources.max_raises_per_round,
        },
        "tuning": { "value": config.tuning, "source": sources.tuning },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
