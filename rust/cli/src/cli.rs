//! Command-line surface, parsed with `clap` derive.

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "No-limit Texas Hold'em engine with pluggable AI strategies"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Options shared by commands that seat a table.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Seed for the deck and for AI decisions
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of seats, 2 to 22
    #[arg(long)]
    pub players: Option<usize>,
    /// Comma separated strategy identifiers, assigned to AI seats in order
    #[arg(long)]
    pub lineup: Option<String>,
    /// Chips each seat starts with
    #[arg(long)]
    pub stack: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play at a table against AI opponents (you are seat 1)
    Play {
        #[command(flatten)]
        table: TableArgs,
        /// Hands to play; stops early when the game is decided
        #[arg(long, default_value_t = 10)]
        hands: u32,
        /// Pause before each AI decision, in milliseconds
        #[arg(long)]
        think_delay_ms: Option<u64>,
    },
    /// Run an all-AI simulation and report per-strategy statistics
    Sim {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, default_value_t = 100)]
        hands: u64,
        /// Write one JSON hand record per line to this file
        #[arg(long)]
        output: Option<String>,
        /// Cap sampling strategies at this many trials per decision
        #[arg(long)]
        max_trials: Option<usize>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two strategies heads-up over duplicate deals
    Eval {
        #[arg(long)]
        ai_a: String,
        #[arg(long)]
        ai_b: String,
        #[arg(long, default_value_t = 100)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        max_trials: Option<usize>,
    },
    /// Deal one hand, check it down and show the result
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
    },
    /// List the registered strategies
    Strategies {
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Sim { .. } => "sim",
            Commands::Eval { .. } => "eval",
            Commands::Deal { .. } => "deal",
            Commands::Strategies { .. } => "strategies",
            Commands::Cfg => "cfg",
        }
    }
}

pub const COMMANDS: &[&str] = &["play", "sim", "eval", "deal", "strategies", "cfg"];
