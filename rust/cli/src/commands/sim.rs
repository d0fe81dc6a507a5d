//! Headless all-AI simulation with per-strategy statistics.
//!
//! Seats are filled from the configured lineup and play consecutive games
//! until the requested number of hands has been dealt; a new game starts
//! whenever one seat holds every chip. With `--output`, each hand is
//! appended to a JSONL file as a [`HandRecord`].
//!
//! # Environment Variables
//!
//! - `HOLDEM_SIM_BREAK_AFTER`: stop after N hands and exit with 130

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{SecondsFormat, Utc};
use holdem_ai::{build_agents, play_hand, AiError, NoopObserver, StrategyRegistry};
use holdem_engine::engine::{Engine, HandResult};
use holdem_engine::logger::{HandLogger, HandRecord, ShowdownInfo};
use holdem_engine::player::Action;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_result;

pub const BREAK_AFTER_ENV: &str = "HOLDEM_SIM_BREAK_AFTER";

#[derive(Debug, Clone, Default)]
pub struct SimOptions {
    pub hands: u64,
    pub output: Option<String>,
    pub max_trials: Option<usize>,
    pub json: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrategyStats {
    /// Seats this strategy held, summed over games.
    pub seats: u64,
    pub hands_played: u64,
    pub hands_won: u64,
    pub games_won: u64,
    pub chip_delta: i64,
    pub folds: u64,
    pub checks: u64,
    pub calls: u64,
    pub raises: u64,
    pub decisions: u64,
    pub fallbacks: u64,
}

impl StrategyStats {
    fn actions(&self) -> u64 {
        self.folds + self.checks + self.calls + self.raises
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.hands_won, self.hands_played)
    }

    pub fn aggression(&self) -> f64 {
        ratio(self.raises, self.actions())
    }
}

fn ratio(n: u64, d: u64) -> f64 {
    if d == 0 { 0.0 } else { n as f64 / d as f64 }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSummary {
    pub started: String,
    pub seed: u64,
    pub hands: u64,
    pub games_finished: u64,
    /// Hands after which the chip total did not match the starting total.
    pub balance_errors: u64,
    pub strategies: BTreeMap<String, StrategyStats>,
}

fn hand_record(
    logger: &mut HandLogger,
    engine: &Engine,
    result: &HandResult,
    seed: u64,
    game: u64,
) -> HandRecord {
    let showdown = result.showdown.then(|| ShowdownInfo {
        winners: result.winners.clone(),
        notes: Some(
            result
                .hands
                .iter()
                .map(|(seat, h)| format!("seat {}: {}", seat, h.category))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    });
    HandRecord {
        hand_id: logger.next_id(),
        seed: Some(seed),
        actions: engine.action_history().to_vec(),
        board: result.board.clone(),
        result: Some(format_result(result, engine.players()).join("; ")),
        ts: None,
        meta: Some(json!({
            "game": game,
            "hand": result.hand_number,
            "pot": result.pot,
            "payouts": result.payouts,
        })),
        showdown,
    }
}

/// Plays the simulation and returns its statistics. The interruption notice
/// goes to `out` when `HOLDEM_SIM_BREAK_AFTER` fires.
pub fn run_simulation(
    config: &Config,
    opts: &SimOptions,
    out: &mut dyn Write,
) -> Result<SimSummary, CliError> {
    if opts.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok());

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut tuning = config.tuning.clone();
    if let Some(t) = opts.max_trials {
        tuning = tuning.with_max_trials(t);
    }
    let registry = StrategyRegistry::new(tuning);
    let seats = config.ai_seats();
    let ids: Vec<String> = (0..seats.len()).map(|i| config.strategy_for(i).to_string()).collect();
    for id in &ids {
        registry.create(id)?;
    }

    let mut writer = match &opts.output {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    let mut summary = SimSummary {
        started: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        seed,
        hands: 0,
        games_finished: 0,
        balance_errors: 0,
        strategies: BTreeMap::new(),
    };
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut game = 0u64;

    while summary.hands < opts.hands {
        let game_seed = seed.wrapping_add(game);
        let mut engine = Engine::new(config.table_config(), &seats, Some(game_seed))?;
        let mut agents =
            build_agents(engine.players(), &registry, |s| Err(AiError::MissingAgent(s)))?;
        for id in &ids {
            summary.strategies.entry(id.clone()).or_default().seats += 1;
        }
        info!(game, seed = game_seed, seats = seats.len(), "simulation game started");

        let mut interrupted = false;
        while summary.hands < opts.hands && !engine.is_game_over() {
            let before: Vec<u32> = engine.players().iter().map(|p| p.stack()).collect();
            let result = play_hand(&mut engine, &mut agents, &mut rng, None, &mut NoopObserver)?;
            if engine.chips_in_play() != engine.expected_total() {
                summary.balance_errors += 1;
            }

            for (seat, p) in engine.players().iter().enumerate() {
                if before[seat] == 0 {
                    continue;
                }
                let s = summary.strategies.entry(ids[seat].clone()).or_default();
                s.hands_played += 1;
                s.chip_delta += i64::from(p.stack()) - i64::from(before[seat]);
                if result.winners.contains(&seat) {
                    s.hands_won += 1;
                }
            }
            for rec in engine.action_history() {
                let s = summary.strategies.entry(ids[rec.seat].clone()).or_default();
                match rec.action {
                    Action::Fold => s.folds += 1,
                    Action::Call if rec.to_call == 0 => s.checks += 1,
                    Action::Call => s.calls += 1,
                    Action::Raise(_) => s.raises += 1,
                }
            }
            if let Some(w) = writer.as_mut() {
                let record = hand_record(w, &engine, &result, game_seed, game);
                w.write(&record)?;
            }

            summary.hands += 1;
            if break_after.is_some_and(|b| summary.hands >= b) {
                interrupted = true;
                break;
            }
        }

        if engine.is_game_over() {
            summary.games_finished += 1;
            if let [winner] = engine.roster().as_slice() {
                summary.strategies.entry(ids[*winner].clone()).or_default().games_won += 1;
            }
        }
        for (seat, agent) in agents.iter().enumerate() {
            if let Some(d) = agent.dispatcher() {
                let s = summary.strategies.entry(ids[seat].clone()).or_default();
                s.decisions += d.decisions();
                s.fallbacks += d.fallbacks();
            }
        }

        if interrupted {
            writeln!(out, "Interrupted: saved {}/{}", summary.hands, opts.hands)?;
            return Err(CliError::Interrupted(format!(
                "saved {}/{} hands",
                summary.hands, opts.hands
            )));
        }
        game += 1;
    }

    info!(hands = summary.hands, games = summary.games_finished, "simulation finished");
    Ok(summary)
}

pub fn write_summary(summary: &SimSummary, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        out,
        "Simulated: {} hands, {} games finished (seed {})",
        summary.hands, summary.games_finished, summary.seed
    )?;
    writeln!(
        out,
        "{:<13} {:>5} {:>7} {:>6} {:>6} {:>9} {:>6} {:>9}",
        "strategy", "seats", "hands", "won%", "games", "chips", "aggr%", "fallback"
    )?;
    for (id, s) in &summary.strategies {
        writeln!(
            out,
            "{:<13} {:>5} {:>7} {:>6.1} {:>6} {:>+9} {:>6.1} {:>9}",
            id,
            s.seats,
            s.hands_played,
            s.win_rate() * 100.0,
            s.games_won,
            s.chip_delta,
            s.aggression() * 100.0,
            s.fallbacks
        )?;
    }
    if summary.balance_errors > 0 {
        writeln!(out, "Balance errors: {}", summary.balance_errors)?;
    }
    Ok(())
}

pub fn handle_sim_command(
    config: &Config,
    opts: &SimOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let summary = run_simulation(config, opts, out)?;
    if opts.json {
        let s = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
        writeln!(out, "{}", s)?;
    } else {
        write_summary(&summary, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(lineup: &[&str], players: usize, seed: u64) -> Config {
        Config {
            lineup: lineup.iter().map(|s| s.to_string()).collect(),
            players,
            seed: Some(seed),
            starting_stack: 300,
            ..Config::default()
        }
    }

    fn opts(hands: u64) -> SimOptions {
        SimOptions {
            hands,
            max_trials: Some(50),
            ..SimOptions::default()
        }
    }

    #[test]
    fn chip_deltas_sum_to_zero() {
        let cfg = config(&["aggressive", "conservative", "kelly"], 3, 11);
        let mut out = Vec::new();
        let s = run_simulation(&cfg, &opts(40), &mut out).unwrap();
        assert_eq!(s.hands, 40);
        assert_eq!(s.balance_errors, 0);
        let delta: i64 = s.strategies.values().map(|s| s.chip_delta).sum();
        assert_eq!(delta, 0);
        assert_eq!(s.strategies.len(), 3);
    }

    #[test]
    fn short_stacks_finish_games() {
        let cfg = config(&["aggressive"], 2, 5);
        let mut out = Vec::new();
        let s = run_simulation(&cfg, &opts(300), &mut out).unwrap();
        assert!(s.games_finished >= 1);
        assert_eq!(s.strategies["aggressive"].games_won, s.games_finished);
    }

    #[test]
    fn seeded_runs_match() {
        let cfg = config(&["random", "pattern"], 4, 3);
        let mut out = Vec::new();
        let a = run_simulation(&cfg, &opts(25), &mut out).unwrap();
        let b = run_simulation(&cfg, &opts(25), &mut out).unwrap();
        assert_eq!(a.strategies, b.strategies);
    }

    #[test]
    fn zero_hands_rejected() {
        let mut out = Vec::new();
        assert!(run_simulation(&Config::default(), &opts(0), &mut out).is_err());
    }
}
