//! Head-to-head strategy comparison.
//!
//! Each deal is played twice from the same seeded deck with the seats
//! swapped, so card luck cancels out and the chip difference measures the
//! strategies rather than the cards.

use std::io::Write;

use holdem_ai::{build_agents, play_hand, AiError, NoopObserver, StrategyRegistry, Tuning};
use holdem_engine::engine::Engine;
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::logger::ActionRecord;
use holdem_engine::player::Action;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::CliError;
use crate::ui::row;
use crate::validation::validate_lineup;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalStats {
    pub hands_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub chips_won: i64,
    pub total_pot: u64,
    pub folds: u32,
    pub checks: u32,
    pub calls: u32,
    pub raises: u32,
}

impl EvalStats {
    fn update_from_actions(&mut self, actions: &[ActionRecord], seat: usize) {
        for a in actions.iter().filter(|a| a.seat == seat) {
            match a.action {
                Action::Fold => self.folds += 1,
                Action::Call if a.to_call == 0 => self.checks += 1,
                Action::Call => self.calls += 1,
                Action::Raise(_) => self.raises += 1,
            }
        }
    }

    fn update_result(&mut self, chip_delta: i64, pot: u32) {
        self.hands_played += 1;
        match chip_delta {
            d if d > 0 => self.wins += 1,
            d if d < 0 => self.losses += 1,
            _ => self.ties += 1,
        }
        self.chips_won += chip_delta;
        self.total_pot += u64::from(pot);
    }

    pub fn win_rate(&self) -> f64 {
        pct(self.wins, self.hands_played)
    }

    pub fn avg_chip_delta(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.chips_won as f64 / f64::from(self.hands_played)
        }
    }

    pub fn avg_pot(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.total_pot as f64 / f64::from(self.hands_played)
        }
    }

    fn action_pct(&self, count: u32) -> f64 {
        pct(count, self.folds + self.checks + self.calls + self.raises)
    }
}

fn pct(n: u32, d: u32) -> f64 {
    if d == 0 { 0.0 } else { f64::from(n) / f64::from(d) * 100.0 }
}

/// Plays `deals` duplicate pairs and returns the stats of `a` and `b`.
pub fn evaluate(
    a: &str,
    b: &str,
    deals: u32,
    seed: u64,
    tuning: Tuning,
) -> Result<(EvalStats, EvalStats), CliError> {
    let registry = StrategyRegistry::new(tuning);
    validate_lineup(&[a.to_string(), b.to_string()], &registry).map_err(CliError::InvalidInput)?;
    let mut stats = [EvalStats::default(), EvalStats::default()];

    for deal in 0..deals {
        let deal_seed = seed.wrapping_add(u64::from(deal));
        for swap in [false, true] {
            // strategy index held by each seat
            let order = if swap { [1, 0] } else { [0, 1] };
            let ids = [a, b];
            let seats: Vec<SeatConfig> = order
                .iter()
                .map(|&k| SeatConfig::ai(ids[k], ids[k]))
                .collect();
            let mut engine = Engine::new(TableConfig::default(), &seats, Some(deal_seed))?;
            let mut agents =
                build_agents(engine.players(), &registry, |s| Err(AiError::MissingAgent(s)))?;
            let mut rng = ChaCha20Rng::seed_from_u64(deal_seed);
            let start: Vec<u32> = engine.players().iter().map(|p| p.stack()).collect();

            let result = play_hand(&mut engine, &mut agents, &mut rng, None, &mut NoopObserver)?;
            for (seat, &k) in order.iter().enumerate() {
                let delta = i64::from(engine.players()[seat].stack()) - i64::from(start[seat]);
                stats[k].update_result(delta, result.pot);
                stats[k].update_from_actions(engine.action_history(), seat);
            }
        }
    }
    let [sa, sb] = stats;
    Ok((sa, sb))
}

fn write_stats(out: &mut dyn Write, name: &str, s: &EvalStats) -> std::io::Result<()> {
    writeln!(out, "{}:", name)?;
    row(out, 12, "hands", s.hands_played)?;
    row(out, 12, "won/lost/tie", format!("{}/{}/{}", s.wins, s.losses, s.ties))?;
    row(out, 12, "win rate", format!("{:.1}%", s.win_rate()))?;
    row(out, 12, "chips", format!("{:+} ({:+.1}/hand)", s.chips_won, s.avg_chip_delta()))?;
    row(out, 12, "avg pot", format!("{:.1}", s.avg_pot()))?;
    row(
        out,
        12,
        "actions",
        format!(
            "fold {:.0}% check {:.0}% call {:.0}% raise {:.0}%",
            s.action_pct(s.folds),
            s.action_pct(s.checks),
            s.action_pct(s.calls),
            s.action_pct(s.raises)
        ),
    )
}

pub fn handle_eval_command(
    ai_a: &str,
    ai_b: &str,
    hands: u32,
    seed: Option<u64>,
    tuning: Tuning,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let (sa, sb) = evaluate(ai_a, ai_b, hands, seed, tuning)?;

    writeln!(out, "Eval: {} vs {} ({} duplicate deals, seed {})", ai_a, ai_b, hands, seed)?;
    write_stats(out, ai_a, &sa)?;
    write_stats(out, ai_b, &sb)?;
    let verdict = match sa.chips_won.cmp(&sb.chips_won) {
        std::cmp::Ordering::Greater => format!("{} ahead by {}", ai_a, sa.chips_won),
        std::cmp::Ordering::Less => format!("{} ahead by {}", ai_b, sb.chips_won),
        std::cmp::Ordering::Equal => "dead even".to_string(),
    };
    writeln!(out, "Result: {}", verdict)?;
    Ok(())
}
