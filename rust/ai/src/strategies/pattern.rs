//! Opponent style reads plus a check on our own predictability.
//!
//! The strategy keeps its last few actions privately. When one kind of
//! action dominates that window it sometimes deliberately picks another.

use std::collections::VecDeque;
use std::fmt;

use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, chance, situation};
use crate::analysis::{SeatProfile, TableStats};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParams {
    /// Own actions remembered for the predictability check.
    pub window: usize,
    /// Share of one action above which we count as predictable.
    pub predictability_threshold: f64,
    /// Chance of breaking the pattern once predictable.
    pub randomization: f64,
    /// Opponent actions needed before a style is assigned.
    pub min_sample: u32,
    pub maniac_aggression: f64,
    pub maniac_raise_rate: f64,
    pub rock_fold_rate: f64,
    pub station_call_rate: f64,
    pub raise_threshold: f64,
    pub call_threshold: f64,
    pub bet_fraction: f64,
    pub value_vs_station_fraction: f64,
    pub bluff_vs_rock: f64,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            window: 20,
            predictability_threshold: 0.7,
            randomization: 0.25,
            min_sample: 8,
            maniac_aggression: 2.5,
            maniac_raise_rate: 0.3,
            rock_fold_rate: 0.55,
            station_call_rate: 0.45,
            raise_threshold: 0.65,
            call_threshold: 0.4,
            bet_fraction: 0.6,
            value_vs_station_fraction: 0.9,
            bluff_vs_rock: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentStyle {
    Maniac,
    Rock,
    CallingStation,
    Balanced,
    Unknown,
}

impl OpponentStyle {
    pub fn classify(profile: &SeatProfile, params: &PatternParams) -> Self {
        if profile.actions < params.min_sample {
            OpponentStyle::Unknown
        } else if profile.aggression_factor() >= params.maniac_aggression
            && profile.raise_frequency() >= params.maniac_raise_rate
        {
            OpponentStyle::Maniac
        } else if profile.fold_frequency() >= params.rock_fold_rate {
            OpponentStyle::Rock
        } else if profile.call_frequency() >= params.station_call_rate {
            OpponentStyle::CallingStation
        } else {
            OpponentStyle::Balanced
        }
    }
}

impl fmt::Display for OpponentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpponentStyle::Maniac => "maniac",
            OpponentStyle::Rock => "rock",
            OpponentStyle::CallingStation => "calling station",
            OpponentStyle::Balanced => "balanced",
            OpponentStyle::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Fold,
    Call,
    Raise,
}

impl From<Action> for Move {
    fn from(a: Action) -> Self {
        match a {
            Action::Fold => Move::Fold,
            Action::Call => Move::Call,
            Action::Raise(_) => Move::Raise,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternStrategy {
    params: PatternParams,
    history: VecDeque<Move>,
}

impl PatternStrategy {
    pub fn new(params: PatternParams) -> Self {
        Self {
            params,
            history: VecDeque::new(),
        }
    }

    /// The opponent to play against: the last one to bet or raise this
    /// hand, otherwise the one we have seen act most.
    fn main_opponent(ctx: &DecisionContext, stats: &TableStats) -> Option<usize> {
        let live: Vec<usize> = ctx.opponents().map(|p| p.seat).collect();
        ctx.game
            .actions
            .iter()
            .rev()
            .find(|r| r.action.is_aggressive() && live.contains(&r.seat))
            .map(|r| r.seat)
            .or_else(|| {
                live.iter()
                    .copied()
                    .max_by_key(|s| stats.seat(*s).map_or(0, |p| p.actions))
            })
    }

    /// The most frequent of our recent moves and its share of the window.
    fn dominant_move(&self) -> Option<(Move, f64)> {
        if self.history.len() < self.params.window.max(2) / 2 {
            return None;
        }
        [Move::Fold, Move::Call, Move::Raise]
            .into_iter()
            .map(|m| {
                let n = self.history.iter().filter(|&&h| h == m).count();
                (m, n as f64 / self.history.len() as f64)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn remember(&mut self, action: Action) {
        self.history.push_back(Move::from(action));
        while self.history.len() > self.params.window {
            self.history.pop_front();
        }
    }
}

impl Strategy for PatternStrategy {
    fn name(&self) -> &str {
        "pattern"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = self.params.clone();
        let s = situation(ctx, trace)?;
        let stats = TableStats::from_actions(&ctx.game.recent_actions, Some(ctx.seat));
        let style = Self::main_opponent(ctx, &stats)
            .and_then(|seat| stats.seat(seat))
            .map_or(OpponentStyle::Unknown, |profile| OpponentStyle::classify(profile, &p));
        trace.reason(format!("main opponent reads as {style}"));

        let (mut raise_at, mut call_at, mut fraction, mut bluff) =
            (p.raise_threshold, p.call_threshold, p.bet_fraction, 0.0);
        match style {
            OpponentStyle::Maniac => call_at -= 0.1,
            OpponentStyle::Rock => {
                call_at += 0.1;
                bluff = p.bluff_vs_rock;
            }
            OpponentStyle::CallingStation => {
                raise_at -= 0.05;
                fraction = p.value_vs_station_fraction;
            }
            OpponentStyle::Balanced | OpponentStyle::Unknown => {}
        }

        let mut action = if s.equity >= raise_at {
            bet(ctx, fraction)
        } else if ctx.game.raises_this_round == 0 && chance(rng, bluff) {
            trace.reason("bluffing a tight player");
            bet(ctx, p.bet_fraction)
        } else if s.can_check() || (s.equity >= call_at && s.equity > s.pot_odds) {
            Action::Call
        } else {
            Action::Fold
        };

        if let Some((dominant, share)) = self.dominant_move() {
            if share > p.predictability_threshold
                && Move::from(action) == dominant
                && chance(rng, p.randomization)
            {
                let varied = match dominant {
                    Move::Raise => Action::Call,
                    Move::Call if ctx.can_raise() && s.equity >= call_at => {
                        bet(ctx, p.bet_fraction * 0.5)
                    }
                    Move::Fold if s.call <= s.big_blind => Action::Call,
                    _ => action,
                };
                if varied != action {
                    trace.reason(format!("breaking a {:.0}% pattern", share * 100.0));
                    action = varied;
                }
            }
        }

        self.remember(action);
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testutil::{context, heads_up};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn profile(raises: u32, calls: u32, folds: u32) -> SeatProfile {
        SeatProfile {
            actions: raises + calls + folds,
            raises,
            calls,
            checks: 0,
            folds,
        }
    }

    #[test]
    fn styles_from_profiles() {
        let p = PatternParams::default();
        assert_eq!(OpponentStyle::classify(&profile(9, 1, 0), &p), OpponentStyle::Maniac);
        assert_eq!(OpponentStyle::classify(&profile(1, 2, 9), &p), OpponentStyle::Rock);
        assert_eq!(OpponentStyle::classify(&profile(1, 8, 2), &p), OpponentStyle::CallingStation);
        assert_eq!(OpponentStyle::classify(&profile(3, 3, 3), &p), OpponentStyle::Balanced);
        assert_eq!(OpponentStyle::classify(&profile(1, 1, 1), &p), OpponentStyle::Unknown);
    }

    #[test]
    fn breaks_a_fold_only_pattern_sometimes() {
        // folding trash over and over is maximally predictable
        let e = heads_up(1000, "7h As 2d Ah");
        let ctx = context(&e);
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let mut s = PatternStrategy::default();
        let actions: Vec<Action> = (0..60)
            .map(|_| s.decide(&ctx, &mut rng, &mut DecisionTrace::default()).unwrap())
            .collect();
        assert!(actions.contains(&Action::Fold));
        assert!(actions.contains(&Action::Call));
        assert!(s.history.len() <= 20);
    }
}
