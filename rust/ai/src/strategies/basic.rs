//! Rule-based play from a 0-10 hand score and pot odds.
//!
//! Deterministic: the same context always produces the same action, which
//! makes this strategy the reference opponent for simulations.

use holdem_engine::hand::Category;
use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, situation};
use crate::analysis::Situation;
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicParams {
    /// Raise size with a very strong hand facing a bet, as a pot fraction.
    pub raise_fraction: f64,
    /// Opening bet with a very strong hand.
    pub value_bet_fraction: f64,
    /// Opening bet with a strong hand.
    pub strong_bet_fraction: f64,
    /// Medium hands call while pot odds stay at or below this.
    pub medium_max_pot_odds: f64,
    /// ...or while the call is at most `pot / medium_pot_divisor`.
    pub medium_pot_divisor: u32,
    pub marginal_max_pot_odds: f64,
    pub marginal_pot_divisor: u32,
    /// Minimum score to call off a stack that cannot cover the bet.
    pub all_in_score: u8,
}

impl Default for BasicParams {
    fn default() -> Self {
        Self {
            raise_fraction: 0.5,
            value_bet_fraction: 0.66,
            strong_bet_fraction: 0.5,
            medium_max_pot_odds: 0.7,
            medium_pot_divisor: 4,
            marginal_max_pot_odds: 0.6,
            marginal_pot_divisor: 6,
            all_in_score: 7,
        }
    }
}

/// Simple rule-based strategy and the baseline for comparisons.
///
/// **Preflop:** the starting-hand chart score.
///
/// **Postflop:**
/// - Two pair or better: bet or call
/// - One pair: check, or call reasonably priced bets
/// - Nothing: check if free, otherwise fold unless the price is tiny
#[derive(Debug, Clone, Default)]
pub struct BasicStrategy {
    params: BasicParams,
}

impl BasicStrategy {
    pub fn new(params: BasicParams) -> Self {
        Self { params }
    }

    /// Hand score on a 0-10 scale.
    ///
    /// Preflop this is the chart score. Once five cards are known the made
    /// category sets the score, with one point for a queen-or-better kicker.
    pub fn hand_score(s: &Situation) -> u8 {
        let Some(made) = &s.made else {
            return s.chart;
        };
        if s.is_preflop() {
            return s.chart;
        }
        let base = match made.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker_boost = u8::from(made.kickers[0] >= 12);
        (base + kicker_boost).min(10)
    }

    fn unopened(&self, ctx: &DecisionContext, score: u8) -> Action {
        match score {
            9..=10 => bet(ctx, self.params.value_bet_fraction),
            7..=8 => bet(ctx, self.params.strong_bet_fraction),
            _ => Action::Call,
        }
    }

    fn facing_bet(&self, ctx: &DecisionContext, s: &Situation, score: u8) -> Action {
        let p = &self.params;
        if s.call >= s.stack {
            return if score >= p.all_in_score {
                Action::Call
            } else {
                Action::Fold
            };
        }
        let priced = |max_odds: f64, divisor: u32| {
            s.pot_odds <= max_odds || s.call.saturating_mul(divisor.max(1)) <= s.pot
        };
        match score {
            9..=10 => bet(ctx, p.raise_fraction),
            7..=8 => Action::Call,
            5..=6 if priced(p.medium_max_pot_odds, p.medium_pot_divisor) => Action::Call,
            3..=4 if priced(p.marginal_max_pot_odds, p.marginal_pot_divisor) => Action::Call,
            _ => Action::Fold,
        }
    }
}

impl Strategy for BasicStrategy {
    fn name(&self) -> &str {
        "basic"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let s = situation(ctx, trace)?;
        let score = Self::hand_score(&s);
        trace.reason(format!("hand score {score}/10, pot odds {:.2}", s.pot_odds));
        Ok(if s.can_check() {
            self.unopened(ctx, score)
        } else {
            self.facing_bet(ctx, &s, score)
        })
    }
}
