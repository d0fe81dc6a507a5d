use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, chance, check_or_fold, situation};
use crate::analysis::PositionBucket;
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionParams {
    pub early_open: f64,
    pub middle_open: f64,
    pub late_open: f64,
    pub button_open: f64,
    pub small_blind_open: f64,
    pub big_blind_defend: f64,
    /// Opening with anything from late position when nobody has raised.
    pub steal_frequency: f64,
    /// Bets with air in position after being checked to.
    pub positional_bluff: f64,
    /// Calls need this much less strength than an open.
    pub call_discount: f64,
    pub bet_fraction: f64,
}

impl Default for PositionParams {
    fn default() -> Self {
        Self {
            early_open: 0.65,
            middle_open: 0.55,
            late_open: 0.47,
            button_open: 0.42,
            small_blind_open: 0.5,
            big_blind_defend: 0.4,
            steal_frequency: 0.4,
            positional_bluff: 0.15,
            call_discount: 0.08,
            bet_fraction: 0.6,
        }
    }
}

/// Opening ranges widen toward the button; late seats steal and bluff.
#[derive(Debug, Clone, Default)]
pub struct PositionStrategy {
    params: PositionParams,
}

impl PositionStrategy {
    pub fn new(params: PositionParams) -> Self {
        Self { params }
    }

    pub fn open_threshold(&self, position: PositionBucket) -> f64 {
        let p = &self.params;
        match position {
            PositionBucket::Early => p.early_open,
            PositionBucket::Middle => p.middle_open,
            PositionBucket::Late => p.late_open,
            PositionBucket::Button => p.button_open,
            PositionBucket::SmallBlind => p.small_blind_open,
            PositionBucket::BigBlind => p.big_blind_defend,
        }
    }
}

impl Strategy for PositionStrategy {
    fn name(&self) -> &str {
        "position"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        let threshold = self.open_threshold(s.position);
        trace.reason(format!(
            "{} seat, open at {threshold:.2}, strength {:.2}",
            s.position, s.strength
        ));

        if s.equity >= threshold {
            return Ok(bet(ctx, p.bet_fraction));
        }
        let unraised = ctx.game.raises_this_round == 0;
        if s.position.is_late() && unraised {
            let freq = if s.is_preflop() { p.steal_frequency } else { p.positional_bluff };
            if chance(rng, freq) {
                trace.reason("steal attempt");
                return Ok(bet(ctx, p.bet_fraction));
            }
        }
        if s.can_check() {
            return Ok(Action::Call);
        }
        if s.equity >= threshold - p.call_discount && s.equity > s.pot_odds {
            return Ok(Action::Call);
        }
        Ok(check_or_fold(ctx))
    }
}
