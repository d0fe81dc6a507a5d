use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, chance, situation};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntermediateParams {
    pub raise_equity: f64,
    /// Extra equity over pot odds required before calling.
    pub call_margin: f64,
    pub semi_bluff_frequency: f64,
    pub min_semi_bluff_outs: u8,
    pub bet_fraction: f64,
    pub late_position_bonus: f64,
}

impl Default for IntermediateParams {
    fn default() -> Self {
        Self {
            raise_equity: 0.72,
            call_margin: 0.03,
            semi_bluff_frequency: 0.35,
            min_semi_bluff_outs: 8,
            bet_fraction: 0.6,
            late_position_bonus: 0.04,
        }
    }
}

/// Strength against the field compared with pot odds; strong draws bet
/// some of the time when checked to.
#[derive(Debug, Clone, Default)]
pub struct IntermediateStrategy {
    params: IntermediateParams,
}

impl IntermediateStrategy {
    pub fn new(params: IntermediateParams) -> Self {
        Self { params }
    }
}

impl Strategy for IntermediateStrategy {
    fn name(&self) -> &str {
        "intermediate"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        let mut equity = s.equity;
        if s.position.is_late() {
            equity += p.late_position_bonus;
        }
        trace.reason(format!(
            "equity {equity:.2} vs pot odds {:.2} ({} opponents)",
            s.pot_odds, s.opponents
        ));

        if equity >= p.raise_equity {
            trace.reason("value raise");
            return Ok(bet(ctx, p.bet_fraction));
        }
        if s.can_check() {
            if !s.is_preflop()
                && s.draws.outs() >= p.min_semi_bluff_outs
                && chance(rng, p.semi_bluff_frequency)
            {
                trace.reason(format!("semi-bluff with {} outs", s.draws.outs()));
                return Ok(bet(ctx, p.bet_fraction));
            }
            return Ok(Action::Call);
        }
        let effective = equity.max(s.draw_equity());
        if effective >= s.pot_odds + p.call_margin {
            Ok(Action::Call)
        } else {
            trace.reason("price too high");
            Ok(Action::Fold)
        }
    }
}
