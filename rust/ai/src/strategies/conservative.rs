use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, situation};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConservativeParams {
    pub call_threshold: f64,
    pub raise_threshold: f64,
    /// Never call more than this share of the stack below the raise threshold.
    pub max_call_stack_fraction: f64,
    pub bet_fraction: f64,
}

impl Default for ConservativeParams {
    fn default() -> Self {
        Self {
            call_threshold: 0.62,
            raise_threshold: 0.85,
            max_call_stack_fraction: 0.15,
            bet_fraction: 0.5,
        }
    }
}

/// Tight and passive: plays only strong hands and keeps commitments small.
#[derive(Debug, Clone, Default)]
pub struct ConservativeStrategy {
    params: ConservativeParams,
}

impl ConservativeStrategy {
    pub fn new(params: ConservativeParams) -> Self {
        Self { params }
    }
}

impl Strategy for ConservativeStrategy {
    fn name(&self) -> &str {
        "conservative"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        if s.equity >= p.raise_threshold {
            return Ok(bet(ctx, p.bet_fraction));
        }
        if s.can_check() {
            return Ok(Action::Call);
        }
        let affordable = f64::from(s.call) <= p.max_call_stack_fraction * f64::from(s.stack);
        if s.equity >= p.call_threshold && affordable && s.equity > s.pot_odds {
            Ok(Action::Call)
        } else {
            trace.reason(format!("equity {:.2} too thin", s.equity));
            Ok(Action::Fold)
        }
    }
}
