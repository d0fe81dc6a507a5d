use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::situation;
use crate::analysis::kelly_fraction;
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KellyParams {
    /// Multiplier on the full Kelly stake in normal spots.
    pub fraction: f64,
    /// Multiplier preflop and in multiway pots.
    pub cautious_fraction: f64,
    /// Opponent count from which the cautious multiplier applies.
    pub multiway_opponents: usize,
}

impl Default for KellyParams {
    fn default() -> Self {
        Self {
            fraction: 0.5,
            cautious_fraction: 0.25,
            multiway_opponents: 3,
        }
    }
}

/// Sizes its commitment as a damped Kelly fraction of the stack.
///
/// Facing a bet the odds are `pot / call`; with a free check the edge is
/// `2p - 1` at even money. The resulting stake maps onto fold (nothing), call
/// (covers the price) or raise (the excess).
#[derive(Debug, Clone, Default)]
pub struct KellyStrategy {
    params: KellyParams,
}

impl KellyStrategy {
    pub fn new(params: KellyParams) -> Self {
        Self { params }
    }
}

impl Strategy for KellyStrategy {
    fn name(&self) -> &str {
        "kelly"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        let f = if s.can_check() {
            (2.0 * s.equity - 1.0).max(0.0)
        } else {
            kelly_fraction(s.equity, f64::from(s.pot) / f64::from(s.call))
        };
        let mult = if s.is_preflop() || s.opponents >= p.multiway_opponents {
            p.cautious_fraction
        } else {
            p.fraction
        };
        let stake = (f * mult * f64::from(s.stack)).round() as u32;
        trace.reason(format!("kelly {f:.3} x {mult} -> stake {stake}"));

        if stake == 0 || stake < s.call {
            return Ok(if s.can_check() { Action::Call } else { Action::Fold });
        }
        let extra = stake - s.call;
        // a raise smaller than the minimum increment is just a call
        let raise_to = ctx.game.current_bet + extra;
        if ctx.can_raise() && raise_to >= ctx.min_raise_to() {
            Ok(Action::Raise(raise_to))
        } else {
            Ok(Action::Call)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testutil::{context, heads_up};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn stake_scales_with_edge() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut s = KellyStrategy::default();
        let e = heads_up(1000, "As 7c Ah 2d");
        let a = s.decide(&context(&e), &mut rng, &mut DecisionTrace::default()).unwrap();
        assert!(a.is_aggressive());
        let e = heads_up(1000, "7h As 2d Ah");
        let a = s.decide(&context(&e), &mut rng, &mut DecisionTrace::default()).unwrap();
        assert_eq!(a, Action::Fold);
    }
}
