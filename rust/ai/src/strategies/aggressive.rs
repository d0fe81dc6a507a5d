use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, chance, check_or_fold, situation};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggressiveParams {
    pub raise_threshold: f64,
    pub call_threshold: f64,
    pub bluff_frequency: f64,
    pub bet_fraction: f64,
    /// Strength needed to raise again once the street has been raised.
    pub reraise_threshold: f64,
}

impl Default for AggressiveParams {
    fn default() -> Self {
        Self {
            raise_threshold: 0.5,
            call_threshold: 0.3,
            bluff_frequency: 0.3,
            bet_fraction: 0.8,
            reraise_threshold: 0.7,
        }
    }
}

/// Loose and aggressive: raises wide, bluffs often, rarely just calls.
#[derive(Debug, Clone, Default)]
pub struct AggressiveStrategy {
    params: AggressiveParams,
}

impl AggressiveStrategy {
    pub fn new(params: AggressiveParams) -> Self {
        Self { params }
    }
}

impl Strategy for AggressiveStrategy {
    fn name(&self) -> &str {
        "aggressive"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        let threshold = if ctx.game.raises_this_round > 0 {
            p.reraise_threshold
        } else {
            p.raise_threshold
        };
        if s.strength >= threshold {
            return Ok(bet(ctx, p.bet_fraction));
        }
        if chance(rng, p.bluff_frequency) {
            trace.reason("bluff");
            return Ok(bet(ctx, p.bet_fraction));
        }
        if s.can_check() || s.strength >= p.call_threshold {
            return Ok(Action::Call);
        }
        Ok(check_or_fold(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testutil::{context, heads_up};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn raises_more_often_than_conservative() {
        use crate::strategies::conservative::ConservativeStrategy;
        let e = heads_up(1000, "Td As 8d Ah");
        let ctx = context(&e);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut agg = AggressiveStrategy::default();
        let mut tight = ConservativeStrategy::default();
        let raises = |s: &mut dyn Strategy, rng: &mut ChaCha20Rng| {
            (0..50)
                .filter(|_| {
                    s.decide(&ctx, rng, &mut DecisionTrace::default())
                        .unwrap()
                        .is_aggressive()
                })
                .count()
        };
        assert!(raises(&mut agg, &mut rng) > raises(&mut tight, &mut rng));
    }
}
