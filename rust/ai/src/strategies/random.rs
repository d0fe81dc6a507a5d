use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomParams {
    pub fold_weight: f64,
    pub call_weight: f64,
    pub raise_weight: f64,
    /// Largest raise drawn, as a pot fraction above the minimum raise.
    pub max_raise_pot_fraction: f64,
}

impl Default for RandomParams {
    fn default() -> Self {
        Self {
            fold_weight: 0.2,
            call_weight: 0.5,
            raise_weight: 0.3,
            max_raise_pot_fraction: 1.5,
        }
    }
}

/// Weighted random choice among the legal actions. Never folds when
/// checking is free. Ignores its cards, so it also plays without them.
#[derive(Debug, Clone, Default)]
pub struct RandomStrategy {
    params: RandomParams,
}

impl RandomStrategy {
    pub fn new(params: RandomParams) -> Self {
        Self { params }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let fold = if ctx.call_amount == 0 { 0.0 } else { p.fold_weight.max(0.0) };
        let call = p.call_weight.max(0.0);
        let raise = if ctx.can_raise() { p.raise_weight.max(0.0) } else { 0.0 };
        let total = fold + call + raise;
        if total <= 0.0 {
            return Ok(Action::Call);
        }

        let roll = rng.random_range(0.0..total);
        let action = if roll < fold {
            Action::Fold
        } else if roll < fold + call {
            Action::Call
        } else {
            let min = ctx.min_raise_to().min(ctx.max_raise_to());
            let extra = f64::from(ctx.pot_size) * p.max_raise_pot_fraction.max(0.0);
            let cap = (f64::from(min) + extra)
                .min(f64::from(ctx.max_raise_to()))
                .max(f64::from(min)) as u32;
            Action::Raise(rng.random_range(min..=cap))
        };
        trace.reason(format!("rolled {roll:.2} of {total:.2}"));
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testutil::{context, heads_up};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn never_folds_a_free_check_and_raises_stay_in_range() {
        let mut e = heads_up(1000, "As 7h Ah 2d");
        e.apply_action(0, Action::Call).unwrap();
        let ctx = context(&e);
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut s = RandomStrategy::default();
        for _ in 0..200 {
            match s.decide(&ctx, &mut rng, &mut DecisionTrace::default()).unwrap() {
                Action::Fold => panic!("folded with a free check"),
                Action::Raise(n) => {
                    assert!(n >= ctx.min_raise_to() && n <= ctx.max_raise_to());
                }
                Action::Call => {}
            }
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let e = heads_up(1000, "As 7h Ah 2d");
        let ctx = context(&e);
        let run = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut s = RandomStrategy::default();
            (0..20)
                .map(|_| s.decide(&ctx, &mut rng, &mut DecisionTrace::default()).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
    }
}
