//! The built-in strategies, one module per family member.

pub mod adaptive;
pub mod advanced;
pub mod aggressive;
pub mod basic;
pub mod bayesian;
pub mod conservative;
pub mod heuristic;
pub mod intermediate;
pub mod kelly;
pub mod montecarlo;
pub mod pattern;
pub mod phase;
pub mod position;
pub mod random;
pub mod search;

use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::{Rng, RngCore};

use crate::analysis::Situation;
use crate::error::StrategyError;
use crate::trace::DecisionTrace;

/// Reads the situation and records the strength on the trace.
pub(crate) fn situation(
    ctx: &DecisionContext,
    trace: &mut DecisionTrace,
) -> Result<Situation, StrategyError> {
    let s = Situation::read(ctx)?;
    trace.strength = Some(s.strength);
    Ok(s)
}

pub(crate) fn check_or_fold(ctx: &DecisionContext) -> Action {
    if ctx.call_amount == 0 {
        Action::Call
    } else {
        Action::Fold
    }
}

/// Bet or raise by `fraction` of the pot; a call when raising is closed.
pub(crate) fn bet(ctx: &DecisionContext, fraction: f64) -> Action {
    if ctx.can_raise() {
        Action::Raise(ctx.pot_fraction_raise(fraction))
    } else {
        Action::Call
    }
}

pub(crate) fn shove(ctx: &DecisionContext) -> Action {
    if ctx.can_raise() {
        Action::Raise(ctx.max_raise_to())
    } else {
        Action::Call
    }
}

/// Bernoulli draw that tolerates probabilities outside `[0, 1]`.
pub(crate) fn chance(rng: &mut dyn RngCore, p: f64) -> bool {
    if p.is_nan() || p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.random_bool(p)
    }
}
