//! Rollout-based strategies.
//!
//! Both deal the rest of the board and random opponent hands from the
//! unseen cards and compare the resulting equity with the price. The Monte
//! Carlo strategy samples from the table generator; the simulation strategy
//! seeds its own generator from the situation, so the same spot always gets
//! the same answer.

use holdem_engine::cards::Card;
use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use super::{bet, situation};
use crate::analysis::{monte_carlo_equity, EquityEstimate};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

fn rollouts(
    ctx: &DecisionContext,
    opponents: usize,
    trials: usize,
    rng: &mut dyn RngCore,
    trace: &mut DecisionTrace,
) -> Result<EquityEstimate, StrategyError> {
    let estimate = monte_carlo_equity(&ctx.hole_cards, &ctx.community_cards, opponents, trials, rng)
        .ok_or_else(|| {
            StrategyError::Computation(format!(
                "cannot sample {trials} deals against {opponents} opponents"
            ))
        })?;
    trace.simulations = estimate.trials;
    trace.reason(estimate.to_string());
    Ok(estimate)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloParams {
    pub trials: usize,
    /// Raise when equity beats pot odds by this factor...
    pub raise_multiplier: f64,
    /// ...and is at least this.
    pub raise_min_equity: f64,
    /// Call when equity beats pot odds by this factor.
    pub call_multiplier: f64,
    pub bet_fraction: f64,
}

impl Default for MonteCarloParams {
    fn default() -> Self {
        Self {
            trials: 10_000,
            raise_multiplier: 1.5,
            raise_min_equity: 0.6,
            call_multiplier: 1.0,
            bet_fraction: 0.75,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonteCarloStrategy {
    params: MonteCarloParams,
}

impl MonteCarloStrategy {
    pub fn new(params: MonteCarloParams) -> Self {
        Self { params }
    }
}

impl Strategy for MonteCarloStrategy {
    fn name(&self) -> &str {
        "montecarlo"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        let w = rollouts(ctx, s.opponents, p.trials, rng, trace)?.equity();
        if w > s.pot_odds * p.raise_multiplier && w > p.raise_min_equity {
            return Ok(bet(ctx, p.bet_fraction));
        }
        if s.can_check() || w > s.pot_odds * p.call_multiplier {
            return Ok(Action::Call);
        }
        Ok(Action::Fold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub rollouts: usize,
    pub raise_equity: f64,
    /// Equity over pot odds needed to call.
    pub call_margin: f64,
    pub bet_fraction: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            rollouts: 1_000,
            raise_equity: 0.65,
            call_margin: 0.05,
            bet_fraction: 0.66,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationStrategy {
    params: SimulationParams,
}

impl SimulationStrategy {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    /// Seed derived from everything that identifies the spot.
    ///
    /// Fixed little-endian layout: call, pot and stack as `u32`, then seat,
    /// opponent count, two hole cards and five board cards as one byte each.
    /// Missing cards encode as zero.
    pub fn situation_seed(ctx: &DecisionContext) -> [u8; 32] {
        fn code(card: Option<&Card>) -> u8 {
            card.map_or(0, |c| c.rank.value() * 4 + c.suit.index() as u8 + 1)
        }

        let mut seed = [0u8; 32];
        seed[0..4].copy_from_slice(&ctx.call_amount.to_le_bytes());
        seed[4..8].copy_from_slice(&ctx.pot_size.to_le_bytes());
        seed[8..12].copy_from_slice(&ctx.stack().to_le_bytes());
        seed[12] = ctx.seat as u8;
        seed[13] = ctx.opponent_count() as u8;
        for i in 0..2 {
            seed[14 + i] = code(ctx.hole_cards.get(i));
        }
        for i in 0..5 {
            seed[16 + i] = code(ctx.community_cards.get(i));
        }
        seed
    }
}

impl Strategy for SimulationStrategy {
    fn name(&self) -> &str {
        "simulation"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        let mut local = ChaCha20Rng::from_seed(Self::situation_seed(ctx));
        let w = rollouts(ctx, s.opponents, p.rollouts, &mut local, trace)?.equity();
        if w >= p.raise_equity {
            return Ok(bet(ctx, p.bet_fraction));
        }
        if s.can_check() || w >= s.pot_odds + p.call_margin {
            return Ok(Action::Call);
        }
        Ok(Action::Fold)
    }
}
