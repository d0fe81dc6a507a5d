//! Named, overridable constants for every strategy.
//!
//! Each strategy owns a `*Params` struct with `#[serde(default)]`, so a
//! config file may override any single field and keep the rest. [`Tuning`]
//! collects them under one table.

use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchParams;
use crate::strategies::{
    adaptive::AdaptiveParams, advanced::AdvancedParams, aggressive::AggressiveParams,
    basic::BasicParams, bayesian::BayesianParams, conservative::ConservativeParams,
    heuristic::HeuristicParams, intermediate::IntermediateParams, kelly::KellyParams,
    montecarlo::MonteCarloParams, montecarlo::SimulationParams, pattern::PatternParams,
    phase::PhaseParams, position::PositionParams, random::RandomParams, search::SearchParams,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub dispatch: DispatchParams,
    pub basic: BasicParams,
    pub intermediate: IntermediateParams,
    pub advanced: AdvancedParams,
    pub random: RandomParams,
    pub conservative: ConservativeParams,
    pub aggressive: AggressiveParams,
    pub heuristic: HeuristicParams,
    pub position: PositionParams,
    pub pattern: PatternParams,
    pub adaptive: AdaptiveParams,
    pub phase: PhaseParams,
    pub minimax: SearchParams,
    pub alphabeta: SearchParams,
    pub expectimax: SearchParams,
    pub montecarlo: MonteCarloParams,
    pub simulation: SimulationParams,
    pub bayesian: BayesianParams,
    pub kelly: KellyParams,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dispatch: DispatchParams::default(),
            basic: BasicParams::default(),
            intermediate: IntermediateParams::default(),
            advanced: AdvancedParams::default(),
            random: RandomParams::default(),
            conservative: ConservativeParams::default(),
            aggressive: AggressiveParams::default(),
            heuristic: HeuristicParams::default(),
            position: PositionParams::default(),
            pattern: PatternParams::default(),
            adaptive: AdaptiveParams::default(),
            phase: PhaseParams::default(),
            minimax: SearchParams::with_depth(3),
            alphabeta: SearchParams::with_depth(4),
            expectimax: SearchParams::with_depth(3),
            montecarlo: MonteCarloParams::default(),
            simulation: SimulationParams::default(),
            bayesian: BayesianParams::default(),
            kelly: KellyParams::default(),
        }
    }
}

impl Tuning {
    /// Caps every rollout count at `trials`. Tests and quick simulations use
    /// this to keep the sampling strategies fast.
    pub fn with_max_trials(mut self, trials: usize) -> Self {
        self.montecarlo.trials = self.montecarlo.trials.min(trials);
        self.simulation.rollouts = self.simulation.rollouts.min(trials);
        self
    }
}
