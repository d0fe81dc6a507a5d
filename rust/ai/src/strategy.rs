use std::fmt;
use std::str::FromStr;

use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatcher;
use crate::error::{AiError, StrategyError};
use crate::strategies::{
    adaptive::AdaptiveStrategy, advanced::AdvancedStrategy, aggressive::AggressiveStrategy,
    basic::BasicStrategy, bayesian::BayesianStrategy, conservative::ConservativeStrategy,
    heuristic::HeuristicStrategy, intermediate::IntermediateStrategy, kelly::KellyStrategy,
    montecarlo::MonteCarloStrategy, montecarlo::SimulationStrategy, pattern::PatternStrategy,
    phase::PhaseStrategy, position::PositionStrategy, random::RandomStrategy,
    search::AlphaBetaStrategy, search::ExpectimaxStrategy, search::MinimaxStrategy,
};
use crate::trace::DecisionTrace;
use crate::tuning::Tuning;

/// A decision algorithm for one seat.
///
/// `decide` reads the context and returns exactly one action. `&mut self`
/// exists only for the strategy's own bookkeeping (opponent models, its own
/// action history); the table is never reachable from here. Randomness must
/// come from `rng` so seeded runs replay exactly.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::{DecisionTrace, Strategy, StrategyError};
/// use holdem_engine::player::Action;
/// use holdem_engine::snapshot::DecisionContext;
/// use rand::RngCore;
///
/// struct AlwaysCall;
///
/// impl Strategy for AlwaysCall {
///     fn name(&self) -> &str {
///         "always-call"
///     }
///
///     fn decide(
///         &mut self,
///         _ctx: &DecisionContext,
///         _rng: &mut dyn RngCore,
///         trace: &mut DecisionTrace,
///     ) -> Result<Action, StrategyError> {
///         trace.reason("calls everything");
///         Ok(Action::Call)
///     }
/// }
/// ```
pub trait Strategy: Send {
    fn name(&self) -> &str;

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError>;
}

/// The built-in strategy identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Basic,
    Intermediate,
    Advanced,
    Random,
    Conservative,
    Aggressive,
    Heuristic,
    Position,
    Pattern,
    Adaptive,
    Phase,
    Minimax,
    AlphaBeta,
    Expectimax,
    MonteCarlo,
    Simulation,
    Bayesian,
    Kelly,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 18] = [
        StrategyKind::Basic,
        StrategyKind::Intermediate,
        StrategyKind::Advanced,
        StrategyKind::Random,
        StrategyKind::Conservative,
        StrategyKind::Aggressive,
        StrategyKind::Heuristic,
        StrategyKind::Position,
        StrategyKind::Pattern,
        StrategyKind::Adaptive,
        StrategyKind::Phase,
        StrategyKind::Minimax,
        StrategyKind::AlphaBeta,
        StrategyKind::Expectimax,
        StrategyKind::MonteCarlo,
        StrategyKind::Simulation,
        StrategyKind::Bayesian,
        StrategyKind::Kelly,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StrategyKind::Basic => "basic",
            StrategyKind::Intermediate => "intermediate",
            StrategyKind::Advanced => "advanced",
            StrategyKind::Random => "random",
            StrategyKind::Conservative => "conservative",
            StrategyKind::Aggressive => "aggressive",
            StrategyKind::Heuristic => "heuristic",
            StrategyKind::Position => "position",
            StrategyKind::Pattern => "pattern",
            StrategyKind::Adaptive => "adaptive",
            StrategyKind::Phase => "phase",
            StrategyKind::Minimax => "minimax",
            StrategyKind::AlphaBeta => "alphabeta",
            StrategyKind::Expectimax => "expectimax",
            StrategyKind::MonteCarlo => "montecarlo",
            StrategyKind::Simulation => "simulation",
            StrategyKind::Bayesian => "bayesian",
            StrategyKind::Kelly => "kelly",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::Basic => "starting-hand chart and made-hand tiers with pot odds",
            StrategyKind::Intermediate => "strength estimate against pot odds, semi-bluffs draws",
            StrategyKind::Advanced => "EV comparison using position, texture and table stats",
            StrategyKind::Random => "weighted random legal actions",
            StrategyKind::Conservative => "plays only strong hands, small commitments",
            StrategyKind::Aggressive => "raises wide and bluffs often",
            StrategyKind::Heuristic => "rule table keyed on hand tier and board texture",
            StrategyKind::Position => "ranges widen toward the button",
            StrategyKind::Pattern => "reads opponent styles and avoids being predictable",
            StrategyKind::Adaptive => "stack-state classifier selects a playing mode",
            StrategyKind::Phase => "adjusts to the stage of the game by average stack",
            StrategyKind::Minimax => "shallow game tree against a worst-case opponent",
            StrategyKind::AlphaBeta => "minimax with alpha-beta pruning",
            StrategyKind::Expectimax => "game tree with probabilistic opponent responses",
            StrategyKind::MonteCarlo => "random showdown rollouts against pot odds",
            StrategyKind::Simulation => "seeded, reproducible rollouts per situation",
            StrategyKind::Bayesian => "opponent aggression and tightness posteriors",
            StrategyKind::Kelly => "fractional Kelly stake sizing",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Lowercases and drops `-`, `_` and spaces so `Alpha-Beta` finds `alphabeta`.
pub fn normalize_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for StrategyKind {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = normalize_id(s);
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .ok_or_else(|| AiError::UnknownStrategy(s.to_string()))
    }
}

pub type StrategyCtor = fn(&Tuning) -> Box<dyn Strategy>;

static BUILTINS: [(StrategyKind, StrategyCtor); 18] = [
    (StrategyKind::Basic, |t| Box::new(BasicStrategy::new(t.basic.clone()))),
    (StrategyKind::Intermediate, |t| Box::new(IntermediateStrategy::new(t.intermediate.clone()))),
    (StrategyKind::Advanced, |t| Box::new(AdvancedStrategy::new(t.advanced.clone()))),
    (StrategyKind::Random, |t| Box::new(RandomStrategy::new(t.random.clone()))),
    (StrategyKind::Conservative, |t| Box::new(ConservativeStrategy::new(t.conservative.clone()))),
    (StrategyKind::Aggressive, |t| Box::new(AggressiveStrategy::new(t.aggressive.clone()))),
    (StrategyKind::Heuristic, |t| Box::new(HeuristicStrategy::new(t.heuristic.clone()))),
    (StrategyKind::Position, |t| Box::new(PositionStrategy::new(t.position.clone()))),
    (StrategyKind::Pattern, |t| Box::new(PatternStrategy::new(t.pattern.clone()))),
    (StrategyKind::Adaptive, |t| Box::new(AdaptiveStrategy::new(t.adaptive.clone()))),
    (StrategyKind::Phase, |t| Box::new(PhaseStrategy::new(t.phase.clone()))),
    (StrategyKind::Minimax, |t| Box::new(MinimaxStrategy::new(t.minimax.clone()))),
    (StrategyKind::AlphaBeta, |t| Box::new(AlphaBetaStrategy::new(t.alphabeta.clone()))),
    (StrategyKind::Expectimax, |t| Box::new(ExpectimaxStrategy::new(t.expectimax.clone()))),
    (StrategyKind::MonteCarlo, |t| Box::new(MonteCarloStrategy::new(t.montecarlo.clone()))),
    (StrategyKind::Simulation, |t| Box::new(SimulationStrategy::new(t.simulation.clone()))),
    (StrategyKind::Bayesian, |t| Box::new(BayesianStrategy::new(t.bayesian.clone()))),
    (StrategyKind::Kelly, |t| Box::new(KellyStrategy::new(t.kelly.clone()))),
];

/// Identifier → constructor table.
///
/// Starts with the eighteen built-ins; [`StrategyRegistry::register`] adds
/// or replaces entries.
pub struct StrategyRegistry {
    entries: Vec<(String, StrategyCtor)>,
    tuning: Tuning,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl StrategyRegistry {
    pub fn new(tuning: Tuning) -> Self {
        let entries = BUILTINS
            .iter()
            .map(|(kind, ctor)| (kind.id().to_string(), *ctor))
            .collect();
        Self { entries, tuning }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn register(&mut self, id: &str, ctor: StrategyCtor) {
        let id = normalize_id(id);
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = ctor,
            None => self.entries.push((id, ctor)),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        let id = normalize_id(id);
        self.entries.iter().any(|(k, _)| *k == id)
    }

    pub fn create(&self, id: &str) -> Result<Box<dyn Strategy>, AiError> {
        let key = normalize_id(id);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, ctor)| ctor(&self.tuning))
            .ok_or_else(|| AiError::UnknownStrategy(id.to_string()))
    }

    /// A dispatcher wrapping a fresh instance of `id`.
    pub fn dispatcher(&self, id: &str) -> Result<Dispatcher, AiError> {
        let strategy = self.create(id)?;
        Ok(Dispatcher::new(
            normalize_id(id),
            strategy,
            self.tuning.dispatch.clone(),
        ))
    }
}
