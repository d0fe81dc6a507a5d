//! Drives hands on an [`Engine`] with one decision source per seat.

use holdem_engine::engine::{Engine, HandResult, Progress};
use holdem_engine::player::{Action, Controller, Player};
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;

use crate::dispatch::Dispatcher;
use crate::error::AiError;
use crate::strategy::StrategyRegistry;
use crate::trace::DecisionLogger;

/// Decisions for a human seat, supplied by the front end.
pub trait ActionSource {
    fn choose(&mut self, ctx: &DecisionContext) -> Result<Action, AiError>;
}

/// Presentation hooks around each decision. Every hook defaults to a no-op
/// so observers implement only what they show.
pub trait HandObserver {
    fn before_decision(&mut self, _seat: usize, _engine: &Engine) {}
    fn after_action(&mut self, _seat: usize, _action: Action, _engine: &Engine) {}
    fn hand_complete(&mut self, _result: &HandResult, _engine: &Engine) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl HandObserver for NoopObserver {}

pub enum Agent<'a> {
    Ai(Dispatcher),
    Human(Box<dyn ActionSource + 'a>),
}

impl Agent<'_> {
    pub fn dispatcher(&self) -> Option<&Dispatcher> {
        match self {
            Agent::Ai(d) => Some(d),
            Agent::Human(_) => None,
        }
    }
}

/// One agent per seat: AI seats get a dispatcher for their strategy,
/// human seats whatever `human` returns.
pub fn build_agents<'a>(
    players: &[Player],
    registry: &StrategyRegistry,
    mut human: impl FnMut(usize) -> Result<Box<dyn ActionSource + 'a>, AiError>,
) -> Result<Vec<Agent<'a>>, AiError> {
    players
        .iter()
        .enumerate()
        .map(|(seat, p)| match p.controller() {
            Controller::Ai(id) => registry.dispatcher(id).map(Agent::Ai),
            Controller::Human => human(seat).map(Agent::Human),
        })
        .collect()
}

/// Plays one hand to completion and returns its result.
///
/// The same `rng` feeds every AI decision, so a seeded generator together
/// with a seeded engine replays the hand exactly. Attaching a logger or an
/// observer does not change any decision.
pub fn play_hand(
    engine: &mut Engine,
    agents: &mut [Agent<'_>],
    rng: &mut dyn RngCore,
    mut logger: Option<&mut dyn DecisionLogger>,
    observer: &mut dyn HandObserver,
) -> Result<HandResult, AiError> {
    let mut progress = engine.start_hand()?;
    loop {
        match progress {
            Progress::HandComplete(result) => {
                observer.hand_complete(&result, engine);
                return Ok(result);
            }
            Progress::Continue { next, .. } => {
                let ctx = engine.decision_context(next)?;
                observer.before_decision(next, engine);
                let agent = agents.get_mut(next).ok_or(AiError::MissingAgent(next))?;
                let action = match agent {
                    Agent::Ai(d) => match logger.as_mut() {
                        Some(l) => d.decide(&ctx, rng, Some(&mut **l)),
                        None => d.decide(&ctx, rng, None),
                    },
                    Agent::Human(source) => source.choose(&ctx)?,
                };
                progress = engine.apply_action(next, action)?;
                observer.after_action(next, action, engine);
            }
        }
    }
}
