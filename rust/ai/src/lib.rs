//! # holdem-ai: pluggable decision strategies
//!
//! Eighteen strategies share one contract, [`Strategy`], and are looked up by
//! identifier in a [`StrategyRegistry`]. A [`Dispatcher`] wraps each seat's
//! strategy so the table always receives a legal action, whatever the
//! strategy does.
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{play_hand, build_agents, NoopObserver, StrategyRegistry, Tuning};
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::{SeatConfig, TableConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let seats = [SeatConfig::ai("alice", "basic"), SeatConfig::ai("bob", "kelly")];
//! let mut engine = Engine::new(TableConfig::default(), &seats, Some(42)).unwrap();
//! let registry = StrategyRegistry::new(Tuning::default());
//! let mut agents = build_agents(engine.players(), &registry, |seat| {
//!     Err(holdem_ai::AiError::MissingAgent(seat))
//! })
//! .unwrap();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = play_hand(&mut engine, &mut agents, &mut rng, None, &mut NoopObserver).unwrap();
//! assert!(!result.winners.is_empty());
//! ```
//!
//! ## Families
//!
//! - search: `minimax`, `alphabeta`, `expectimax`
//! - simulation: `montecarlo`, `simulation`
//! - statistical: `bayesian`, `kelly`
//! - heuristic: `basic`, `intermediate`, `advanced`, `random`,
//!   `conservative`, `aggressive`, `heuristic`, `position`, `pattern`,
//!   `adaptive`, `phase`

pub mod analysis;
pub mod dispatch;
pub mod error;
pub mod runner;
pub mod strategies;
pub mod strategy;
pub mod trace;
pub mod tuning;

pub use dispatch::{DispatchParams, Dispatcher};
pub use error::{AiError, StrategyError};
pub use runner::{build_agents, play_hand, ActionSource, Agent, HandObserver, NoopObserver};
pub use strategy::{Strategy, StrategyCtor, StrategyKind, StrategyRegistry};
pub use trace::{DecisionLogger, DecisionRecord, DecisionTrace, MemoryLogger, TracingLogger};
pub use tuning::Tuning;
