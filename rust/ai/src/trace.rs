//! Observational record of how a decision was reached.
//!
//! Nothing here feeds back into play. A [`DecisionLogger`] may be attached to
//! the dispatcher or left out entirely; both configurations play identically.

use holdem_engine::logger::Street;
use holdem_engine::player::Action;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecisionTrace {
    pub algorithm: String,
    pub nodes_explored: u64,
    pub nodes_pruned: u64,
    pub simulations: u64,
    /// Chosen line through a search tree, root first.
    pub path: Vec<String>,
    pub reasoning: Vec<String>,
    /// Why the dispatcher overrode the strategy, if it did.
    pub fallback: Option<String>,
    pub strength: Option<f64>,
}

impl DecisionTrace {
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            ..Self::default()
        }
    }

    pub fn reason(&mut self, line: impl Into<String>) {
        self.reasoning.push(line.into());
    }

    pub fn step(&mut self, node: impl Into<String>) {
        self.path.push(node.into());
    }
}

/// One decision as delivered to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    pub hand: u64,
    pub seat: usize,
    pub street: Street,
    pub strategy: String,
    pub action: Action,
    pub trace: DecisionTrace,
}

pub trait DecisionLogger {
    fn record(&mut self, record: &DecisionRecord);
}

/// Keeps every record in memory; used by tests and the simulation summary.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Vec<DecisionRecord>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    pub fn fallbacks(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.trace.fallback.is_some())
            .count()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl DecisionLogger for MemoryLogger {
    fn record(&mut self, record: &DecisionRecord) {
        self.records.push(record.clone());
    }
}

/// Forwards each record to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl DecisionLogger for TracingLogger {
    fn record(&mut self, r: &DecisionRecord) {
        debug!(
            hand = r.hand,
            seat = r.seat,
            street = %r.street,
            strategy = %r.strategy,
            action = %r.action,
            nodes = r.trace.nodes_explored,
            pruned = r.trace.nodes_pruned,
            simulations = r.trace.simulations,
            fallback = r.trace.fallback.as_deref().unwrap_or(""),
            reasoning = %r.trace.reasoning.join("; "),
            "decision"
        );
    }
}
