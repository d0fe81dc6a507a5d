use holdem_engine::errors::GameError;
use thiserror::Error;

/// Failure inside a single strategy's decision. Never reaches the table:
/// the dispatcher replaces it with a conservative action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrategyError {
    #[error("seat {0} has no hole cards")]
    NoHoleCards(usize),
    #[error("invalid decision context: {0}")]
    InvalidContext(String),
    #[error("strategy computation failed: {0}")]
    Computation(String),
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
    #[error("no decision source for seat {0}")]
    MissingAgent(usize),
    #[error("input failed: {0}")]
    Input(String),
    #[error("player quit")]
    Quit,
    #[error(transparent)]
    Game(#[from] GameError),
}
