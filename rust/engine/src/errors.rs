use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("Game over: fewer than two players hold chips")]
    GameOver,
    #[error("Game stopped")]
    Stopped,
    #[error("Unknown seat {0}")]
    UnknownSeat(usize),
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Deck exhausted")]
    DeckExhausted,
}
