use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Controller, Player, STARTING_STACK};

/// Table stakes and limits shared by every hand of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    /// Raises allowed per street; `None` leaves raising bounded only by stacks.
    pub max_raises_per_round: Option<u32>,
    /// Action records kept across hands for table statistics.
    pub recent_history: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 5,
            big_blind: 10,
            starting_stack: STARTING_STACK,
            max_raises_per_round: Some(4),
            recent_history: 200,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig("small blind must be > 0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(
                "big blind must be >= small blind".into(),
            ));
        }
        if self.starting_stack == 0 {
            return Err(GameError::InvalidConfig("starting stack must be > 0".into()));
        }
        if self.max_raises_per_round == Some(0) {
            return Err(GameError::InvalidConfig(
                "max raises per round must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// A seat to fill when the game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub controller: Controller,
    /// Overrides the table starting stack.
    #[serde(default)]
    pub stack: Option<u32>,
}

impl SeatConfig {
    pub fn ai(name: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Ai(strategy.into()),
            stack: None,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: u32) -> Self {
        self.stack = Some(stack);
        self
    }
}

pub(crate) fn seat_players(
    config: &TableConfig,
    seats: &[SeatConfig],
) -> Result<Vec<Player>, GameError> {
    if seats.len() < 2 {
        return Err(GameError::InvalidConfig("at least two seats required".into()));
    }
    Ok(seats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Player::new(
                i,
                s.name.clone(),
                s.stack.unwrap_or(config.starting_stack),
                s.controller.clone(),
            )
        })
        .collect())
}

/// First seat after `from` (wrapping) that satisfies `pred`.
pub(crate) fn next_seat(
    players: &[Player],
    from: usize,
    pred: impl Fn(&Player) -> bool,
) -> Option<usize> {
    let n = players.len();
    (1..=n).map(|k| (from + k) % n).find(|&i| pred(&players[i]))
}

/// Blind seats for a dealer: heads-up the dealer posts the small blind.
pub(crate) fn blind_seats(players: &[Player], dealer: usize) -> Option<(usize, usize)> {
    let live = |p: &Player| p.stack() > 0;
    let count = players.iter().filter(|p| live(p)).count();
    if count < 2 {
        return None;
    }
    if count == 2 {
        let bb = next_seat(players, dealer, live)?;
        return Some((dealer, bb));
    }
    let sb = next_seat(players, dealer, live)?;
    let bb = next_seat(players, sb, live)?;
    Some((sb, bb))
}
