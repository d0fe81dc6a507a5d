//! Read-only views of the table handed to strategies and front ends.
//!
//! Snapshots are owned copies: nothing a strategy does with one can reach
//! back into the [`crate::engine::Engine`]. Hole cards of other players are
//! never included.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::logger::{ActionRecord, Street};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: usize,
    pub name: String,
    /// Seat index, equal to the position in [`TableSnapshot::players`].
    pub seat: usize,
    pub chips: u32,
    pub current_bet: u32,
    pub total_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    pub active: bool,
}

impl PlayerView {
    pub fn is_contender(&self) -> bool {
        self.active && !self.folded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub hand_number: u64,
    pub players: Vec<PlayerView>,
    /// Chips swept into the pot on earlier streets.
    pub pot: u32,
    /// `pot` plus every bet outstanding on this street.
    pub total_pot: u32,
    pub current_bet: u32,
    pub min_raise_to: u32,
    pub community_cards: Vec<Card>,
    pub dealer_index: usize,
    pub small_blind_index: usize,
    pub big_blind_index: usize,
    pub small_blind_amount: u32,
    pub big_blind_amount: u32,
    pub round_name: Street,
    pub raises_this_round: u32,
    pub max_raises_per_round: Option<u32>,
    /// Actions taken so far in this hand.
    pub actions: Vec<ActionRecord>,
    /// Most recent actions across hands, oldest first.
    pub recent_actions: Vec<ActionRecord>,
}

impl TableSnapshot {
    pub fn player(&self, seat: usize) -> Option<&PlayerView> {
        self.players.get(seat)
    }

    /// Players holding chips or committed to this hand.
    pub fn active_players(&self) -> impl Iterator<Item = &PlayerView> {
        self.players.iter().filter(|p| p.active)
    }

    /// Players still contesting the pot.
    pub fn contenders(&self) -> impl Iterator<Item = &PlayerView> {
        self.players.iter().filter(|p| p.is_contender())
    }

    pub fn raise_allowed(&self) -> bool {
        self.max_raises_per_round
            .is_none_or(|cap| self.raises_this_round < cap)
    }

    pub fn average_stack(&self) -> f64 {
        let active: Vec<u32> = self.active_players().map(|p| p.chips).collect();
        if active.is_empty() {
            0.0
        } else {
            f64::from(active.iter().sum::<u32>()) / active.len() as f64
        }
    }
}

/// Everything a strategy may read when deciding for one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub seat: usize,
    /// The acting player's hole cards only.
    pub hole_cards: Vec<Card>,
    /// `current_bet - player.current_bet`
    pub call_amount: u32,
    pub community_cards: Vec<Card>,
    /// Total pot including bets outstanding on this street.
    pub pot_size: u32,
    pub game: TableSnapshot,
}

impl DecisionContext {
    pub fn player(&self) -> &PlayerView {
        &self.game.players[self.seat]
    }

    pub fn stack(&self) -> u32 {
        self.player().chips
    }

    pub fn big_blind(&self) -> u32 {
        self.game.big_blind_amount.max(1)
    }

    pub fn street(&self) -> Street {
        self.game.round_name
    }

    /// Smallest street total a raise is floored up to.
    pub fn min_raise_to(&self) -> u32 {
        self.game.min_raise_to
    }

    /// Street total reached by going all-in.
    pub fn max_raise_to(&self) -> u32 {
        let p = self.player();
        p.current_bet.saturating_add(p.chips)
    }

    /// A raise would put in more than a call.
    pub fn can_raise(&self) -> bool {
        self.game.raise_allowed() && self.max_raise_to() > self.game.current_bet
    }

    /// Clamps a desired raise-to amount into the legal range.
    pub fn clamp_raise(&self, to: u32) -> u32 {
        let max = self.max_raise_to();
        to.max(self.min_raise_to()).min(max)
    }

    /// Raise-to amount for a bet of `fraction` of the pot on top of a call.
    pub fn pot_fraction_raise(&self, fraction: f64) -> u32 {
        let base = f64::from(self.pot_size + self.call_amount);
        let extra = (base * fraction.max(0.0)).round() as u32;
        self.clamp_raise(self.game.current_bet.saturating_add(extra))
    }

    /// Other players still contesting the pot.
    pub fn opponents(&self) -> impl Iterator<Item = &PlayerView> {
        let seat = self.seat;
        self.game.contenders().filter(move |p| p.seat != seat)
    }

    pub fn opponent_count(&self) -> usize {
        self.opponents().count()
    }
}
