use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The decision contract shared by humans and every strategy.
///
/// `Call` with nothing owed is a check. `Raise(n)` asks to bring this
/// player's total bet for the current street to `n`; the state machine
/// floors `n` up to the minimum raise and caps it at the player's stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "lowercase")]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Match the current bet (check when nothing is owed)
    Call,
    /// Raise to the given street total
    Raise(u32),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Call => "call",
            Action::Raise(_) => "raise",
        }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Raise(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Raise(n) => write!(f, "raise {}", n),
            other => f.write_str(other.name()),
        }
    }
}

/// Who decides for a seat. AI seats name a strategy identifier that the
/// strategy registry resolves.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Human,
    Ai(String),
}

impl Controller {
    pub fn strategy(&self) -> Option<&str> {
        match self {
            Controller::Human => None,
            Controller::Ai(id) => Some(id),
        }
    }
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seated player: chip stack, hole cards and per-hand betting state.
///
/// Only `stack` survives a hand boundary; everything else is reset by
/// [`Player::clear_for_hand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: usize,
    name: String,
    stack: u32,
    hole: Vec<Card>,
    current_bet: u32,
    total_bet: u32,
    folded: bool,
    all_in: bool,
    controller: Controller,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, stack: u32, controller: Controller) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: Vec::with_capacity(2),
            current_bet: 0,
            total_bet: 0,
            folded: false,
            all_in: false,
            controller,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn total_bet(&self) -> u32 {
        self.total_bet
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Holds chips or has chips committed to the current hand.
    pub fn is_active(&self) -> bool {
        self.stack > 0 || self.total_bet > 0
    }

    /// Still competing for the pot.
    pub fn is_contender(&self) -> bool {
        self.is_active() && !self.folded
    }

    /// Contender that can still put chips in.
    pub fn can_act(&self) -> bool {
        self.is_contender() && !self.all_in
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), String> {
        if self.hole.len() >= 2 {
            return Err("Hole cards already full".to_string());
        }
        self.hole.push(c);
        Ok(())
    }

    pub fn clear_for_hand(&mut self) {
        self.hole.clear();
        self.current_bet = 0;
        self.total_bet = 0;
        self.folded = false;
        self.all_in = false;
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    /// Moves up to `amount` chips from the stack into this street's bet and
    /// returns the chips actually moved. Emptying the stack marks all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.total_bet += paid;
        if self.stack == 0 && paid > 0 {
            self.all_in = true;
        }
        paid
    }

    /// Gives back part of this street's bet (an uncalled excess).
    pub fn refund(&mut self, amount: u32) {
        let back = amount.min(self.current_bet);
        self.current_bet -= back;
        self.total_bet -= back;
        self.stack += back;
        if back > 0 {
            self.all_in = false;
        }
    }

    /// Clears this street's bet once it has been swept into the pot.
    pub fn reset_round(&mut self) {
        self.current_bet = 0;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub(crate) fn set_stack(&mut self, stack: u32) {
        self.stack = stack;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_caps_at_stack_and_marks_all_in() {
        let mut p = Player::new(0, "p0", 50, Controller::Human);
        assert_eq!(p.commit(80), 50);
        assert!(p.is_all_in());
        assert_eq!(p.current_bet(), 50);
        assert_eq!(p.stack(), 0);
        assert!(p.is_active());
    }

    #[test]
    fn refund_reopens_all_in() {
        let mut p = Player::new(0, "p0", 100, Controller::Human);
        p.commit(100);
        p.refund(40);
        assert_eq!(p.stack(), 40);
        assert_eq!(p.total_bet(), 60);
        assert!(!p.is_all_in());
    }

    #[test]
    fn action_serializes_with_amount() {
        let json = serde_json::to_string(&Action::Raise(40)).unwrap();
        assert_eq!(json, r#"{"action":"raise","amount":40}"#);
        let back: Action = serde_json::from_str(r#"{"action":"fold"}"#).unwrap();
        assert_eq!(back, Action::Fold);
    }
}
