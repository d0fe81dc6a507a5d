//! Card, board and action formatting for terminal display.
//!
//! Suits render as Unicode symbols where the terminal supports them and as
//! the ASCII letters `c d h s` otherwise.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert!(format_board(&[ace]).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, Suit};
use holdem_engine::engine::HandResult;
use holdem_engine::logger::ActionRecord;
use holdem_engine::player::{Action, Player};

/// Windows consoles only render suit symbols in modern terminals.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.letter().to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// Bracketed, space separated: `[A♠ K♥ Q♦]`, or `[]` when empty.
pub fn format_board(cards: &[Card]) -> String {
    let cards: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", cards.join(" "))
}

/// Describes an action as applied. `to_call` distinguishes a check from a
/// call.
pub fn format_action(action: Action, to_call: u32) -> String {
    match action {
        Action::Fold => "fold".to_string(),
        Action::Call if to_call == 0 => "check".to_string(),
        Action::Call => format!("call {}", to_call),
        Action::Raise(to) => format!("raise to {}", to),
    }
}

pub fn format_record(record: &ActionRecord, players: &[Player]) -> String {
    let name = players.get(record.seat).map(Player::name).unwrap_or("?");
    let mut line = format!("{} {}", name, format_action(record.action, record.to_call));
    if matches!(record.action, Action::Call)
        && record.to_call > 0
        && record.chips < record.to_call
    {
        line.push_str(" (all-in)");
    }
    line
}

/// One line per payout, with the winning hand when there was a showdown.
pub fn format_result(result: &HandResult, players: &[Player]) -> Vec<String> {
    result
        .payouts
        .iter()
        .map(|&(seat, amount)| {
            let name = players.get(seat).map(Player::name).unwrap_or("?");
            match result.hands.iter().find(|(s, _)| *s == seat) {
                Some((_, strength)) if result.showdown => {
                    format!("{} wins {} with {}", name, amount, strength.category)
                }
                _ => format!("{} wins {}", name, amount),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::Rank;

    #[test]
    fn cards_and_boards() {
        let c = Card::new(Rank::Ten, Suit::Hearts);
        let s = format_card(&c);
        assert!(s == "T♥" || s == "Th");
        assert_eq!(format_board(&[]), "[]");
        let b = format_board(&[c, Card::new(Rank::Two, Suit::Clubs)]);
        assert!(b.starts_with("[T") && b.ends_with(']'));
    }

    #[test]
    fn actions() {
        assert_eq!(format_action(Action::Fold, 10), "fold");
        assert_eq!(format_action(Action::Call, 0), "check");
        assert_eq!(format_action(Action::Call, 10), "call 10");
        assert_eq!(format_action(Action::Raise(40), 10), "raise to 40");
    }
}
