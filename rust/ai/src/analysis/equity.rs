//! Monte Carlo showdown equity against random opponent holdings.

use std::fmt;

use holdem_engine::cards::{full_deck, Card};
use holdem_engine::hand::evaluate_hand;
use rand::RngCore;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityEstimate {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub trials: u64,
}

impl EquityEstimate {
    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }
}

impl fmt::Display for EquityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.1}% | Tie {:.1}% | Lose {:.1}% (equity: {:.1}%)",
            self.win * 100.0,
            self.tie * 100.0,
            self.lose * 100.0,
            self.equity() * 100.0,
        )
    }
}

fn remaining_deck(dead: &[Card]) -> Vec<Card> {
    full_deck().into_iter().filter(|c| !dead.contains(c)).collect()
}

/// Deals out the rest of the board and `opponents` random hands `trials`
/// times from the cards not yet seen, and counts showdown outcomes.
///
/// Returns `None` when the inputs cannot describe a real deal (wrong hole
/// count, too many board cards, or not enough cards left).
pub fn monte_carlo_equity(
    hole: &[Card],
    board: &[Card],
    opponents: usize,
    trials: usize,
    rng: &mut dyn RngCore,
) -> Option<EquityEstimate> {
    if hole.len() != 2 || board.len() > 5 || opponents == 0 || trials == 0 {
        return None;
    }
    let mut known = hole.to_vec();
    known.extend_from_slice(board);
    let mut deck = remaining_deck(&known);
    if deck.len() + known.len() != 52 {
        // duplicate input cards
        return None;
    }
    let board_needed = 5 - board.len();
    let needed = board_needed + 2 * opponents;
    if needed > deck.len() {
        return None;
    }

    let (mut wins, mut ties, mut losses) = (0u64, 0u64, 0u64);
    let mut hero = Vec::with_capacity(7);
    let mut villain = Vec::with_capacity(7);
    for _ in 0..trials {
        let (drawn, _) = deck.partial_shuffle(rng, needed);
        let runout = &drawn[..board_needed];

        hero.clear();
        hero.extend_from_slice(hole);
        hero.extend_from_slice(board);
        hero.extend_from_slice(runout);
        let ours = evaluate_hand(&hero);

        let mut best_other = None;
        for o in 0..opponents {
            let start = board_needed + 2 * o;
            villain.clear();
            villain.extend_from_slice(&drawn[start..start + 2]);
            villain.extend_from_slice(board);
            villain.extend_from_slice(runout);
            let theirs = evaluate_hand(&villain);
            if best_other.as_ref().is_none_or(|b| theirs > *b) {
                best_other = Some(theirs);
            }
        }
        match best_other.map(|b| ours.cmp(&b)) {
            Some(std::cmp::Ordering::Greater) | None => wins += 1,
            Some(std::cmp::Ordering::Equal) => ties += 1,
            Some(std::cmp::Ordering::Less) => losses += 1,
        }
    }

    let total = (wins + ties + losses) as f64;
    Some(EquityEstimate {
        win: wins as f64 / total,
        tie: ties as f64 / total,
        lose: losses as f64 / total,
        trials: trials as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn aces_dominate_a_random_hand() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let hole = parse_cards("As Ah").unwrap();
        let e = monte_carlo_equity(&hole, &[], 1, 2_000, &mut rng).unwrap();
        assert!(e.equity() > 0.75, "{e}");
        assert_eq!(e.trials, 2_000);
        assert!((e.win + e.tie + e.lose - 1.0).abs() < 1e-9);
    }

    #[test]
    fn made_nuts_on_river_always_wins() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let hole = parse_cards("As Ks").unwrap();
        let board = parse_cards("Qs Js Ts 2d 3c").unwrap();
        let e = monte_carlo_equity(&hole, &board, 3, 300, &mut rng).unwrap();
        assert_eq!(e.win, 1.0);
    }

    #[test]
    fn duplicate_cards_are_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let hole = parse_cards("As As").unwrap();
        assert!(monte_carlo_equity(&hole, &[], 1, 10, &mut rng).is_none());
    }
}
