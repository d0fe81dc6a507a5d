use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A 52-card deck dealt from the top without replacement.
///
/// `cards[..position]` have left the deck (dealt or burned); the rest remain.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    burned: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            burned: Vec::with_capacity(3),
            rng,
        }
    }

    /// A deck whose top cards are `order`, followed by every other card in
    /// canonical order. Duplicates in `order` are ignored after their first
    /// occurrence so the deck always holds 52 distinct cards.
    pub fn stacked(order: &[Card]) -> Self {
        let mut cards: Vec<Card> = Vec::with_capacity(52);
        for &c in order {
            if !cards.contains(&c) {
                cards.push(c);
            }
        }
        for c in full_deck() {
            if !cards.contains(&c) {
                cards.push(c);
            }
        }
        Self {
            cards,
            position: 0,
            burned: Vec::with_capacity(3),
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
        self.burned.clear();
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    pub fn burn_card(&mut self) {
        if let Some(c) = self.deal_card() {
            self.burned.push(c);
        }
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
        self.burned.clear();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.position.min(self.cards.len())..]
    }

    pub fn burned(&self) -> &[Card] {
        &self.burned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn stacked_deck_deals_requested_order_first() {
        let top = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Ace, Suit::Hearts),
        ];
        let mut d = Deck::stacked(&top);
        assert_eq!(d.remaining(), 52);
        assert_eq!(d.deal_card(), Some(top[0]));
        assert_eq!(d.deal_card(), Some(top[1]));
        assert_eq!(d.remaining(), 50);
    }

    #[test]
    fn burned_cards_are_tracked() {
        let mut d = Deck::new_with_seed(9);
        d.shuffle();
        d.burn_card();
        d.burn_card();
        assert_eq!(d.burned().len(), 2);
        assert_eq!(d.remaining(), 50);
        d.shuffle();
        assert!(d.burned().is_empty());
    }
}
