//! Continuous hand-strength estimation for in-hand decisions.
//!
//! [`estimate_strength`] returns a value in `[0, 1]` for two hole cards and any
//! number of visible community cards. Before the river it blends the best made
//! hand with a draw-potential term; the blend leans toward the made hand as
//! more of the board is visible. This is a heuristic, not an equity
//! calculation: showdowns always go through [`crate::hand::evaluate_hand`].

use crate::cards::Card;
use crate::hand::{evaluate_hand, Category, HandStrength};

/// Returned for malformed input instead of an error.
pub const MIN_STRENGTH: f64 = 0.0;

/// Base strength of each category, indexed by [`Category::rank`]. The final
/// entry caps the interpolation for straight flushes.
const CATEGORY_BASE: [f64; 10] = [0.10, 0.25, 0.40, 0.55, 0.70, 0.75, 0.85, 0.95, 0.99, 1.0];

const FLOP_MADE_WEIGHT: f64 = 0.65;
const TURN_MADE_WEIGHT: f64 = 0.80;

const FLUSH_DRAW_POTENTIAL: f64 = 0.35;
const OPEN_ENDED_POTENTIAL: f64 = 0.30;
const GUTSHOT_POTENTIAL: f64 = 0.15;
const OVERCARD_POTENTIAL: f64 = 0.05;

/// Draw features of a set of known cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawInfo {
    /// Exactly four cards of one suit.
    pub flush_draw: bool,
    /// Four consecutive ranks completable at either end.
    pub open_ended: bool,
    /// One missing rank inside a five-rank window.
    pub gutshot: bool,
    pub made_flush: bool,
    pub made_straight: bool,
}

impl DrawInfo {
    pub fn has_straight_draw(&self) -> bool {
        self.open_ended || self.gutshot
    }

    pub fn has_draw(&self) -> bool {
        self.flush_draw || self.has_straight_draw()
    }

    /// Rough number of clean outs the draws represent.
    pub fn outs(&self) -> u8 {
        let mut outs = 0u8;
        if self.flush_draw {
            outs += 9;
        }
        if self.open_ended {
            outs += 8;
        } else if self.gutshot {
            outs += 4;
        }
        // flush + straight draws share two outs
        if self.flush_draw && self.has_straight_draw() {
            outs -= 2;
        }
        outs
    }
}

/// Classifies flush and straight draws among the given cards.
pub fn detect_draws(cards: &[Card]) -> DrawInfo {
    let mut suit_counts = [0u8; 4];
    let mut mask = 0u16;
    for c in cards {
        suit_counts[c.suit.index()] += 1;
        mask |= 1 << c.rank.value();
    }
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    let made_flush = suit_counts.iter().any(|&n| n >= 5);
    let flush_draw = !made_flush && suit_counts.iter().any(|&n| n == 4);

    let made_straight = (1..=10u16).any(|low| mask & (0b11111 << low) == 0b11111 << low);
    let mut open_ended = false;
    let mut gutshot = false;
    if !made_straight {
        // runs of four starting at 2..=10 can be completed below and above
        open_ended = (2..=10u16).any(|low| mask & (0b1111 << low) == 0b1111 << low);
        if !open_ended {
            gutshot = (1..=10u16).any(|low| (mask & (0b11111 << low)).count_ones() == 4);
        }
    }
    DrawInfo {
        flush_draw,
        open_ended,
        gutshot,
        made_flush,
        made_straight,
    }
}

/// Number of hole cards ranked above every board card.
pub fn overcards(hole: &[Card], board: &[Card]) -> usize {
    let Some(top) = board.iter().map(|c| c.rank).max() else {
        return 0;
    };
    hole.iter().filter(|c| c.rank > top).count()
}

/// Strength of a completed hand: the category base interpolated toward the
/// next category by the leading kickers.
pub fn made_strength(hs: &HandStrength) -> f64 {
    let idx = hs.category.rank() as usize;
    let base = CATEGORY_BASE[idx];
    let span = CATEGORY_BASE[idx + 1] - base;
    let k0 = f64::from(hs.kickers[0]) / 14.0;
    let k1 = f64::from(hs.kickers[1]) / 14.0;
    (base + span * (0.8 * k0 + 0.2 * k1)).clamp(0.0, 1.0)
}

/// Preflop score from the two hole cards alone. Pocket aces score 1.0.
pub fn preflop_strength(a: Card, b: Card) -> f64 {
    let (hi, lo) = if a.rank >= b.rank {
        (a.rank.value(), b.rank.value())
    } else {
        (b.rank.value(), a.rank.value())
    };
    if hi == lo {
        return 0.55 + 0.45 * f64::from(hi - 2) / 12.0;
    }
    let mut s = f64::from(hi + lo) / 28.0 * 0.6;
    if a.suit == b.suit {
        s += 0.06;
    }
    s += match hi - lo {
        1 => 0.05,
        2 => 0.03,
        3 => 0.01,
        _ => 0.0,
    };
    if hi == 14 {
        s += 0.03;
    }
    s.clamp(0.0, 0.9)
}

fn well_formed(hole: &[Card], board: &[Card]) -> bool {
    if hole.len() != 2 || board.len() > 5 {
        return false;
    }
    let mut seen = 0u64;
    for c in hole.iter().chain(board) {
        let bit = 1u64 << (c.suit.index() * 13 + (c.rank.value() as usize - 2));
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}

/// Estimated strength in `[0, 1]` of `hole` against the visible `board`.
pub fn estimate_strength(hole: &[Card], board: &[Card]) -> f64 {
    if !well_formed(hole, board) {
        return MIN_STRENGTH;
    }
    if board.is_empty() {
        return preflop_strength(hole[0], hole[1]);
    }

    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    let made = if cards.len() >= 5 {
        made_strength(&evaluate_hand(&cards))
    } else {
        // fewer than five cards: pairs and high cards only
        partial_strength(&cards)
    };
    if board.len() >= 5 {
        return made;
    }

    let draws = detect_draws(&cards);
    let mut potential = 0.0;
    if draws.flush_draw {
        potential += FLUSH_DRAW_POTENTIAL;
    }
    if draws.open_ended {
        potential += OPEN_ENDED_POTENTIAL;
    } else if draws.gutshot {
        potential += GUTSHOT_POTENTIAL;
    }
    potential += OVERCARD_POTENTIAL * overcards(hole, board) as f64;

    let w = if board.len() >= 4 {
        TURN_MADE_WEIGHT
    } else {
        FLOP_MADE_WEIGHT
    };
    let draw_term = (made + potential).min(1.0);
    (w * made + (1.0 - w) * draw_term).clamp(0.0, 1.0)
}

fn partial_strength(cards: &[Card]) -> f64 {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    let mut ranks: Vec<u8> = (2..=14u8).rev().filter(|&r| counts[r as usize] > 0).collect();
    ranks.sort_by_key(|&r| std::cmp::Reverse((counts[r as usize], r)));
    let mut kickers = [0u8; 5];
    for (slot, r) in kickers.iter_mut().zip(ranks.iter()) {
        *slot = *r;
    }
    let category = match counts.iter().max().copied().unwrap_or(0) {
        4 => Category::FourOfAKind,
        3 => Category::ThreeOfAKind,
        2 if counts.iter().filter(|&&n| n == 2).count() >= 2 => Category::TwoPair,
        2 => Category::OnePair,
        _ => Category::HighCard,
    };
    made_strength(&HandStrength { category, kickers })
}
