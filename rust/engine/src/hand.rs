use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Best five-card hand found in a set of cards.
///
/// Field order matters: the derived `Ord` compares the category first and
/// then the kickers lexicographically, which is exactly showdown order.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Evaluates the best hand among 5 to 7 cards.
///
/// Callers are expected to pass 5..=7 distinct cards; with fewer cards the
/// result describes whatever is present (e.g. a pair among three cards).
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut by_suit_mask = [0u16; 4];
    let mut suit_counts = [0u8; 4];
    for &c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        let s = c.suit.index();
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1u16 << r;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    // Straight flush
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    // Four of a kind
    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    // Full house
    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    // Flush
    if let Some(s) = flush_suit {
        let mut k = [0u8; 5];
        let ranks = (2..=14u8).rev().filter(|r| by_suit_mask[s] & (1 << r) != 0);
        for (slot, r) in k.iter_mut().zip(ranks) {
            *slot = r;
        }
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    // Straight
    if let Some(high) = straight_high_from_mask(rank_mask(&rank_counts)) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card
    let (trip_ranks, pair_ranks, singles) = classify_multiples(&rank_counts);
    if let Some(t) = trip_ranks.first().copied() {
        // trips + two highest kickers
        let mut k = [t, 0, 0, 0, 0];
        fill_kickers(&mut k[1..3], singles.iter().copied());
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        let high = pair_ranks[0];
        let low = pair_ranks[1];
        let mut k = [high, low, 0, 0, 0];
        // a third pair can still play as the kicker
        let mut rest: Vec<u8> = pair_ranks[2..].to_vec();
        rest.extend(singles.iter().copied());
        rest.sort_unstable_by(|a, b| b.cmp(a));
        fill_kickers(&mut k[2..3], rest.into_iter());
        return HandStrength {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        fill_kickers(&mut k[1..4], singles.iter().copied());
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    // High card: top 5 ranks
    let mut k = [0u8; 5];
    fill_kickers(&mut k, singles.iter().copied());
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

/// Evaluates two hole cards plus the board when 5..=7 cards are known.
pub fn evaluate_hole(hole: &[Card], board: &[Card]) -> Option<HandStrength> {
    let total = hole.len() + board.len();
    if !(5..=7).contains(&total) {
        return None;
    }
    let mut cards = Vec::with_capacity(total);
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    Some(evaluate_hand(&cards))
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn fill_kickers(slots: &mut [u8], ranks: impl Iterator<Item = u8>) {
    for (slot, r) in slots.iter_mut().zip(ranks) {
        *slot = r;
    }
}

fn rank_mask(rank_counts: &[u8; 15]) -> u16 {
    (2..=14).fold(0u16, |m, r| {
        if rank_counts[r] > 0 {
            m | (1 << r)
        } else {
            m
        }
    })
}

/// Highest straight contained in a rank bitmask (bit `r` set for rank `r`).
/// The ace also counts as rank 1, so A-2-3-4-5 reports a high of 5.
pub(crate) fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u16).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high as u8);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let t = *trips.first()?;
    if trips.len() >= 2 {
        let p = trips[1].max(pairs.first().copied().unwrap_or(0));
        return Some((t, p));
    }
    pairs.first().map(|&p| (t, p))
}

/// Trips, pairs and singles, each ordered high to low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(s: &str) -> HandStrength {
        evaluate_hand(&parse_cards(s).unwrap())
    }

    #[test]
    fn third_pair_counts_as_kicker() {
        let hs = eval("Ks Kd 9c 9h 8s 8d 2c");
        assert_eq!(hs.category, Category::TwoPair);
        assert_eq!(hs.kickers, [13, 9, 8, 0, 0]);
    }

    #[test]
    fn two_trips_make_full_house() {
        let hs = eval("7s 7d 7c 4h 4s 4d Ac");
        assert_eq!(hs.category, Category::FullHouse);
        assert_eq!(hs.kickers, [7, 4, 0, 0, 0]);
    }

    #[test]
    fn wheel_reports_five_high() {
        let hs = eval("As 2d 3c 4h 5s Kd Qc");
        assert_eq!(hs.category, Category::Straight);
        assert_eq!(hs.kickers[0], 5);
    }

    #[test]
    fn six_card_flush_keeps_top_five() {
        let hs = eval("2h 5h 7h 9h Jh Kh");
        assert_eq!(hs.category, Category::Flush);
        assert_eq!(hs.kickers, [13, 11, 9, 7, 5]);
    }

    #[test]
    fn evaluate_hole_requires_five_cards() {
        let hole = parse_cards("As Kd").unwrap();
        let flop = parse_cards("2c 3d 4h").unwrap();
        assert!(evaluate_hole(&hole, &flop[..2]).is_none());
        assert!(evaluate_hole(&hole, &flop).is_some());
    }
}
