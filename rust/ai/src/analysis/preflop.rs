//! Starting-hand chart.

use holdem_engine::cards::Card;

/// Starting-hand class derived from [`chart_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandClass {
    Weak,
    Marginal,
    Playable,
    Strong,
    Premium,
}

impl HandClass {
    pub fn from_score(score: u8) -> Self {
        match score {
            9..=10 => HandClass::Premium,
            7..=8 => HandClass::Strong,
            5..=6 => HandClass::Playable,
            3..=4 => HandClass::Marginal,
            _ => HandClass::Weak,
        }
    }
}

/// Scores two hole cards on a 0-10 scale.
///
/// - 9-10: premium (AA-JJ, AKs)
/// - 7-8: strong (TT-99, AK, AQ, KQs)
/// - 5-6: medium (88-77, AJ, suited connectors)
/// - 3-4: marginal (66-22, Ax, broadway offsuit)
/// - 0-2: weak
pub fn chart_score(a: Card, b: Card) -> u8 {
    let (r1, r2) = (a.rank.value(), b.rank.value());
    let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
    let suited = a.suit == b.suit;
    let pick = |s: u8, o: u8| if suited { s } else { o };

    if r1 == r2 {
        return match high {
            13..=14 => 10,
            11..=12 => 9,
            10 => 8,
            9 => 7,
            8 => 6,
            7 => 5,
            _ => 4,
        };
    }

    match (high, low) {
        (14, 13) => pick(10, 8),
        (14, 12) => pick(8, 7),
        (14, 11) => pick(7, 6),
        (14, 10) => pick(6, 5),
        (14, _) => pick(5, 4),
        (13, 12) => pick(7, 6),
        (13, 11) => pick(6, 5),
        (13, 10) => pick(5, 4),
        (12, 11) => pick(6, 5),
        (12, 10) => pick(5, 4),
        _ => {
            if suited && high - low <= 2 {
                if high >= 9 { 5 } else { 4 }
            } else if high >= 11 && low >= 9 {
                4
            } else {
                2
            }
        }
    }
}

pub fn hand_class(hole: &[Card]) -> HandClass {
    match hole {
        [a, b] => HandClass::from_score(chart_score(*a, *b)),
        _ => HandClass::Weak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    fn score(s: &str) -> u8 {
        let c = parse_cards(s).unwrap();
        chart_score(c[0], c[1])
    }

    #[test]
    fn premium_pairs_and_big_slick() {
        assert_eq!(score("Ah As"), 10);
        assert_eq!(score("Kh Ks"), 10);
        assert_eq!(score("Ah Kh"), 10);
        assert_eq!(score("Ah Ks"), 8);
    }

    #[test]
    fn weak_and_connected_hands() {
        assert!(score("7h 2s") <= 3);
        assert!((4..=6).contains(&score("9h 8h")));
        assert_eq!(hand_class(&parse_cards("7h 2s").unwrap()), HandClass::Weak);
        assert_eq!(hand_class(&parse_cards("Qd Qc").unwrap()), HandClass::Premium);
    }
}
