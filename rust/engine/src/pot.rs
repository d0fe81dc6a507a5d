//! Pot layering and chip splitting at the end of a hand.

use serde::{Deserialize, Serialize};

/// One layer of the pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Non-folded seats that contributed to this layer, in payout order.
    pub eligible: Vec<usize>,
}

/// Splits total hand contributions into a main pot and side pots.
///
/// `contributions` holds `(seat, chips put in this hand, folded)` in payout
/// order. Each distinct all-in level among non-folded players closes a layer;
/// folded chips stay in whichever layers they reach. A layer nobody else
/// matched is returned to its only contributor by listing that seat alone.
pub fn build_pots(contributions: &[(usize, u32, bool)]) -> Vec<Pot> {
    let mut levels: Vec<u32> = contributions
        .iter()
        .filter(|(_, amt, folded)| !folded && *amt > 0)
        .map(|(_, amt, _)| *amt)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut floor = 0u32;
    for &level in &levels {
        let mut amount = 0u32;
        let mut eligible = Vec::new();
        for &(seat, amt, folded) in contributions {
            amount += amt.min(level).saturating_sub(floor);
            if !folded && amt >= level {
                eligible.push(seat);
            }
        }
        if amount > 0 {
            pots.push(Pot { amount, eligible });
        }
        floor = level;
    }

    // chips of folded players above the highest live level
    let leftover: u32 = contributions
        .iter()
        .map(|(_, amt, _)| amt.saturating_sub(floor))
        .sum();
    if leftover > 0 {
        match pots.last_mut() {
            Some(top) => top.amount += leftover,
            None => pots.push(Pot {
                amount: leftover,
                eligible: Vec::new(),
            }),
        }
    }
    pots
}

/// Splits `amount` equally among `winners`; the odd chips go to the first
/// winner in iteration order.
pub fn split_pot(amount: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let share = amount / n;
    let remainder = amount % n;
    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, if i == 0 { share + remainder } else { share }))
        .collect()
}
