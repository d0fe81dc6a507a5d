//! Pot-odds and expected-value arithmetic shared by every strategy family.

use std::fmt;

/// Share of the final pot a call costs: `call / (pot + call)`. Zero when the
/// call is free.
pub fn pot_odds(call: u32, pot: u32) -> f64 {
    if call == 0 {
        return 0.0;
    }
    f64::from(call) / (f64::from(pot) + f64::from(call))
}

/// `p·pot − (1−p)·call`
pub fn call_ev(equity: f64, pot: f64, call: f64) -> f64 {
    equity * pot - (1.0 - equity) * call
}

/// EV of putting in `risk` chips when opponents fold with probability
/// `fold_equity` and otherwise call to showdown.
pub fn raise_ev(equity: f64, pot: f64, risk: f64, fold_equity: f64) -> f64 {
    let fe = fold_equity.clamp(0.0, 1.0);
    fe * pot + (1.0 - fe) * (equity * (pot + risk) - (1.0 - equity) * risk)
}

/// Kelly stake fraction for win probability `p` at net odds `b` to one.
/// Never negative.
pub fn kelly_fraction(p: f64, b: f64) -> f64 {
    if b <= 0.0 {
        return 0.0;
    }
    ((b * p - (1.0 - p)) / b).clamp(0.0, 1.0)
}

/// Equity needed to break even on a call.
pub fn break_even(call: u32, pot: u32) -> f64 {
    pot_odds(call, pot)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprZone {
    Low,
    Medium,
    High,
}

impl fmt::Display for SprZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SprZone::Low => write!(f, "low"),
            SprZone::Medium => write!(f, "medium"),
            SprZone::High => write!(f, "high"),
        }
    }
}

/// Stack-to-pot ratio. An empty pot counts as one chip.
pub fn spr(stack: u32, pot: u32) -> f64 {
    f64::from(stack) / f64::from(pot.max(1))
}

pub fn spr_zone(ratio: f64) -> SprZone {
    if ratio <= 4.0 {
        SprZone::Low
    } else if ratio <= 10.0 {
        SprZone::Medium
    } else {
        SprZone::High
    }
}

/// Rough win probability against `opponents` random hands for a one-opponent
/// strength estimate.
pub fn equity_vs_field(strength: f64, opponents: usize) -> f64 {
    let extra = opponents.saturating_sub(1) as f64;
    strength.clamp(0.0, 1.0).powf(1.0 + 0.35 * extra)
}
