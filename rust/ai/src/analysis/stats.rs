//! Table tendencies derived from the recent action history.

use std::collections::BTreeMap;

use holdem_engine::logger::ActionRecord;
use holdem_engine::player::Action;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeatProfile {
    pub actions: u32,
    pub raises: u32,
    pub calls: u32,
    pub checks: u32,
    pub folds: u32,
}

impl SeatProfile {
    fn add(&mut self, r: &ActionRecord) {
        self.actions += 1;
        match r.action {
            Action::Raise(_) => self.raises += 1,
            Action::Call if r.to_call == 0 => self.checks += 1,
            Action::Call => self.calls += 1,
            Action::Fold => self.folds += 1,
        }
    }

    /// Raises per call; raises alone when nothing was called.
    pub fn aggression_factor(&self) -> f64 {
        if self.calls == 0 {
            f64::from(self.raises)
        } else {
            f64::from(self.raises) / f64::from(self.calls)
        }
    }

    pub fn raise_frequency(&self) -> f64 {
        ratio(self.raises, self.actions)
    }

    pub fn call_frequency(&self) -> f64 {
        ratio(self.calls, self.actions)
    }

    pub fn fold_frequency(&self) -> f64 {
        ratio(self.folds, self.actions)
    }

    /// Share of facing-a-bet decisions that ended in a fold.
    pub fn fold_to_bet(&self) -> f64 {
        ratio(self.folds, self.folds + self.calls + self.raises)
    }
}

fn ratio(n: u32, d: u32) -> f64 {
    if d == 0 { 0.0 } else { f64::from(n) / f64::from(d) }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStats {
    pub table: SeatProfile,
    pub seats: BTreeMap<usize, SeatProfile>,
}

impl TableStats {
    /// Aggregates `records`, leaving out `exclude` (usually the deciding seat).
    pub fn from_actions(records: &[ActionRecord], exclude: Option<usize>) -> Self {
        let mut stats = TableStats::default();
        for r in records.iter().filter(|r| Some(r.seat) != exclude) {
            stats.table.add(r);
            stats.seats.entry(r.seat).or_default().add(r);
        }
        stats
    }

    pub fn seat(&self, seat: usize) -> Option<&SeatProfile> {
        self.seats.get(&seat)
    }

    pub fn aggression_factor(&self) -> f64 {
        self.table.aggression_factor()
    }

    pub fn sample_size(&self) -> u32 {
        self.table.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::logger::Street;

    fn rec(seat: usize, action: Action, to_call: u32) -> ActionRecord {
        ActionRecord {
            seq: 0,
            hand: 1,
            seat,
            street: Street::Preflop,
            action,
            chips: 0,
            to_call,
        }
    }

    #[test]
    fn counts_checks_separately_from_calls() {
        let records = vec![
            rec(0, Action::Raise(30), 10),
            rec(1, Action::Call, 20),
            rec(1, Action::Call, 0),
            rec(2, Action::Fold, 30),
            rec(3, Action::Raise(90), 30),
        ];
        let s = TableStats::from_actions(&records, Some(3));
        assert_eq!(s.sample_size(), 4);
        assert_eq!(s.table.raises, 1);
        assert_eq!(s.table.calls, 1);
        assert_eq!(s.table.checks, 1);
        assert_eq!(s.aggression_factor(), 1.0);
        assert_eq!(s.seat(1).unwrap().actions, 2);
        assert!(s.seat(3).is_none());
        assert_eq!(s.seat(2).unwrap().fold_to_bet(), 1.0);
    }
}
