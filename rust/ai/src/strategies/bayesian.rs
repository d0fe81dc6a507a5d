//! Beta-distributed beliefs about each opponent's aggression and tightness,
//! updated from the action history and folded into an EV comparison.

use std::collections::BTreeMap;

use holdem_engine::logger::ActionRecord;
use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::situation;
use crate::analysis::{call_ev, raise_ev};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesianParams {
    /// Beta prior pseudo-counts for raise vs. passive actions.
    pub aggression_prior: (f64, f64),
    /// Beta prior pseudo-counts for fold vs. continue when facing a bet.
    pub tightness_prior: (f64, f64),
    /// Prior probability that a raiser holds a strong hand.
    pub strong_prior: f64,
    /// Likelihood a strong hand raises.
    pub raise_given_strong: f64,
    /// Share of our equity lost when the raiser is surely strong.
    pub strong_discount: f64,
    pub bet_fraction: f64,
}

impl Default for BayesianParams {
    fn default() -> Self {
        Self {
            aggression_prior: (1.0, 2.0),
            tightness_prior: (1.0, 2.0),
            strong_prior: 0.3,
            raise_given_strong: 0.7,
            strong_discount: 0.4,
            bet_fraction: 0.66,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Belief {
    pub aggression: (f64, f64),
    pub tightness: (f64, f64),
}

impl Belief {
    fn from_prior(p: &BayesianParams) -> Self {
        Self {
            aggression: p.aggression_prior,
            tightness: p.tightness_prior,
        }
    }

    fn observe(&mut self, r: &ActionRecord) {
        let facing = r.to_call > 0;
        match r.action {
            Action::Raise(_) => {
                self.aggression.0 += 1.0;
                if facing {
                    self.tightness.1 += 1.0;
                }
            }
            Action::Call if facing => {
                self.aggression.1 += 1.0;
                self.tightness.1 += 1.0;
            }
            Action::Call => self.aggression.1 += 0.5,
            Action::Fold => self.tightness.0 += 1.0,
        }
    }

    /// Posterior mean probability of a raise.
    pub fn aggression(&self) -> f64 {
        let (a, b) = self.aggression;
        a / (a + b)
    }

    /// Posterior mean probability of folding to a bet.
    pub fn tightness(&self) -> f64 {
        let (a, b) = self.tightness;
        a / (a + b)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BayesianStrategy {
    params: BayesianParams,
    beliefs: BTreeMap<usize, Belief>,
    /// Sequence number of the newest record absorbed.
    watermark: Option<u64>,
}

impl BayesianStrategy {
    pub fn new(params: BayesianParams) -> Self {
        Self {
            params,
            beliefs: BTreeMap::new(),
            watermark: None,
        }
    }

    pub fn belief(&self, seat: usize) -> Option<&Belief> {
        self.beliefs.get(&seat)
    }

    /// Folds every record newer than the watermark into the beliefs.
    fn absorb(&mut self, records: &[ActionRecord], me: usize) {
        let mut newest = self.watermark;
        for r in records {
            if self.watermark.is_some_and(|w| r.seq <= w) {
                continue;
            }
            newest = newest.max(Some(r.seq));
            if r.seat != me {
                let prior = Belief::from_prior(&self.params);
                self.beliefs.entry(r.seat).or_insert(prior).observe(r);
            }
        }
        self.watermark = newest;
    }

    fn belief_or_prior(&self, seat: usize) -> Belief {
        self.beliefs
            .get(&seat)
            .copied()
            .unwrap_or_else(|| Belief::from_prior(&self.params))
    }

    /// P(strong | raise) for a raiser whose weak hands raise at their
    /// observed aggression rate.
    pub fn strong_given_raise(&self, belief: &Belief) -> f64 {
        let p = &self.params;
        let weak_raise = belief.aggression().clamp(0.05, 0.95);
        let strong = p.strong_prior * p.raise_given_strong;
        strong / (strong + (1.0 - p.strong_prior) * weak_raise)
    }
}

impl Strategy for BayesianStrategy {
    fn name(&self) -> &str {
        "bayesian"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let s = situation(ctx, trace)?;
        self.absorb(&ctx.game.recent_actions, ctx.seat);

        let raiser = ctx
            .game
            .actions
            .iter()
            .rev()
            .find(|r| r.action.is_aggressive() && r.seat != ctx.seat)
            .map(|r| r.seat);
        let mut equity = s.equity;
        if let (Some(seat), false) = (raiser, s.can_check()) {
            let strong = self.strong_given_raise(&self.belief_or_prior(seat));
            equity *= 1.0 - self.params.strong_discount * strong;
            trace.reason(format!("P(strong | raise) for seat {seat}: {strong:.2}"));
        }

        let fold_equity: f64 = ctx
            .opponents()
            .map(|p| self.belief_or_prior(p.seat).tightness())
            .product();

        let pot = f64::from(s.pot);
        let ev_call = if s.can_check() {
            equity * pot
        } else {
            call_ev(equity, pot, f64::from(s.call))
        };
        let raise_to = ctx.pot_fraction_raise(self.params.bet_fraction);
        let risk = f64::from(raise_to.saturating_sub(ctx.player().current_bet));
        let ev_raise = raise_ev(equity, pot, risk, fold_equity);
        trace.reason(format!(
            "equity {equity:.2}, fold equity {fold_equity:.2}: \
             call {ev_call:.1}, raise {ev_raise:.1}"
        ));

        if ctx.can_raise() && ev_raise > ev_call && ev_raise > 0.0 {
            Ok(Action::Raise(raise_to))
        } else if s.can_check() || ev_call > 0.0 {
            Ok(Action::Call)
        } else {
            Ok(Action::Fold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::logger::Street;

    fn rec(seq: u64, hand: u64, seat: usize, action: Action, to_call: u32) -> ActionRecord {
        ActionRecord {
            seq,
            hand,
            seat,
            street: Street::Preflop,
            action,
            chips: 0,
            to_call,
        }
    }

    #[test]
    fn absorbs_each_record_once() {
        let mut s = BayesianStrategy::default();
        let mut records = vec![rec(1, 1, 1, Action::Raise(30), 10), rec(2, 1, 0, Action::Fold, 20)];
        s.absorb(&records, 0);
        assert_eq!(s.belief(1).unwrap().aggression, (2.0, 2.0));
        assert!(s.belief(0).is_none());

        records.push(rec(3, 2, 1, Action::Raise(30), 10));
        s.absorb(&records, 0);
        s.absorb(&records, 0);
        assert_eq!(s.belief(1).unwrap().aggression, (3.0, 2.0));
    }

    #[test]
    fn window_shorter_than_a_hand_loses_nothing() {
        let mut s = BayesianStrategy::default();
        let records: Vec<ActionRecord> =
            (1..=6).map(|n| rec(n, 1, 1, Action::Raise(20 * n as u32), 10)).collect();
        // the visible history slides forward within the same hand
        s.absorb(&records[0..3], 0);
        s.absorb(&records[2..5], 0);
        s.absorb(&records[3..6], 0);
        assert_eq!(s.belief(1).unwrap().aggression, (7.0, 2.0));
    }

    #[test]
    fn maniacs_raise_with_weaker_hands() {
        let s = BayesianStrategy::default();
        let maniac = Belief {
            aggression: (9.0, 1.0),
            tightness: (1.0, 1.0),
        };
        let nit = Belief {
            aggression: (1.0, 9.0),
            tightness: (1.0, 1.0),
        };
        assert!(s.strong_given_raise(&nit) > s.strong_given_raise(&maniac));
    }
}
