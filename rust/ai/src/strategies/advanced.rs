use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{chance, shove, situation};
use crate::analysis::{call_ev, raise_ev, spr_zone, PositionBucket, SprZone, TableStats};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedParams {
    pub open_early: f64,
    pub open_middle: f64,
    pub open_late: f64,
    pub open_blind: f64,
    pub bluff_frequency: f64,
    /// Fold-to-bet rate assumed until enough history is seen.
    pub default_fold_to_bet: f64,
    pub min_stats_sample: u32,
    pub wet_bet_fraction: f64,
    pub dry_bet_fraction: f64,
    /// Strength that commits the stack at low stack-to-pot ratios.
    pub commit_strength: f64,
}

impl Default for AdvancedParams {
    fn default() -> Self {
        Self {
            open_early: 0.62,
            open_middle: 0.55,
            open_late: 0.45,
            open_blind: 0.5,
            bluff_frequency: 0.12,
            default_fold_to_bet: 0.35,
            min_stats_sample: 12,
            wet_bet_fraction: 0.75,
            dry_bet_fraction: 0.5,
            commit_strength: 0.55,
        }
    }
}

/// Compares fold, call and raise EVs. The raise is sized by board texture,
/// fold equity comes from observed table tendencies, and position sets the
/// strength a raise needs.
#[derive(Debug, Clone, Default)]
pub struct AdvancedStrategy {
    params: AdvancedParams,
}

impl AdvancedStrategy {
    pub fn new(params: AdvancedParams) -> Self {
        Self { params }
    }

    fn raise_threshold(&self, position: PositionBucket) -> f64 {
        let p = &self.params;
        match position {
            PositionBucket::Early => p.open_early,
            PositionBucket::Middle => p.open_middle,
            PositionBucket::Late | PositionBucket::Button => p.open_late,
            PositionBucket::SmallBlind | PositionBucket::BigBlind => p.open_blind,
        }
    }
}

impl Strategy for AdvancedStrategy {
    fn name(&self) -> &str {
        "advanced"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;

        if !s.is_preflop() && spr_zone(s.spr) == SprZone::Low && s.strength >= p.commit_strength {
            trace.reason(format!("committed at spr {:.1}", s.spr));
            return Ok(shove(ctx));
        }

        let stats = TableStats::from_actions(&ctx.game.recent_actions, Some(ctx.seat));
        let fold_to_bet = if stats.sample_size() >= p.min_stats_sample {
            stats.table.fold_to_bet()
        } else {
            p.default_fold_to_bet
        };
        // every opponent has to fold
        let fold_equity = fold_to_bet.powi(s.opponents as i32);

        let fraction = if s.texture.is_wet() {
            p.wet_bet_fraction
        } else {
            p.dry_bet_fraction
        };
        let raise_to = ctx.pot_fraction_raise(fraction);
        let risk = raise_to.saturating_sub(ctx.player().current_bet);

        let pot = f64::from(s.pot);
        let ev_call = if s.can_check() {
            s.equity * pot
        } else {
            call_ev(s.equity, pot, f64::from(s.call))
        };
        let ev_raise = raise_ev(s.equity, pot, f64::from(risk), fold_equity);
        trace.reason(format!(
            "{} {}: ev call {ev_call:.1}, ev raise {ev_raise:.1}, fold equity {fold_equity:.2}",
            s.position,
            s.texture.label()
        ));

        let threshold = self.raise_threshold(s.position);
        let bluff = s.position.is_late()
            && s.texture.is_dry()
            && s.opponents == 1
            && chance(rng, p.bluff_frequency);
        let may_raise = ctx.can_raise() && (s.equity >= threshold || bluff);

        if may_raise && ev_raise > ev_call && ev_raise > 0.0 {
            if s.equity < threshold {
                trace.reason("positional bluff");
            }
            return Ok(Action::Raise(raise_to));
        }
        if s.can_check() || ev_call > 0.0 {
            return Ok(Action::Call);
        }
        Ok(Action::Fold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testutil::{context, heads_up};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn threshold_loosens_toward_the_button() {
        let s = AdvancedStrategy::default();
        assert!(
            s.raise_threshold(PositionBucket::Button) < s.raise_threshold(PositionBucket::Early)
        );
    }

    #[test]
    fn folds_trash_to_a_bet() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let e = heads_up(1000, "7h As 2d Ah");
        let mut trace = DecisionTrace::default();
        let a = AdvancedStrategy::default()
            .decide(&context(&e), &mut rng, &mut trace)
            .unwrap();
        assert_ne!(a, Action::Call);
    }
}
