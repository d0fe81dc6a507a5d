use std::fmt;

use holdem_engine::hand::Category;
use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, chance, situation};
use crate::analysis::{HandClass, Situation};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

/// Coarse holding class used as the row key of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandTier {
    Weak,
    Draw,
    Medium,
    Strong,
    Monster,
}

impl fmt::Display for HandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandTier::Weak => "weak",
            HandTier::Draw => "draw",
            HandTier::Medium => "medium",
            HandTier::Strong => "strong",
            HandTier::Monster => "monster",
        };
        f.write_str(s)
    }
}

/// Classifies the holding. Postflop a pair only counts when a hole card
/// makes it: overpairs and top pair with a ten-or-better kicker are strong,
/// other pairs are medium, and a pair on the board alone is weak.
pub fn hand_tier(ctx: &DecisionContext, s: &Situation) -> HandTier {
    let made = match &s.made {
        Some(made) if !s.is_preflop() => made,
        _ => {
            return match HandClass::from_score(s.chart) {
                HandClass::Premium => HandTier::Monster,
                HandClass::Strong => HandTier::Strong,
                HandClass::Playable => HandTier::Medium,
                HandClass::Marginal | HandClass::Weak => HandTier::Weak,
            };
        }
    };
    let hole: Vec<u8> = ctx.hole_cards.iter().map(|c| c.rank.value()).collect();
    let draw_or_weak = if s.draws.outs() >= 8 {
        HandTier::Draw
    } else {
        HandTier::Weak
    };
    match made.category {
        Category::ThreeOfAKind
        | Category::Straight
        | Category::Flush
        | Category::FullHouse
        | Category::FourOfAKind
        | Category::StraightFlush => HandTier::Monster,
        Category::TwoPair if s.texture.paired => HandTier::Medium,
        Category::TwoPair => HandTier::Strong,
        Category::OnePair => {
            let pair = made.kickers[0];
            let pocket = hole.len() == 2 && hole[0] == hole[1];
            if pocket && pair > s.texture.high_rank {
                HandTier::Strong
            } else if !hole.contains(&pair) {
                draw_or_weak
            } else if pair == s.texture.high_rank {
                let kicker = hole.iter().copied().find(|&r| r != pair).unwrap_or(pair);
                if kicker >= 10 {
                    HandTier::Strong
                } else {
                    HandTier::Medium
                }
            } else {
                HandTier::Medium
            }
        }
        Category::HighCard => draw_or_weak,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicParams {
    pub monster_wet_fraction: f64,
    pub monster_dry_fraction: f64,
    pub strong_wet_fraction: f64,
    pub strong_dry_fraction: f64,
    pub strong_max_pot_odds: f64,
    /// Strong hands raise for protection on wet boards below these odds.
    pub protection_pot_odds: f64,
    pub medium_max_pot_odds: f64,
    pub small_bet_fraction: f64,
    pub semi_bluff_frequency: f64,
    pub bluff_frequency: f64,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        Self {
            monster_wet_fraction: 0.75,
            monster_dry_fraction: 0.5,
            strong_wet_fraction: 0.66,
            strong_dry_fraction: 0.5,
            strong_max_pot_odds: 0.4,
            protection_pot_odds: 0.25,
            medium_max_pot_odds: 0.3,
            small_bet_fraction: 0.33,
            semi_bluff_frequency: 0.4,
            bluff_frequency: 0.1,
        }
    }
}

/// A rule table keyed on hand tier and board texture.
#[derive(Debug, Clone, Default)]
pub struct HeuristicStrategy {
    params: HeuristicParams,
}

impl HeuristicStrategy {
    pub fn new(params: HeuristicParams) -> Self {
        Self { params }
    }
}

impl Strategy for HeuristicStrategy {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let p = &self.params;
        let s = situation(ctx, trace)?;
        let tier = hand_tier(ctx, &s);
        let wet = s.texture.is_wet();
        let heads_up = s.opponents == 1;
        trace.reason(format!("{tier} hand on a {} board", s.texture.label()));

        let action = match tier {
            HandTier::Monster => {
                let fraction = if wet { p.monster_wet_fraction } else { p.monster_dry_fraction };
                bet(ctx, fraction)
            }
            HandTier::Strong => {
                let fraction = if wet { p.strong_wet_fraction } else { p.strong_dry_fraction };
                if s.can_check() || (wet && s.pot_odds <= p.protection_pot_odds) {
                    bet(ctx, fraction)
                } else if s.pot_odds <= p.strong_max_pot_odds {
                    Action::Call
                } else {
                    Action::Fold
                }
            }
            HandTier::Medium => {
                if s.can_check() {
                    if s.position.is_late() && !wet && heads_up && !s.is_preflop() {
                        bet(ctx, p.small_bet_fraction)
                    } else {
                        Action::Call
                    }
                } else if s.pot_odds <= p.medium_max_pot_odds {
                    Action::Call
                } else {
                    Action::Fold
                }
            }
            HandTier::Draw => {
                if s.can_check() {
                    if chance(rng, p.semi_bluff_frequency) {
                        bet(ctx, p.strong_wet_fraction)
                    } else {
                        Action::Call
                    }
                } else if s.draw_equity() >= s.pot_odds {
                    Action::Call
                } else {
                    Action::Fold
                }
            }
            HandTier::Weak => {
                if !s.can_check() {
                    Action::Fold
                } else if !wet && heads_up && !s.is_preflop() && chance(rng, p.bluff_frequency) {
                    bet(ctx, p.small_bet_fraction)
                } else {
                    Action::Call
                }
            }
        };
        Ok(action)
    }
}
