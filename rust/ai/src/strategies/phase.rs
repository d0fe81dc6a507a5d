use std::fmt;

use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, chance, situation};
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

/// Stage of the game judged by average stack depth and players left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Early,
    Middle,
    Late,
    HeadsUp,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GamePhase::Early => "early",
            GamePhase::Middle => "middle",
            GamePhase::Late => "late",
            GamePhase::HeadsUp => "heads-up",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseProfile {
    pub raise: f64,
    pub call: f64,
    pub bet_fraction: f64,
    /// Unraised pots attacked with any two cards.
    pub steal: f64,
}

impl Default for PhaseProfile {
    fn default() -> Self {
        Self {
            raise: 0.6,
            call: 0.42,
            bet_fraction: 0.66,
            steal: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseParams {
    /// Average stack, in big blinds, at or above which the game is early.
    pub early_avg_bb: f64,
    /// Below this average the game is late.
    pub late_avg_bb: f64,
    pub early: PhaseProfile,
    pub middle: PhaseProfile,
    pub late: PhaseProfile,
    pub heads_up: PhaseProfile,
}

impl Default for PhaseParams {
    fn default() -> Self {
        Self {
            early_avg_bb: 50.0,
            late_avg_bb: 20.0,
            early: PhaseProfile {
                raise: 0.65,
                call: 0.45,
                bet_fraction: 0.6,
                steal: 0.05,
            },
            middle: PhaseProfile::default(),
            late: PhaseProfile {
                raise: 0.52,
                call: 0.38,
                bet_fraction: 0.75,
                steal: 0.2,
            },
            heads_up: PhaseProfile {
                raise: 0.5,
                call: 0.35,
                bet_fraction: 0.6,
                steal: 0.25,
            },
        }
    }
}

impl PhaseParams {
    pub fn phase(&self, average_bb: f64, players_left: usize) -> GamePhase {
        if players_left <= 2 {
            GamePhase::HeadsUp
        } else if average_bb >= self.early_avg_bb {
            GamePhase::Early
        } else if average_bb >= self.late_avg_bb {
            GamePhase::Middle
        } else {
            GamePhase::Late
        }
    }

    fn profile(&self, phase: GamePhase) -> &PhaseProfile {
        match phase {
            GamePhase::Early => &self.early,
            GamePhase::Middle => &self.middle,
            GamePhase::Late => &self.late,
            GamePhase::HeadsUp => &self.heads_up,
        }
    }
}

/// Tight while stacks are deep, looser and more aggressive as blinds grow
/// relative to the average stack.
#[derive(Debug, Clone, Default)]
pub struct PhaseStrategy {
    params: PhaseParams,
}

impl PhaseStrategy {
    pub fn new(params: PhaseParams) -> Self {
        Self { params }
    }
}

impl Strategy for PhaseStrategy {
    fn name(&self) -> &str {
        "phase"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let s = situation(ctx, trace)?;
        let average_bb = ctx.game.average_stack() / f64::from(ctx.big_blind());
        let phase = self.params.phase(average_bb, ctx.game.active_players().count());
        let prof = self.params.profile(phase);
        trace.reason(format!("{phase} phase, average stack {average_bb:.0}bb"));

        if s.equity >= prof.raise {
            return Ok(bet(ctx, prof.bet_fraction));
        }
        if ctx.game.raises_this_round == 0 && !s.can_check() && chance(rng, prof.steal) {
            trace.reason("steal");
            return Ok(bet(ctx, prof.bet_fraction));
        }
        if s.can_check() || (s.equity >= prof.call && s.equity > s.pot_odds) {
            return Ok(Action::Call);
        }
        Ok(Action::Fold)
    }
}
