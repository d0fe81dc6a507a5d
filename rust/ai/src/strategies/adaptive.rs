//! Stack-state classifier that picks a playing mode.

use std::fmt;

use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::{bet, chance, shove, situation};
use crate::analysis::TableStats;
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackState {
    Desperate,
    Short,
    Medium,
    Comfortable,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Survival,
    ValueBetting,
    Aggressive,
    Positional,
    Standard,
    Cautious,
    Defensive,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Survival => "survival",
            Mode::ValueBetting => "value-betting",
            Mode::Aggressive => "aggressive",
            Mode::Positional => "positional",
            Mode::Standard => "standard",
            Mode::Cautious => "cautious",
            Mode::Defensive => "defensive",
        })
    }
}

/// Thresholds one mode plays by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    /// Equity at or above which the mode bets or raises.
    pub raise: f64,
    /// Equity needed to call, on top of beating the pot odds.
    pub call: f64,
    /// Pot fraction to bet; `None` moves all-in instead of sizing a bet.
    #[serde(default)]
    pub bet_fraction: Option<f64>,
    /// Chance of betting anyway when no one has raised this round.
    pub bluff: f64,
}

impl ModeProfile {
    const fn new(raise: f64, call: f64, bet_fraction: Option<f64>, bluff: f64) -> Self {
        Self { raise, call, bet_fraction, bluff }
    }
}

/// One profile per mode. Modes left out of a config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeProfiles {
    pub survival: ModeProfile,
    pub value_betting: ModeProfile,
    pub aggressive: ModeProfile,
    pub positional: ModeProfile,
    pub standard: ModeProfile,
    pub cautious: ModeProfile,
    pub defensive: ModeProfile,
}

impl Default for ModeProfiles {
    fn default() -> Self {
        Self {
            survival: ModeProfile::new(0.55, 0.45, None, 0.0),
            value_betting: ModeProfile::new(0.6, 0.4, Some(0.75), 0.03),
            aggressive: ModeProfile::new(0.5, 0.35, Some(0.8), 0.2),
            positional: ModeProfile::new(0.52, 0.38, Some(0.6), 0.15),
            standard: ModeProfile::new(0.62, 0.42, Some(0.6), 0.05),
            cautious: ModeProfile::new(0.7, 0.5, Some(0.5), 0.0),
            defensive: ModeProfile::new(0.72, 0.5, Some(0.6), 0.0),
        }
    }
}

impl ModeProfiles {
    pub fn get(&self, mode: Mode) -> &ModeProfile {
        match mode {
            Mode::Survival => &self.survival,
            Mode::ValueBetting => &self.value_betting,
            Mode::Aggressive => &self.aggressive,
            Mode::Positional => &self.positional,
            Mode::Standard => &self.standard,
            Mode::Cautious => &self.cautious,
            Mode::Defensive => &self.defensive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveParams {
    pub desperate_bb: f64,
    pub short_bb: f64,
    pub medium_bb: f64,
    pub comfortable_bb: f64,
    /// Table aggression factor that switches to defensive play.
    pub aggressive_table_af: f64,
    pub min_stats_sample: u32,
    /// Deep stacks play cautiously against this many opponents or more.
    pub multiway_opponents: usize,
    pub profiles: ModeProfiles,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            desperate_bb: 5.0,
            short_bb: 15.0,
            medium_bb: 30.0,
            comfortable_bb: 60.0,
            aggressive_table_af: 2.0,
            min_stats_sample: 15,
            multiway_opponents: 3,
            profiles: ModeProfiles::default(),
        }
    }
}

impl AdaptiveParams {
    pub fn stack_state(&self, stack_bb: f64) -> StackState {
        if stack_bb < self.desperate_bb {
            StackState::Desperate
        } else if stack_bb < self.short_bb {
            StackState::Short
        } else if stack_bb < self.medium_bb {
            StackState::Medium
        } else if stack_bb < self.comfortable_bb {
            StackState::Comfortable
        } else {
            StackState::Deep
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdaptiveStrategy {
    params: AdaptiveParams,
}

impl AdaptiveStrategy {
    pub fn new(params: AdaptiveParams) -> Self {
        Self { params }
    }

    pub fn mode(
        &self,
        state: StackState,
        late: bool,
        opponents: usize,
        table_af: Option<f64>,
    ) -> Mode {
        if table_af.is_some_and(|af| af >= self.params.aggressive_table_af) {
            return Mode::Defensive;
        }
        match state {
            StackState::Desperate => Mode::Survival,
            StackState::Short => Mode::Aggressive,
            StackState::Medium if late => Mode::Positional,
            StackState::Medium => Mode::Standard,
            StackState::Comfortable => Mode::ValueBetting,
            StackState::Deep if opponents >= self.params.multiway_opponents => Mode::Cautious,
            StackState::Deep if late => Mode::Positional,
            StackState::Deep => Mode::Standard,
        }
    }
}

impl Strategy for AdaptiveStrategy {
    fn name(&self) -> &str {
        "adaptive"
    }

    fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        let s = situation(ctx, trace)?;
        let stats = TableStats::from_actions(&ctx.game.recent_actions, Some(ctx.seat));
        let table_af = (stats.sample_size() >= self.params.min_stats_sample)
            .then(|| stats.aggression_factor());
        let state = self.params.stack_state(s.stack_in_bb());
        let mode = self.mode(state, s.position.is_late(), s.opponents, table_af);
        let prof = *self.params.profiles.get(mode);
        trace.reason(format!("{state:?} stack at {:.1}bb, {mode} mode", s.stack_in_bb()));

        let aggressive = || match prof.bet_fraction {
            Some(f) => bet(ctx, f),
            None => shove(ctx),
        };
        if s.equity >= prof.raise {
            return Ok(aggressive());
        }
        if ctx.game.raises_this_round == 0 && chance(rng, prof.bluff) {
            trace.reason("mode bluff");
            return Ok(aggressive());
        }
        if s.can_check() || (s.equity >= prof.call && s.equity > s.pot_odds) {
            return Ok(Action::Call);
        }
        Ok(Action::Fold)
    }
}
