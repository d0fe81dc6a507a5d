//! The boundary between a strategy and the table.
//!
//! [`Dispatcher::decide`] never fails and always returns an action the state
//! machine accepts: short stacks go through a push/fold shortcut, strategy
//! errors and panics become a conservative default, and raise sizes are
//! clamped to the legal range.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use holdem_engine::strength::estimate_strength;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::odds::pot_odds;
use crate::strategy::Strategy;
use crate::trace::{DecisionLogger, DecisionRecord, DecisionTrace};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchParams {
    /// Effective stack, in big blinds, at or below which push/fold applies.
    pub push_fold_bb: f64,
    /// Strength above which a short stack moves all-in.
    pub push_threshold: f64,
    /// Shove threshold as the effective stack approaches zero; scales
    /// linearly up to `push_threshold` at `push_fold_bb`.
    pub shove_floor: f64,
    /// Calls up to this many big blinds count as inexpensive.
    pub cheap_call_bb: f64,
    /// Calls up to this share of the stack count as inexpensive.
    pub cheap_call_stack_fraction: f64,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            push_fold_bb: 10.0,
            push_threshold: 0.8,
            shove_floor: 0.45,
            cheap_call_bb: 1.0,
            cheap_call_stack_fraction: 0.05,
        }
    }
}

/// Smaller of this seat's street chips and the deepest opponent's.
pub fn effective_stack(ctx: &DecisionContext) -> u32 {
    let me = ctx.player();
    let ours = me.chips + me.current_bet;
    let deepest = ctx
        .opponents()
        .map(|p| p.chips + p.current_bet)
        .max()
        .unwrap_or(ours);
    ours.min(deepest)
}

/// Check if free, call if inexpensive, otherwise fold.
pub fn conservative_action(ctx: &DecisionContext, params: &DispatchParams) -> Action {
    let call = f64::from(ctx.call_amount);
    if ctx.call_amount == 0
        || call <= params.cheap_call_bb * f64::from(ctx.big_blind())
        || call <= params.cheap_call_stack_fraction * f64::from(ctx.stack())
    {
        Action::Call
    } else {
        Action::Fold
    }
}

/// Maps any action onto one the state machine accepts as-is.
pub fn legalize(ctx: &DecisionContext, action: Action) -> Action {
    match action {
        Action::Raise(_) if !ctx.can_raise() => Action::Call,
        Action::Raise(to) => Action::Raise(ctx.clamp_raise(to)),
        other => other,
    }
}

/// Break-even equity for calling, ignoring chips no one can match.
fn all_in_call_odds(ctx: &DecisionContext, call: u32) -> f64 {
    let matched = ctx.player().current_bet + call;
    let dead = ctx.game.current_bet.saturating_sub(matched);
    pot_odds(call, ctx.pot_size.saturating_sub(dead))
}

fn push_fold(
    ctx: &DecisionContext,
    params: &DispatchParams,
    trace: &mut DecisionTrace,
) -> Option<Action> {
    if ctx.hole_cards.len() != 2 {
        return None;
    }
    let effective = effective_stack(ctx);
    let eff_bb = f64::from(effective) / f64::from(ctx.big_blind());
    if eff_bb > params.push_fold_bb {
        return None;
    }
    let strength = estimate_strength(&ctx.hole_cards, &ctx.community_cards);
    let depth = (eff_bb / params.push_fold_bb).clamp(0.0, 1.0);
    let shove_at = params.shove_floor + (params.push_threshold - params.shove_floor) * depth;
    trace.strength = Some(strength);
    trace.reason(format!(
        "push/fold at {eff_bb:.1}bb effective, strength {strength:.2}, shove above {shove_at:.2}"
    ));

    let call = ctx.call_amount.min(ctx.stack());
    // calling puts the effective stack in, so the call is the all-in decision
    let commits = call > 0 && ctx.player().current_bet + call >= effective;
    let action = if strength > shove_at.min(params.push_threshold) {
        Action::Raise(ctx.max_raise_to())
    } else if call == 0 {
        Action::Call
    } else if commits && strength >= all_in_call_odds(ctx, call) {
        trace.reason(format!("all-in call, break-even {:.2}", all_in_call_odds(ctx, call)));
        Action::Call
    } else {
        Action::Fold
    };
    Some(action)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// One seat's decision source: a strategy instance plus the safety net
/// around it.
pub struct Dispatcher {
    id: String,
    strategy: Box<dyn Strategy>,
    params: DispatchParams,
    decisions: u64,
    fallbacks: u64,
}

impl Dispatcher {
    pub fn new(id: impl Into<String>, strategy: Box<dyn Strategy>, params: DispatchParams) -> Self {
        Self {
            id: id.into(),
            strategy,
            params,
            decisions: 0,
            fallbacks: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    /// Decisions where the strategy failed and the conservative default was used.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }

    pub fn decide(
        &mut self,
        ctx: &DecisionContext,
        rng: &mut dyn RngCore,
        logger: Option<&mut dyn DecisionLogger>,
    ) -> Action {
        self.decisions += 1;
        let mut trace = DecisionTrace::new(self.strategy.name());

        let chosen = match push_fold(ctx, &self.params, &mut trace) {
            Some(action) => action,
            None => {
                let strategy = &mut self.strategy;
                let outcome =
                    catch_unwind(AssertUnwindSafe(|| strategy.decide(ctx, rng, &mut trace)));
                let failure = match outcome {
                    Ok(Ok(action)) => Ok(action),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
                };
                match failure {
                    Ok(action) => action,
                    Err(why) => {
                        self.fallbacks += 1;
                        warn!(
                            seat = ctx.seat,
                            strategy = %self.id,
                            error = %why,
                            "strategy failed, using conservative default"
                        );
                        trace.fallback = Some(why);
                        conservative_action(ctx, &self.params)
                    }
                }
            }
        };

        let action = legalize(ctx, chosen);
        if action != chosen {
            trace.reason(format!("{chosen} adjusted to {action}"));
        }
        debug!(seat = ctx.seat, strategy = %self.id, %action, "ai decision");

        if let Some(logger) = logger {
            logger.record(&DecisionRecord {
                hand: ctx.game.hand_number,
                seat: ctx.seat,
                street: ctx.street(),
                strategy: self.id.clone(),
                action,
                trace,
            });
        }
        action
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("id", &self.id)
            .field("params", &self.params)
            .field("decisions", &self.decisions)
            .field("fallbacks", &self.fallbacks)
            .finish()
    }
}
