//! Shallow game-tree search over fold, call and pot-sized raises.
//!
//! Values are net chips relative to the decision point. Showdown leaves use
//! the current equity estimate; facing a re-raise that equity is discounted.
//! The opponent either picks the worst reply for us (minimax, alpha-beta)
//! or replies by a fixed probability model (expectimax).

use std::fmt;

use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::situation;
use crate::analysis::Situation;
use crate::error::StrategyError;
use crate::strategy::Strategy;
use crate::trace::DecisionTrace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Plies below the root, counting each raise and re-raise.
    pub depth: u32,
    /// Raise sizes tried, as fractions of the pot after calling.
    pub raise_fractions: Vec<f64>,
    pub include_all_in: bool,
    /// Raises modelled inside the tree, on top of any the street already had.
    pub max_raises: u32,
    pub base_fold: f64,
    /// Extra fold probability per pot-sized bet faced.
    pub fold_per_pot: f64,
    pub base_raise: f64,
    /// How strongly our equity shifts the opponent's fold and raise rates.
    pub strength_weight: f64,
    /// Our equity is multiplied by this after the opponent re-raises.
    pub reraise_equity_factor: f64,
    /// Opponent re-raise size as a pot fraction.
    pub reraise_fraction: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 3,
            raise_fractions: vec![0.5, 1.0],
            include_all_in: true,
            max_raises: 2,
            base_fold: 0.25,
            fold_per_pot: 0.25,
            base_raise: 0.15,
            strength_weight: 0.2,
            reraise_equity_factor: 0.8,
            reraise_fraction: 1.0,
        }
    }
}

impl SearchParams {
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Sizing {
    Pot(f64),
    AllIn,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Choice {
    Call,
    Raise(Sizing),
    Fold,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Call => f.write_str("call"),
            Choice::Fold => f.write_str("fold"),
            Choice::Raise(Sizing::Pot(x)) => write!(f, "raise {x:.2} pot"),
            Choice::Raise(Sizing::AllIn) => f.write_str("all-in"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    pot: f64,
    /// Chips we have put in since the decision point.
    spent: f64,
    /// What the player to act owes.
    owe: f64,
    stack: f64,
    opp_stack: f64,
    equity: f64,
    depth: u32,
    raises_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Worst,
    Expected,
}

struct Tree<'a> {
    params: &'a SearchParams,
    reply: Reply,
    prune: bool,
    explored: u64,
    pruned: u64,
}

impl Tree<'_> {
    fn our_options(&self, n: &Node) -> Vec<Choice> {
        let mut options = vec![Choice::Call];
        if n.depth > 0 && n.raises_left > 0 && n.stack > n.owe && n.opp_stack > 0.0 {
            options.extend(
                self.params
                    .raise_fractions
                    .iter()
                    .map(|&f| Choice::Raise(Sizing::Pot(f))),
            );
            if self.params.include_all_in {
                options.push(Choice::Raise(Sizing::AllIn));
            }
        }
        options.push(Choice::Fold);
        options
    }

    fn our_value(&mut self, n: &Node, choice: Choice, alpha: f64, beta: f64) -> f64 {
        match choice {
            Choice::Fold => -n.spent,
            Choice::Call => {
                let put = n.owe.min(n.stack);
                n.equity * (n.pot + put) - (n.spent + put)
            }
            Choice::Raise(size) => {
                let extra = match size {
                    Sizing::Pot(f) => f * (n.pot + n.owe),
                    Sizing::AllIn => n.stack - n.owe,
                };
                let put = (n.owe + extra).min(n.stack).min(n.owe + n.opp_stack);
                let child = Node {
                    pot: n.pot + put,
                    spent: n.spent + put,
                    owe: put - n.owe,
                    stack: n.stack - put,
                    opp_stack: n.opp_stack,
                    equity: n.equity,
                    depth: n.depth - 1,
                    raises_left: n.raises_left - 1,
                };
                self.opponent_node(child, alpha, beta)
            }
        }
    }

    fn our_node(&mut self, n: Node, mut alpha: f64, beta: f64) -> f64 {
        self.explored += 1;
        let options = self.our_options(&n);
        let mut best = f64::NEG_INFINITY;
        for (i, &choice) in options.iter().enumerate() {
            best = best.max(self.our_value(&n, choice, alpha, beta));
            if self.prune {
                alpha = alpha.max(best);
                if alpha >= beta {
                    self.pruned += (options.len() - i - 1) as u64;
                    break;
                }
            }
        }
        best
    }

    /// Our node after the opponent re-raises, if they can.
    fn reraise(&self, n: &Node) -> Option<Node> {
        if n.depth == 0 || n.raises_left == 0 {
            return None;
        }
        let extra = (self.params.reraise_fraction * (n.pot + n.owe))
            .min(n.opp_stack - n.owe)
            .min(n.stack);
        (extra > 0.0).then(|| Node {
            pot: n.pot + n.owe + extra,
            spent: n.spent,
            owe: extra,
            stack: n.stack,
            opp_stack: n.opp_stack - n.owe - extra,
            equity: n.equity * self.params.reraise_equity_factor,
            depth: n.depth - 1,
            raises_left: n.raises_left - 1,
        })
    }

    /// `(fold, call, raise)` reply probabilities.
    fn reply_odds(&self, n: &Node, can_raise: bool) -> (f64, f64, f64) {
        let p = self.params;
        let before = (n.pot - n.owe).max(1.0);
        let bet_ratio = n.owe / before;
        let fold = (p.base_fold + bet_ratio * p.fold_per_pot + (n.equity - 0.5) * p.strength_weight)
            .clamp(0.05, 0.85);
        let raise = if can_raise {
            (p.base_raise + (0.5 - n.equity) * p.strength_weight).clamp(0.0, 0.5)
        } else {
            0.0
        };
        let call = (1.0 - fold - raise).max(0.0);
        let total = fold + call + raise;
        (fold / total, call / total, raise / total)
    }

    fn opponent_node(&mut self, n: Node, alpha: f64, mut beta: f64) -> f64 {
        self.explored += 1;
        let fold = n.pot - n.spent;
        let call = n.equity * (n.pot + n.owe) - n.spent;
        let raise = self.reraise(&n);

        match self.reply {
            Reply::Expected => {
                let (pf, pc, pr) = self.reply_odds(&n, raise.is_some());
                let raised = match raise {
                    Some(child) => self.our_node(child, f64::NEG_INFINITY, f64::INFINITY),
                    None => 0.0,
                };
                pf * fold + pc * call + pr * raised
            }
            Reply::Worst => {
                let mut worst = call;
                if self.prune {
                    beta = beta.min(worst);
                    if alpha >= beta {
                        self.pruned += 1 + u64::from(raise.is_some());
                        return worst;
                    }
                }
                if let Some(child) = raise {
                    worst = worst.min(self.our_node(child, alpha, beta));
                    if self.prune {
                        beta = beta.min(worst);
                        if alpha >= beta {
                            self.pruned += 1;
                            return worst;
                        }
                    }
                }
                worst.min(fold)
            }
        }
    }
}

fn search(
    ctx: &DecisionContext,
    s: &Situation,
    params: &SearchParams,
    reply: Reply,
    prune: bool,
    trace: &mut DecisionTrace,
) -> Action {
    let remaining_cap = ctx
        .game
        .max_raises_per_round
        .map_or(u32::MAX, |cap| cap.saturating_sub(ctx.game.raises_this_round));
    let raises_left = if ctx.can_raise() {
        params.max_raises.min(remaining_cap)
    } else {
        0
    };
    let opp_stack = ctx.opponents().map(|p| p.chips).max().unwrap_or(0);
    let root = Node {
        pot: f64::from(s.pot),
        spent: 0.0,
        owe: f64::from(s.call),
        stack: f64::from(s.stack),
        opp_stack: f64::from(opp_stack),
        equity: s.equity,
        depth: params.depth,
        raises_left,
    };

    let mut tree = Tree {
        params,
        reply,
        prune,
        explored: 1,
        pruned: 0,
    };
    let mut alpha = f64::NEG_INFINITY;
    let mut best = (f64::NEG_INFINITY, Choice::Call);
    for choice in tree.our_options(&root) {
        let value = tree.our_value(&root, choice, alpha, f64::INFINITY);
        trace.step(format!("{choice}: {value:.1}"));
        if value > best.0 {
            best = (value, choice);
        }
        if prune {
            alpha = alpha.max(value);
        }
    }
    trace.nodes_explored = tree.explored;
    trace.nodes_pruned = tree.pruned;
    trace.reason(format!(
        "depth {} picks {} at {:.1} chips, equity {:.2}",
        params.depth, best.1, best.0, s.equity
    ));

    match best.1 {
        Choice::Fold if s.can_check() => Action::Call,
        Choice::Fold => Action::Fold,
        Choice::Call => Action::Call,
        Choice::Raise(Sizing::Pot(f)) => Action::Raise(ctx.pot_fraction_raise(f)),
        Choice::Raise(Sizing::AllIn) => Action::Raise(ctx.max_raise_to()),
    }
}

macro_rules! search_strategy {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $reply:expr, $prune:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            params: SearchParams,
        }

        impl $ty {
            pub fn new(params: SearchParams) -> Self {
                Self { params }
            }
        }

        impl Strategy for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn decide(
                &mut self,
                ctx: &DecisionContext,
                _rng: &mut dyn RngCore,
                trace: &mut DecisionTrace,
            ) -> Result<Action, StrategyError> {
                let s = situation(ctx, trace)?;
                Ok(search(ctx, &s, &self.params, $reply, $prune, trace))
            }
        }
    };
}

search_strategy!(
    /// Assumes the opponent always makes the reply worst for us.
    MinimaxStrategy, "minimax", Reply::Worst, false
);
search_strategy!(
    /// Minimax with alpha-beta pruning; same decisions, fewer nodes.
    AlphaBetaStrategy, "alphabeta", Reply::Worst, true
);
search_strategy!(
    /// Averages over a probabilistic opponent reply model.
    ExpectimaxStrategy, "expectimax", Reply::Expected, false
);
