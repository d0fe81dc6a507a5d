//! Shared analysis used by the strategies: odds and EV math, board texture,
//! position buckets, the starting-hand chart, table statistics and Monte
//! Carlo equity.

pub mod equity;
pub mod odds;
pub mod position;
pub mod preflop;
pub mod stats;
pub mod texture;

use holdem_engine::hand::{evaluate_hole, Category, HandStrength};
use holdem_engine::logger::Street;
use holdem_engine::snapshot::DecisionContext;
use holdem_engine::strength::{detect_draws, estimate_strength, DrawInfo};

use crate::error::StrategyError;
pub use equity::{monte_carlo_equity, EquityEstimate};
pub use odds::{
    call_ev, equity_vs_field, kelly_fraction, pot_odds, raise_ev, spr, spr_zone, SprZone,
};
pub use position::PositionBucket;
pub use preflop::{chart_score, hand_class, HandClass};
pub use stats::{SeatProfile, TableStats};
pub use texture::BoardTexture;

/// Everything most strategies derive from a decision context, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Situation {
    pub strength: f64,
    /// Strength discounted for the number of opponents.
    pub equity: f64,
    pub pot_odds: f64,
    pub call: u32,
    pub pot: u32,
    pub stack: u32,
    pub big_blind: u32,
    pub opponents: usize,
    pub street: Street,
    pub texture: BoardTexture,
    pub position: PositionBucket,
    pub draws: DrawInfo,
    /// Best made hand once five cards are known.
    pub made: Option<HandStrength>,
    pub chart: u8,
    pub spr: f64,
}

impl Situation {
    pub fn read(ctx: &DecisionContext) -> Result<Self, StrategyError> {
        let [a, b] = ctx.hole_cards.as_slice() else {
            return Err(StrategyError::NoHoleCards(ctx.seat));
        };
        if ctx.game.players.get(ctx.seat).is_none() {
            return Err(StrategyError::InvalidContext(format!(
                "seat {} not at the table",
                ctx.seat
            )));
        }
        let strength = estimate_strength(&ctx.hole_cards, &ctx.community_cards);
        let opponents = ctx.opponent_count().max(1);
        let mut known = ctx.hole_cards.clone();
        known.extend_from_slice(&ctx.community_cards);
        Ok(Self {
            strength,
            equity: equity_vs_field(strength, opponents),
            pot_odds: pot_odds(ctx.call_amount, ctx.pot_size),
            call: ctx.call_amount,
            pot: ctx.pot_size,
            stack: ctx.stack(),
            big_blind: ctx.big_blind(),
            opponents,
            street: ctx.street(),
            texture: BoardTexture::analyze(&ctx.community_cards),
            position: PositionBucket::classify(ctx.seat, &ctx.game),
            draws: detect_draws(&known),
            made: evaluate_hole(&ctx.hole_cards, &ctx.community_cards),
            chart: chart_score(*a, *b),
            spr: spr(ctx.stack(), ctx.pot_size),
        })
    }

    pub fn can_check(&self) -> bool {
        self.call == 0
    }

    pub fn is_preflop(&self) -> bool {
        self.street == Street::Preflop
    }

    pub fn stack_in_bb(&self) -> f64 {
        f64::from(self.stack) / f64::from(self.big_blind.max(1))
    }

    pub fn call_in_bb(&self) -> f64 {
        f64::from(self.call) / f64::from(self.big_blind.max(1))
    }

    pub fn category(&self) -> Option<Category> {
        self.made.as_ref().map(|h| h.category)
    }

    /// Chance of completing a draw by the river, two percent per out per
    /// card to come.
    pub fn draw_equity(&self) -> f64 {
        let to_come = match self.street {
            Street::Flop => 2.0,
            Street::Turn => 1.0,
            _ => 0.0,
        };
        (f64::from(self.draws.outs()) * 0.02 * to_come).min(1.0)
    }

    /// Made hand of two pair or better.
    pub fn has_strong_made_hand(&self) -> bool {
        self.category().is_some_and(|c| c >= Category::TwoPair)
    }
}
