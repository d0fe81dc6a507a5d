use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{blind_seats, next_seat, seat_players, SeatConfig, TableConfig};
use crate::hand::{evaluate_hole, HandStrength};
use crate::logger::{ActionRecord, Street};
use crate::player::{Action, Player};
use crate::pot::{build_pots, split_pot};
use crate::rules::{min_raise_to, validate_action, BetState, ValidatedAction};
use crate::snapshot::{DecisionContext, PlayerView, TableSnapshot};

/// Most seats a single deck can serve: 52 cards minus five community cards
/// and three burns, two hole cards each.
pub const MAX_SEATS: usize = 22;

const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Where the hand currently is.
///
/// `Dealing → Betting(Preflop) → … → Betting(River) → Showdown → Payout →
/// HandComplete`, and `GameOver` once fewer than two players hold chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Dealing,
    Betting(Street),
    Showdown,
    Payout,
    HandComplete,
    GameOver,
}

/// Shared "running" flag. Clearing it stops the engine at its next hand
/// start, action or street transition.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of one finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_number: u64,
    /// Total chips awarded.
    pub pot: u32,
    /// Seats that received chips, in payout order.
    pub winners: Vec<usize>,
    pub payouts: Vec<(usize, u32)>,
    /// Whether hands were compared.
    pub showdown: bool,
    /// Evaluated hands of the contenders at showdown.
    pub hands: Vec<(usize, HandStrength)>,
    pub board: Vec<Card>,
}

/// What happened after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Waiting on `next` to act on `street`.
    Continue { next: usize, street: Street },
    HandComplete(HandResult),
}

impl Progress {
    pub fn is_hand_complete(&self) -> bool {
        matches!(self, Progress::HandComplete(_))
    }
}

/// Adjustment made by [`Engine::verify_balance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceCorrection {
    pub expected: u64,
    pub actual: u64,
    pub seat: usize,
}

/// The betting-round state machine for one table.
///
/// Owns the deck, the pot, the community cards and every player. Strategies
/// never touch it; they receive a [`DecisionContext`] and the caller feeds
/// the returned [`Action`] back through [`Engine::apply_action`].
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::{Engine, Progress};
/// use holdem_engine::game::{SeatConfig, TableConfig};
/// use holdem_engine::player::Action;
///
/// let seats = vec![SeatConfig::human("a"), SeatConfig::human("b")];
/// let mut engine = Engine::new(TableConfig::default(), &seats, Some(7)).unwrap();
/// let mut progress = engine.start_hand().unwrap();
/// while let Progress::Continue { next, .. } = progress {
///     progress = engine.apply_action(next, Action::Call).unwrap();
/// }
/// assert_eq!(engine.board().len(), 5);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: TableConfig,
    players: Vec<Player>,
    deck: Deck,
    saved_deck: Option<Deck>,
    seed: u64,
    community: Vec<Card>,
    pot: u32,
    current_bet: u32,
    raises_this_round: u32,
    acted: Vec<bool>,
    dealer: usize,
    small_blind_seat: usize,
    big_blind_seat: usize,
    street: Street,
    phase: Phase,
    to_act: Option<usize>,
    hand_number: u64,
    actions: Vec<ActionRecord>,
    recent: VecDeque<ActionRecord>,
    action_seq: u64,
    events: Vec<String>,
    expected_total: u64,
    running: StopHandle,
    last_result: Option<HandResult>,
}

impl Engine {
    pub fn new(
        config: TableConfig,
        seats: &[SeatConfig],
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if seats.len() > MAX_SEATS {
            return Err(GameError::InvalidConfig(format!(
                "at most {} seats supported",
                MAX_SEATS
            )));
        }
        let players = seat_players(&config, seats)?;
        let seed = seed.unwrap_or(DEFAULT_SEED);
        let expected_total = players.iter().map(|p| u64::from(p.stack())).sum();
        let n = players.len();
        Ok(Self {
            config,
            players,
            deck: Deck::new_with_seed(seed),
            saved_deck: None,
            seed,
            community: Vec::with_capacity(5),
            pot: 0,
            current_bet: 0,
            raises_this_round: 0,
            acted: vec![false; n],
            dealer: 0,
            small_blind_seat: 0,
            big_blind_seat: 0,
            street: Street::Preflop,
            phase: Phase::Idle,
            to_act: None,
            hand_number: 0,
            actions: Vec::new(),
            recent: VecDeque::new(),
            action_seq: 0,
            events: Vec::new(),
            expected_total,
            running: StopHandle::new(),
            last_result: None,
        })
    }

    // ----- accessors -------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn board(&self) -> &[Card] {
        &self.community
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    /// Chips swept into the pot on completed streets.
    pub fn pot(&self) -> u32 {
        self.pot
    }
    /// Pot plus bets outstanding on the current street.
    pub fn total_pot(&self) -> u32 {
        self.pot + self.players.iter().map(Player::current_bet).sum::<u32>()
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer
    }
    pub fn blind_indices(&self) -> (usize, usize) {
        (self.small_blind_seat, self.big_blind_seat)
    }
    pub fn blinds(&self) -> (u32, u32) {
        (self.config.small_blind, self.config.big_blind)
    }
    pub fn action_history(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn events(&self) -> &[String] {
        &self.events
    }
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }
    pub fn stop_handle(&self) -> StopHandle {
        self.running.clone()
    }
    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
    pub fn is_hand_in_progress(&self) -> bool {
        matches!(self.phase, Phase::Betting(_) | Phase::Dealing)
    }

    /// Seat whose decision is awaited, if any.
    pub fn current_player(&self) -> Option<usize> {
        match self.phase {
            Phase::Betting(_) => self.to_act,
            _ => None,
        }
    }

    pub fn to_call(&self, seat: usize) -> Result<u32, GameError> {
        let p = self.players.get(seat).ok_or(GameError::UnknownSeat(seat))?;
        Ok(self.current_bet.saturating_sub(p.current_bet()))
    }

    pub fn min_raise_to(&self) -> u32 {
        min_raise_to(self.current_bet, self.config.big_blind)
    }

    pub fn max_raise_to(&self, seat: usize) -> Result<u32, GameError> {
        let p = self.players.get(seat).ok_or(GameError::UnknownSeat(seat))?;
        Ok(p.current_bet() + p.stack())
    }

    /// Seats with chips left, i.e. the roster for the next hand.
    pub fn roster(&self) -> Vec<usize> {
        let in_hand = self.is_hand_in_progress();
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.stack() > 0 || (in_hand && p.total_bet() > 0))
            .map(|(i, _)| i)
            .collect()
    }

    /// `Σ stacks + pot + Σ outstanding bets`; constant for the whole game.
    pub fn chips_in_play(&self) -> u64 {
        let stacks: u64 = self
            .players
            .iter()
            .map(|p| u64::from(p.stack()) + u64::from(p.current_bet()))
            .sum();
        stacks + u64::from(self.pot)
    }

    pub fn expected_total(&self) -> u64 {
        self.expected_total
    }

    // ----- hand lifecycle --------------------------------------------------

    /// Starts the next hand with a freshly shuffled deck.
    pub fn start_hand(&mut self) -> Result<Progress, GameError> {
        if let Some(base) = self.saved_deck.take() {
            self.deck = base;
        }
        self.ensure_can_start()?;
        self.deck.shuffle();
        self.begin_hand()
    }

    /// Starts the next hand dealing from `deck` as-is (no shuffle). The
    /// engine's own seeded deck resumes on the following hand.
    pub fn start_hand_with_deck(&mut self, deck: Deck) -> Result<Progress, GameError> {
        self.ensure_can_start()?;
        let base = std::mem::replace(&mut self.deck, deck);
        if self.saved_deck.is_none() {
            self.saved_deck = Some(base);
        }
        self.begin_hand()
    }

    fn ensure_can_start(&mut self) -> Result<(), GameError> {
        if !self.is_running() {
            return Err(GameError::Stopped);
        }
        match self.phase {
            Phase::GameOver => return Err(GameError::GameOver),
            Phase::Dealing | Phase::Betting(_) | Phase::Showdown | Phase::Payout => {
                return Err(GameError::HandInProgress)
            }
            Phase::Idle | Phase::HandComplete => {}
        }
        for p in &mut self.players {
            p.clear_for_hand();
        }
        if self.players.iter().filter(|p| p.stack() > 0).count() < 2 {
            self.phase = Phase::GameOver;
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn begin_hand(&mut self) -> Result<Progress, GameError> {
        let live = |p: &Player| p.stack() > 0;
        self.dealer = if self.hand_number == 0 {
            if live(&self.players[self.dealer]) {
                self.dealer
            } else {
                next_seat(&self.players, self.dealer, live).ok_or(GameError::GameOver)?
            }
        } else {
            next_seat(&self.players, self.dealer, live).ok_or(GameError::GameOver)?
        };
        let (sb, bb) = blind_seats(&self.players, self.dealer).ok_or(GameError::GameOver)?;
        self.small_blind_seat = sb;
        self.big_blind_seat = bb;

        self.hand_number += 1;
        self.phase = Phase::Dealing;
        self.street = Street::Preflop;
        self.community.clear();
        self.actions.clear();
        self.events.clear();
        self.pot = 0;
        self.raises_this_round = 0;
        self.acted.iter_mut().for_each(|a| *a = false);
        self.last_result = None;

        info!(
            hand = self.hand_number,
            dealer = self.dealer,
            small_blind = sb,
            big_blind = bb,
            "starting hand"
        );
        self.log_event(format!(
            "Hand #{}: {} has the button",
            self.hand_number,
            self.players[self.dealer].name()
        ));

        let sb_paid = self.players[sb].commit(self.config.small_blind);
        let bb_paid = self.players[bb].commit(self.config.big_blind);
        self.current_bet = sb_paid.max(bb_paid);
        self.log_event(format!(
            "{} posts small blind {}",
            self.players[sb].name(),
            sb_paid
        ));
        self.log_event(format!("{} posts big blind {}", self.players[bb].name(), bb_paid));

        let order: Vec<usize> = self
            .seats_from(sb)
            .into_iter()
            .filter(|&i| self.players[i].is_active())
            .collect();
        for _ in 0..2 {
            for &seat in &order {
                let c = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                self.players[seat]
                    .give_card(c)
                    .map_err(GameError::InvalidConfig)?;
            }
        }

        self.phase = Phase::Betting(Street::Preflop);
        self.to_act = self.next_to_act(bb);
        if self.round_complete() {
            return self.complete_betting_round();
        }
        self.continue_progress()
    }

    /// Applies `action` for `seat` and advances the hand.
    pub fn apply_action(&mut self, seat: usize, action: Action) -> Result<Progress, GameError> {
        if !self.is_running() {
            return Err(GameError::Stopped);
        }
        let Phase::Betting(street) = self.phase else {
            return Err(GameError::NoHandInProgress);
        };
        let expected = self.to_act.ok_or(GameError::NoHandInProgress)?;
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }

        let state = self.bet_state(seat);
        let to_call = state.to_call();
        let validated = validate_action(&state, action)?;
        let before = self.players[seat].stack();
        let applied = match validated {
            ValidatedAction::Fold => {
                self.players[seat].fold();
                Action::Fold
            }
            ValidatedAction::Check => Action::Call,
            ValidatedAction::Call(n) => {
                self.players[seat].commit(n);
                Action::Call
            }
            ValidatedAction::Raise { to } => {
                let add = to - self.players[seat].current_bet();
                self.players[seat].commit(add);
                self.raise_to(seat, to);
                Action::Raise(to)
            }
            ValidatedAction::AllIn(n) => {
                self.players[seat].commit(n);
                let total = self.players[seat].current_bet();
                if total > self.current_bet {
                    self.raise_to(seat, total);
                    Action::Raise(total)
                } else {
                    Action::Call
                }
            }
        };
        let chips = before - self.players[seat].stack();
        self.acted[seat] = true;
        self.record(seat, street, applied, chips, to_call);

        if self.contenders() <= 1 {
            return self.finish_hand(false).map(Progress::HandComplete);
        }
        if self.round_complete() {
            return self.complete_betting_round();
        }
        self.to_act = self.next_to_act(seat);
        self.continue_progress()
    }

    /// Sweeps street bets into the pot and deals the next street, or goes to
    /// showdown after the river. The only place bets reach the pot.
    pub fn complete_betting_round(&mut self) -> Result<Progress, GameError> {
        if !self.is_running() {
            return Err(GameError::Stopped);
        }
        if !matches!(self.phase, Phase::Betting(_)) {
            return Err(GameError::NoHandInProgress);
        }
        loop {
            self.return_uncalled();
            let swept: u32 = self.players.iter().map(Player::current_bet).sum();
            self.pot += swept;
            for p in &mut self.players {
                p.reset_round();
            }
            self.current_bet = 0;
            self.raises_this_round = 0;
            self.acted.iter_mut().for_each(|a| *a = false);

            if self.contenders() <= 1 {
                return self.finish_hand(false).map(Progress::HandComplete);
            }
            let Some(next) = self.street.next() else {
                return self.finish_hand(true).map(Progress::HandComplete);
            };
            if !self.is_running() {
                return Err(GameError::Stopped);
            }
            self.deck.burn_card();
            for _ in 0..next.cards_dealt() {
                let c = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                self.community.push(c);
            }
            self.street = next;
            self.phase = Phase::Betting(next);
            let board: Vec<String> = self.community.iter().map(ToString::to_string).collect();
            self.log_event(format!("{}: {}", next, board.join(" ")));

            self.to_act = self.next_to_act(self.dealer);
            if !self.round_complete() {
                return self.continue_progress();
            }
            // nobody left to bet against: run the board out
        }
    }

    /// Checks `Σ stacks + pot + Σ bets` against the game total and, on drift,
    /// corrects the largest stack.
    pub fn verify_balance(&mut self) -> Option<BalanceCorrection> {
        let actual = self.chips_in_play();
        let expected = self.expected_total;
        if actual == expected {
            return None;
        }
        let seat = self
            .players
            .iter()
            .enumerate()
            .max_by_key(|(i, p)| (p.stack(), std::cmp::Reverse(*i)))
            .map(|(i, _)| i)?;
        let stack = i64::from(self.players[seat].stack());
        let fixed = (stack + expected as i64 - actual as i64).clamp(0, i64::from(u32::MAX));
        self.players[seat].set_stack(fixed as u32);
        warn!(expected, actual, seat, "chip balance drift corrected");
        self.log_event(format!(
            "Balance corrected: expected {} chips, found {}",
            expected, actual
        ));
        Some(BalanceCorrection {
            expected,
            actual,
            seat,
        })
    }

    // ----- snapshots -------------------------------------------------------

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            hand_number: self.hand_number,
            players: self
                .players
                .iter()
                .enumerate()
                .map(|(seat, p)| PlayerView {
                    id: p.id(),
                    name: p.name().to_string(),
                    seat,
                    chips: p.stack(),
                    current_bet: p.current_bet(),
                    total_bet: p.total_bet(),
                    folded: p.is_folded(),
                    all_in: p.is_all_in(),
                    active: p.is_active(),
                })
                .collect(),
            pot: self.pot,
            total_pot: self.total_pot(),
            current_bet: self.current_bet,
            min_raise_to: self.min_raise_to(),
            community_cards: self.community.clone(),
            dealer_index: self.dealer,
            small_blind_index: self.small_blind_seat,
            big_blind_index: self.big_blind_seat,
            small_blind_amount: self.config.small_blind,
            big_blind_amount: self.config.big_blind,
            round_name: self.street,
            raises_this_round: self.raises_this_round,
            max_raises_per_round: self.config.max_raises_per_round,
            actions: self.actions.clone(),
            recent_actions: self.recent.iter().cloned().collect(),
        }
    }

    /// Decision input for `seat`, which must be the seat to act.
    pub fn decision_context(&self, seat: usize) -> Result<DecisionContext, GameError> {
        let player = self.players.get(seat).ok_or(GameError::UnknownSeat(seat))?;
        if self.current_player() != Some(seat) {
            return Err(match self.to_act {
                Some(expected) if self.is_hand_in_progress() => GameError::NotPlayersTurn {
                    expected,
                    actual: seat,
                },
                _ => GameError::NoHandInProgress,
            });
        }
        Ok(DecisionContext {
            seat,
            hole_cards: player.hole_cards().to_vec(),
            call_amount: self.current_bet.saturating_sub(player.current_bet()),
            community_cards: self.community.clone(),
            pot_size: self.total_pot(),
            game: self.snapshot(),
        })
    }

    // ----- internals -------------------------------------------------------

    fn bet_state(&self, seat: usize) -> BetState {
        let p = &self.players[seat];
        BetState {
            stack: p.stack(),
            player_bet: p.current_bet(),
            current_bet: self.current_bet,
            min_raise_to: self.min_raise_to(),
            can_raise: self
                .config
                .max_raises_per_round
                .is_none_or(|cap| self.raises_this_round < cap),
        }
    }

    fn raise_to(&mut self, seat: usize, to: u32) {
        self.current_bet = to;
        self.raises_this_round += 1;
        for (i, acted) in self.acted.iter_mut().enumerate() {
            if i != seat {
                *acted = false;
            }
        }
    }

    fn record(&mut self, seat: usize, street: Street, action: Action, chips: u32, to_call: u32) {
        self.action_seq += 1;
        let rec = ActionRecord {
            seq: self.action_seq,
            hand: self.hand_number,
            seat,
            street,
            action,
            chips,
            to_call,
        };
        debug!(hand = self.hand_number, seat, %street, %action, chips, "action applied");
        let verb = match action {
            Action::Fold => "folds".to_string(),
            Action::Call if to_call == 0 => "checks".to_string(),
            Action::Call => format!("calls {}", chips),
            Action::Raise(to) => format!("raises to {}", to),
        };
        let all_in = if self.players[seat].is_all_in() && chips > 0 {
            " (all-in)"
        } else {
            ""
        };
        self.log_event(format!("{} {}{}", self.players[seat].name(), verb, all_in));
        self.actions.push(rec.clone());
        self.recent.push_back(rec);
        while self.recent.len() > self.config.recent_history {
            self.recent.pop_front();
        }
    }

    fn log_event(&mut self, msg: String) {
        debug!(hand = self.hand_number, "{}", msg);
        self.events.push(msg);
    }

    /// Seat indices starting at `from`, wrapping once around the table.
    fn seats_from(&self, from: usize) -> Vec<usize> {
        let n = self.players.len();
        (0..n).map(|k| (from + k) % n).collect()
    }

    fn contenders(&self) -> usize {
        self.players.iter().filter(|p| p.is_contender()).count()
    }

    fn needs_action(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        p.can_act() && (!self.acted[seat] || p.current_bet() < self.current_bet)
    }

    fn next_to_act(&self, after: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|k| (after + k) % n)
            .find(|&i| self.needs_action(i))
    }

    /// A street is over when one contender is left, or when nobody still
    /// able to bet owes chips or has yet to act. A lone player who can still
    /// bet has nobody to bet against once they have matched.
    fn round_complete(&self) -> bool {
        if self.contenders() <= 1 {
            return true;
        }
        let can_act: Vec<usize> = (0..self.players.len())
            .filter(|&i| self.players[i].can_act())
            .collect();
        match can_act.as_slice() {
            [] => true,
            [only] => self.players[*only].current_bet() >= self.current_bet,
            _ => can_act.iter().all(|&i| !self.needs_action(i)),
        }
    }

    fn continue_progress(&self) -> Result<Progress, GameError> {
        let next = self.to_act.ok_or(GameError::NoHandInProgress)?;
        Ok(Progress::Continue {
            next,
            street: self.street,
        })
    }

    /// Returns the part of the top bet nobody else matched.
    fn return_uncalled(&mut self) {
        let mut bets: Vec<(usize, u32)> = self
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.current_bet()))
            .collect();
        bets.sort_by(|a, b| b.1.cmp(&a.1));
        if let [(top_seat, top), (_, second), ..] = bets.as_slice() {
            if top > second {
                let excess = top - second;
                let seat = *top_seat;
                self.players[seat].refund(excess);
                self.log_event(format!(
                    "Uncalled {} returned to {}",
                    excess,
                    self.players[seat].name()
                ));
            }
        }
    }

    fn finish_hand(&mut self, showdown: bool) -> Result<HandResult, GameError> {
        // sweep anything still in front of players (fold wins mid-street)
        let swept: u32 = self.players.iter().map(Player::current_bet).sum();
        self.pot += swept;
        for p in &mut self.players {
            p.reset_round();
        }
        self.current_bet = 0;
        self.to_act = None;

        let order = self.seats_from((self.dealer + 1) % self.players.len());
        let hands: Vec<(usize, HandStrength)> = if showdown {
            self.phase = Phase::Showdown;
            order
                .iter()
                .filter(|&&i| self.players[i].is_contender())
                .filter_map(|&i| {
                    evaluate_hole(self.players[i].hole_cards(), &self.community).map(|h| (i, h))
                })
                .collect()
        } else {
            Vec::new()
        };
        if showdown {
            for (seat, hs) in &hands {
                let cards: Vec<String> = self.players[*seat]
                    .hole_cards()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                self.log_event(format!(
                    "{} shows {} ({})",
                    self.players[*seat].name(),
                    cards.join(" "),
                    hs.category
                ));
            }
        }

        self.phase = Phase::Payout;
        let contributions: Vec<(usize, u32, bool)> = order
            .iter()
            .map(|&i| {
                let p = &self.players[i];
                (i, p.total_bet(), p.is_folded())
            })
            .collect();
        let contenders: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&i| self.players[i].is_contender())
            .collect();

        let mut payouts: Vec<(usize, u32)> = Vec::new();
        for pot in build_pots(&contributions) {
            let eligible = if pot.eligible.is_empty() {
                contenders.clone()
            } else {
                pot.eligible
            };
            let winners: Vec<usize> = if hands.is_empty() || eligible.len() == 1 {
                eligible
            } else {
                let best = eligible
                    .iter()
                    .filter_map(|s| hands.iter().find(|(h, _)| h == s).map(|(_, hs)| hs))
                    .max()
                    .cloned();
                eligible
                    .into_iter()
                    .filter(|s| {
                        hands
                            .iter()
                            .any(|(h, hs)| h == s && Some(hs) == best.as_ref())
                    })
                    .collect()
            };
            for (seat, amount) in split_pot(pot.amount, &winners) {
                match payouts.iter_mut().find(|(s, _)| *s == seat) {
                    Some(entry) => entry.1 += amount,
                    None => payouts.push((seat, amount)),
                }
            }
        }

        let awarded: u32 = payouts.iter().map(|(_, a)| a).sum();
        for &(seat, amount) in &payouts {
            self.players[seat].add_chips(amount);
            self.log_event(format!("{} wins {}", self.players[seat].name(), amount));
        }
        self.pot -= awarded.min(self.pot);
        let winners: Vec<usize> = payouts.iter().filter(|(_, a)| *a > 0).map(|(s, _)| *s).collect();

        let result = HandResult {
            hand_number: self.hand_number,
            pot: awarded,
            winners,
            payouts,
            showdown,
            hands,
            board: self.community.clone(),
        };
        info!(
            hand = self.hand_number,
            pot = awarded,
            showdown,
            winners = ?result.winners,
            "hand complete"
        );

        self.verify_balance();
        self.phase = if self.players.iter().filter(|p| p.stack() > 0).count() < 2 {
            info!(hand = self.hand_number, "game over");
            Phase::GameOver
        } else {
            Phase::HandComplete
        };
        self.last_result = Some(result.clone());
        Ok(result)
    }
}
