use holdem_ai::{
    build_agents, play_hand, AiError, DecisionLogger, DecisionTrace, Dispatcher, MemoryLogger,
    NoopObserver, Strategy, StrategyError, StrategyRegistry, Tuning,
};
use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, Progress};
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

struct Broken;

impl Strategy for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn decide(
        &mut self,
        _ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        _trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        Err(StrategyError::Computation("division by zero".into()))
    }
}

struct Panicky;

impl Strategy for Panicky {
    fn name(&self) -> &str {
        "panicky"
    }

    fn decide(
        &mut self,
        _ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        _trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        panic!("index out of bounds")
    }
}

struct Overreach;

impl Strategy for Overreach {
    fn name(&self) -> &str {
        "overreach"
    }

    fn decide(
        &mut self,
        _ctx: &DecisionContext,
        _rng: &mut dyn RngCore,
        _trace: &mut DecisionTrace,
    ) -> Result<Action, StrategyError> {
        Ok(Action::Raise(1_000_000))
    }
}

fn registry() -> StrategyRegistry {
    let mut r = StrategyRegistry::new(Tuning::default().with_max_trials(100));
    r.register("broken", |_| Box::new(Broken));
    r.register("panicky", |_| Box::new(Panicky));
    r.register("overreach", |_| Box::new(Overreach));
    r
}

fn heads_up(stacks: [u32; 2], order: &str) -> Engine {
    let seats = [
        SeatConfig::ai("sb", "basic").with_stack(stacks[0]),
        SeatConfig::ai("bb", "basic").with_stack(stacks[1]),
    ];
    let mut e = Engine::new(TableConfig::default(), &seats, Some(1)).unwrap();
    let order = parse_cards(order).unwrap();
    e.start_hand_with_deck(Deck::stacked(&order)).unwrap();
    e
}

#[test]
fn short_stacked_big_blind_shoves_premium_hand() {
    // seat 1 holds kings; 10 big blinds effective
    let mut e = heads_up([100, 100], "7c Kh 2d Kd 5s 9c 8h 3s 4d Jc 6h Qd");
    e.apply_action(0, Action::Call).unwrap();
    let ctx = e.decision_context(1).unwrap();
    assert_eq!(ctx.call_amount, 0);

    let mut d = registry().dispatcher("conservative").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let mut log = MemoryLogger::new();
    let action = d.decide(&ctx, &mut rng, Some(&mut log));
    assert_eq!(action, Action::Raise(100));
    assert!(log.records()[0].trace.reasoning[0].starts_with("push/fold"));

    let p = e.apply_action(1, action).unwrap();
    assert_eq!(p, Progress::Continue { next: 0, street: holdem_engine::logger::Street::Preflop });
    let Progress::HandComplete(result) = e.apply_action(0, Action::Call).unwrap() else {
        panic!("all-in should run out the board");
    };
    assert_eq!(result.pot, 200);
    assert_eq!(result.winners, vec![1]);
    assert_eq!(e.players()[0].stack(), 0);
    assert_eq!(e.roster(), vec![1]);
}

#[test]
fn short_stack_weak_hand_folds_or_checks() {
    let e = heads_up([100, 100], "7c Kh 2d Kd");
    let ctx = e.decision_context(0).unwrap();
    let mut d = registry().dispatcher("aggressive").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    assert_eq!(d.decide(&ctx, &mut rng, None), Action::Fold);
}

#[test]
fn short_stack_calls_shove_with_enough_equity() {
    // seat 1 holds ace-queen offsuit with six big blinds behind
    let mut e = heads_up([1000, 60], "7c Ah 2d Qd 5s 9c 8h 3s 4d Jc 6h Kd");
    e.apply_action(0, Action::Raise(1000)).unwrap();
    let ctx = e.decision_context(1).unwrap();
    assert_eq!(ctx.stack(), 50);

    let mut d = registry().dispatcher("conservative").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let mut log = MemoryLogger::new();
    assert_eq!(d.decide(&ctx, &mut rng, Some(&mut log)), Action::Call);
    let reasons = &log.records()[0].trace.reasoning;
    assert!(reasons.iter().any(|r| r.starts_with("all-in call, break-even 0.42")));

    let Progress::HandComplete(result) = e.apply_action(1, Action::Call).unwrap() else {
        panic!("both all-in should run out the board");
    };
    assert_eq!(result.pot, 120);
}

#[test]
fn short_stack_folds_trash_to_shove() {
    let mut e = heads_up([1000, 60], "Kh 7c Qd 2d");
    e.apply_action(0, Action::Raise(1000)).unwrap();
    let ctx = e.decision_context(1).unwrap();
    let mut d = registry().dispatcher("aggressive").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    assert_eq!(d.decide(&ctx, &mut rng, None), Action::Fold);
}

#[test]
fn very_short_stack_shoves_wider() {
    // pocket fives: under the ten-blind threshold, over the two-blind one
    let e = heads_up([20, 1000], "5c Kh 5d 2d");
    let ctx = e.decision_context(0).unwrap();
    let mut d = registry().dispatcher("conservative").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    assert_eq!(d.decide(&ctx, &mut rng, None), Action::Raise(20));
}

#[test]
fn strategy_error_falls_back_to_cheap_call() {
    let e = heads_up([1000, 1000], "7c Kh 2d Kd");
    let ctx = e.decision_context(0).unwrap();
    assert_eq!(ctx.call_amount, 5);
    let mut d = registry().dispatcher("broken").unwrap();
    let mut log = MemoryLogger::new();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    assert_eq!(d.decide(&ctx, &mut rng, Some(&mut log)), Action::Call);
    assert_eq!(d.fallbacks(), 1);
    assert_eq!(log.fallbacks(), 1);
    assert!(log.records()[0]
        .trace
        .fallback
        .as_deref()
        .unwrap()
        .contains("division by zero"));
}

#[test]
fn panic_falls_back_and_folds_to_expensive_bet() {
    let mut e = heads_up([1000, 1000], "7c Kh 2d Kd");
    e.apply_action(0, Action::Raise(300)).unwrap();
    let ctx = e.decision_context(1).unwrap();
    assert_eq!(ctx.call_amount, 290);
    let mut d = registry().dispatcher("panicky").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    assert_eq!(d.decide(&ctx, &mut rng, None), Action::Fold);
    assert_eq!(d.fallbacks(), 1);
}

#[test]
fn panicking_seat_cannot_stall_a_game() {
    let reg = registry();
    let seats = [
        SeatConfig::ai("p", "panicky"),
        SeatConfig::ai("b", "basic"),
        SeatConfig::ai("r", "random"),
    ];
    let mut e = Engine::new(TableConfig::default(), &seats, Some(9)).unwrap();
    let mut agents = build_agents(e.players(), &reg, |s| Err(AiError::MissingAgent(s))).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    for _ in 0..10 {
        if e.is_game_over() {
            break;
        }
        play_hand(&mut e, &mut agents, &mut rng, None, &mut NoopObserver).unwrap();
    }
    assert!(agents[0].dispatcher().unwrap().fallbacks() > 0);
    assert_eq!(e.chips_in_play(), e.expected_total());
}

#[test]
fn oversized_raise_is_clamped_to_stack() {
    let e = heads_up([1000, 1000], "7c Kh 2d Kd");
    let ctx = e.decision_context(0).unwrap();
    let mut d: Dispatcher = registry().dispatcher("overreach").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    assert_eq!(d.decide(&ctx, &mut rng, None), Action::Raise(1000));
}

#[test]
fn human_seat_without_source_is_an_error() {
    let seats = [SeatConfig::human("me"), SeatConfig::ai("b", "basic")];
    let e = Engine::new(TableConfig::default(), &seats, Some(1)).unwrap();
    let err = build_agents(e.players(), &registry(), |s| Err(AiError::MissingAgent(s)));
    assert!(matches!(err, Err(AiError::MissingAgent(0))));
}

#[test]
fn unknown_strategy_is_reported() {
    let seats = [SeatConfig::ai("a", "telepathy"), SeatConfig::ai("b", "basic")];
    let e = Engine::new(TableConfig::default(), &seats, Some(1)).unwrap();
    let err = build_agents(e.players(), &registry(), |s| Err(AiError::MissingAgent(s)));
    assert!(matches!(err, Err(AiError::UnknownStrategy(id)) if id == "telepathy"));
}

/// Counts records without keeping them.
#[derive(Default)]
struct Counter(usize);

impl DecisionLogger for Counter {
    fn record(&mut self, _: &holdem_ai::DecisionRecord) {
        self.0 += 1;
    }
}

#[test]
fn logger_counts_every_ai_decision() {
    let reg = registry();
    let seats = [SeatConfig::ai("a", "heuristic"), SeatConfig::ai("b", "phase")];
    let mut e = Engine::new(TableConfig::default(), &seats, Some(2)).unwrap();
    let mut agents = build_agents(e.players(), &reg, |s| Err(AiError::MissingAgent(s))).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let mut counter = Counter::default();
    play_hand(&mut e, &mut agents, &mut rng, Some(&mut counter), &mut NoopObserver).unwrap();
    assert_eq!(counter.0, e.action_history().len());
}
