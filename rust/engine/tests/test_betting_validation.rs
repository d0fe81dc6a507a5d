use holdem_engine::engine::{Engine, Progress};
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::logger::Street;
use holdem_engine::player::Action;

fn heads_up(config: TableConfig) -> Engine {
    let seats = vec![SeatConfig::human("a"), SeatConfig::human("b")];
    let mut e = Engine::new(config, &seats, Some(21)).expect("engine");
    e.start_hand().expect("hand");
    e
}

#[test]
fn small_raise_is_floored_to_minimum() {
    let mut e = heads_up(TableConfig::default());
    e.apply_action(0, Action::Raise(12)).unwrap();
    let last = e.action_history().last().unwrap();
    assert_eq!(last.action, Action::Raise(20));
    assert_eq!(last.chips, 15);
    assert_eq!(e.current_bet(), 20);
    assert_eq!(e.min_raise_to(), 40);
}

#[test]
fn raise_above_stack_goes_all_in() {
    let mut e = heads_up(TableConfig::default());
    e.apply_action(0, Action::Raise(5_000)).unwrap();
    assert_eq!(e.action_history()[0].action, Action::Raise(1000));
    assert!(e.players()[0].is_all_in());
    assert_eq!(e.max_raise_to(1).unwrap(), 1000);
}

#[test]
fn raise_cap_turns_raise_into_call() {
    let config = TableConfig {
        max_raises_per_round: Some(1),
        ..TableConfig::default()
    };
    let mut e = heads_up(config);
    e.apply_action(0, Action::Raise(30)).unwrap();
    let p = e.apply_action(1, Action::Raise(200)).unwrap();
    assert_eq!(e.action_history()[1].action, Action::Call);
    assert_eq!(p, Progress::Continue { next: 1, street: Street::Flop });
    assert_eq!(e.pot(), 60);
}

#[test]
fn reraise_reopens_action_for_original_raiser() {
    let mut e = heads_up(TableConfig::default());
    e.apply_action(0, Action::Raise(30)).unwrap();
    let p = e.apply_action(1, Action::Raise(90)).unwrap();
    assert_eq!(p, Progress::Continue { next: 0, street: Street::Preflop });
    assert_eq!(e.to_call(0).unwrap(), 60);
}

#[test]
fn free_call_is_recorded_as_check() {
    let mut e = heads_up(TableConfig::default());
    e.apply_action(0, Action::Call).unwrap();
    e.apply_action(1, Action::Call).unwrap();
    let rec = e.action_history().last().unwrap();
    assert_eq!(rec.to_call, 0);
    assert_eq!(rec.chips, 0);
    assert_eq!(e.events().iter().filter(|m| m.ends_with("checks")).count(), 1);
}

#[test]
fn raise_cap_bounds_every_street() {
    let mut e = heads_up(TableConfig::default());
    let mut p = Progress::Continue { next: 0, street: Street::Preflop };
    let mut actions = 0;
    while let Progress::Continue { next, .. } = p {
        p = e.apply_action(next, Action::Raise(e.min_raise_to())).unwrap();
        actions += 1;
        assert!(actions < 40);
    }
    let raises = e
        .action_history()
        .iter()
        .filter(|r| r.street == Street::Preflop && r.action.is_aggressive())
        .count();
    assert!(raises <= 4);
}
