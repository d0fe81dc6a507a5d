use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, Phase, Progress};
use holdem_engine::errors::GameError;
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::logger::Street;
use holdem_engine::player::Action;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn table(stacks: &[u32]) -> Engine {
    let seats: Vec<SeatConfig> = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| SeatConfig::human(format!("p{i}")).with_stack(s))
        .collect();
    Engine::new(TableConfig::default(), &seats, Some(3)).expect("engine")
}

#[test]
fn walk_awards_blinds_to_big_blind() {
    let mut e = table(&[1000, 1000, 1000, 1000]);
    let p = e.start_hand().unwrap();
    assert_eq!(e.blind_indices(), (1, 2));
    assert_eq!(p, Progress::Continue { next: 3, street: Street::Preflop });
    e.apply_action(3, Action::Fold).unwrap();
    e.apply_action(0, Action::Fold).unwrap();
    let p = e.apply_action(1, Action::Fold).unwrap();
    let Progress::HandComplete(result) = p else {
        panic!("hand should be over");
    };
    assert!(!result.showdown);
    assert_eq!(result.winners, vec![2]);
    assert_eq!(result.pot, 15);
    assert_eq!(e.players()[2].stack(), 1005);
    assert_eq!(e.players()[1].stack(), 995);
    assert_eq!(e.phase(), Phase::HandComplete);
    assert!(e.board().is_empty());
}

#[test]
fn heads_up_all_in_busts_loser_and_ends_game() {
    let mut e = table(&[100, 100]);
    // seat 0 is dealer and small blind and is dealt first
    let order = parse_cards("As 7c Ah 2d 8h Kd 9s 4h 8d 3c 8c Jd").unwrap();
    e.start_hand_with_deck(Deck::stacked(&order)).unwrap();
    e.apply_action(0, Action::Raise(100)).unwrap();
    let p = e.apply_action(1, Action::Raise(100)).unwrap();
    let Progress::HandComplete(result) = p else {
        panic!("all-in should run out the board");
    };
    assert!(result.showdown);
    assert_eq!(result.pot, 200);
    assert_eq!(result.winners, vec![0]);
    assert_eq!(e.board().len(), 5);
    assert_eq!(e.players()[0].stack(), 200);
    assert_eq!(e.players()[1].stack(), 0);
    assert_eq!(e.roster(), vec![0]);
    assert!(e.is_game_over());
    assert_eq!(e.start_hand(), Err(GameError::GameOver));
}

#[test]
fn dealer_rotates_between_hands() {
    let mut e = table(&[1000, 1000, 1000]);
    e.start_hand().unwrap();
    assert_eq!(e.dealer_index(), 0);
    let mut p = Progress::Continue { next: 0, street: Street::Preflop };
    while let Progress::Continue { next, .. } = p {
        p = e.apply_action(next, Action::Fold).unwrap();
    }
    e.start_hand().unwrap();
    assert_eq!(e.dealer_index(), 1);
    assert_eq!(e.blind_indices(), (2, 0));
    assert_eq!(e.hand_number(), 2);
}

#[test]
fn busted_seat_is_skipped_for_blinds() {
    let mut e = table(&[100, 1000, 1000]);
    // seat 1 small blind, seat 2 big blind, seat 0 first to act;
    // seat 2 makes a queen-high straight on the river
    let order = parse_cards("Ks 7c 2h Kh 8d 3s 4c Qd Jh 9c 5c 6d 5d Td").unwrap();
    e.start_hand_with_deck(Deck::stacked(&order)).unwrap();
    e.apply_action(0, Action::Raise(100)).unwrap();
    e.apply_action(1, Action::Fold).unwrap();
    let p = e.apply_action(2, Action::Call).unwrap();
    let Progress::HandComplete(result) = p else {
        panic!("hand should run out");
    };
    assert_eq!(result.winners, vec![2]);
    assert_eq!(e.players()[0].stack(), 0);
    assert_eq!(e.players()[2].stack(), 1105);
    assert_eq!(e.roster(), vec![1, 2]);

    e.start_hand().unwrap();
    assert_eq!(e.dealer_index(), 1);
    assert_eq!(e.blind_indices(), (1, 2));
    assert!(e.players()[0].hole_cards().is_empty());
}

#[test]
fn calling_down_reaches_showdown_with_burns() {
    let mut e = table(&[500, 500, 500]);
    let mut p = e.start_hand().unwrap();
    let mut streets = Vec::new();
    while let Progress::Continue { next, street } = p {
        if streets.last() != Some(&street) {
            streets.push(street);
        }
        p = e.apply_action(next, Action::Call).unwrap();
    }
    assert_eq!(
        streets,
        vec![Street::Preflop, Street::Flop, Street::Turn, Street::River]
    );
    let Progress::HandComplete(result) = p else {
        unreachable!()
    };
    assert!(result.showdown);
    assert_eq!(result.hands.len(), 3);
    assert_eq!(result.pot, 30);
    assert_eq!(e.deck().burned().len(), 3);
}

#[test]
fn postflop_action_starts_left_of_dealer() {
    let mut e = table(&[500, 500, 500, 500]);
    e.start_hand().unwrap();
    for seat in [3, 0, 1] {
        e.apply_action(seat, Action::Call).unwrap();
    }
    let p = e.apply_action(2, Action::Call).unwrap();
    assert_eq!(p, Progress::Continue { next: 1, street: Street::Flop });
    assert_eq!(e.pot(), 40);
    assert_eq!(e.current_bet(), 0);
}

#[test]
fn chips_are_conserved_under_random_play() {
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let mut e = table(&[300, 300, 300, 300, 300]);
    let total = e.expected_total();
    for _ in 0..300 {
        let mut p = match e.start_hand() {
            Ok(p) => p,
            Err(GameError::GameOver) => break,
            Err(err) => panic!("unexpected {err}"),
        };
        let mut steps = 0;
        while let Progress::Continue { next, .. } = p {
            let roll: f64 = rng.random();
            let action = if roll < 0.15 {
                Action::Fold
            } else if roll < 0.75 {
                Action::Call
            } else {
                Action::Raise(rng.random_range(0..400))
            };
            p = e.apply_action(next, action).unwrap();
            assert_eq!(e.chips_in_play(), total);
            steps += 1;
            assert!(steps < 200, "betting did not terminate");
        }
        assert_eq!(e.pot(), 0);
        assert!(e.verify_balance().is_none());
        let stacks: u64 = e.players().iter().map(|p| u64::from(p.stack())).sum();
        assert_eq!(stacks, total);
    }
}

#[test]
fn stop_flag_blocks_hand_start_and_actions() {
    let mut e = table(&[1000, 1000]);
    let stop = e.stop_handle();
    e.start_hand().unwrap();
    stop.stop();
    let before = e.total_pot();
    assert_eq!(e.apply_action(0, Action::Raise(50)), Err(GameError::Stopped));
    assert_eq!(e.total_pot(), before);
    assert!(e.action_history().is_empty());

    stop.resume();
    let mut p = e.apply_action(0, Action::Fold).unwrap();
    assert!(p.is_hand_complete());
    stop.stop();
    assert_eq!(e.start_hand(), Err(GameError::Stopped));
    stop.resume();
    p = e.start_hand().unwrap();
    assert!(!p.is_hand_complete());
}

#[test]
fn actions_outside_a_hand_are_rejected() {
    let mut e = table(&[1000, 1000]);
    assert_eq!(e.apply_action(0, Action::Call), Err(GameError::NoHandInProgress));
    e.start_hand().unwrap();
    assert_eq!(e.start_hand(), Err(GameError::HandInProgress));
}

#[test]
fn decision_context_hides_other_hole_cards() {
    let mut e = table(&[1000, 1000, 1000]);
    e.start_hand().unwrap();
    let seat = e.current_player().unwrap();
    let ctx = e.decision_context(seat).unwrap();
    assert_eq!(ctx.hole_cards, e.players()[seat].hole_cards());
    assert_eq!(ctx.call_amount, 10);
    assert_eq!(ctx.pot_size, 15);
    assert_eq!(ctx.game.min_raise_to, 20);
    let json = serde_json::to_string(&ctx.game).unwrap();
    for (i, p) in e.players().iter().enumerate() {
        if i != seat {
            for c in p.hole_cards() {
                assert!(!json.contains(&format!("\"{c}\"")));
            }
        }
    }
    let other = (seat + 1) % 3;
    assert!(matches!(
        e.decision_context(other),
        Err(GameError::NotPlayersTurn { .. })
    ));
}

#[test]
fn recent_actions_span_hands() {
    let seats = vec![SeatConfig::human("a"), SeatConfig::human("b")];
    let config = TableConfig {
        recent_history: 3,
        ..TableConfig::default()
    };
    let mut e = Engine::new(config, &seats, Some(5)).unwrap();
    for _ in 0..3 {
        let mut p = e.start_hand().unwrap();
        while let Progress::Continue { next, .. } = p {
            p = e.apply_action(next, Action::Fold).unwrap();
        }
    }
    let snap = e.snapshot();
    assert_eq!(snap.recent_actions.len(), 3);
    assert_eq!(snap.recent_actions.last().map(|r| r.hand), Some(3));
    assert!(snap.actions.is_empty() || snap.actions.iter().all(|r| r.hand == 3));
}

#[test]
fn action_sequence_survives_history_trimming() {
    let seats = vec![SeatConfig::human("a"), SeatConfig::human("b")];
    let config = TableConfig {
        recent_history: 2,
        ..TableConfig::default()
    };
    let mut e = Engine::new(config, &seats, Some(8)).unwrap();
    let mut seen = Vec::new();
    for _ in 0..2 {
        let mut p = e.start_hand().unwrap();
        while let Progress::Continue { next, .. } = p {
            p = e.apply_action(next, Action::Call).unwrap();
            seen.push(e.snapshot().recent_actions.last().map(|r| r.seq).unwrap());
        }
    }
    // checked down: 2 preflop plus 2 on each later street, per hand
    assert_eq!(seen, (1..=16).collect::<Vec<u64>>());
    let window: Vec<u64> = e.snapshot().recent_actions.iter().map(|r| r.seq).collect();
    assert_eq!(window, vec![15, 16]);
}
