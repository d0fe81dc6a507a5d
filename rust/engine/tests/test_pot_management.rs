use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, Progress};
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::player::Action;

fn table(stacks: &[u32]) -> Engine {
    let seats: Vec<SeatConfig> = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| SeatConfig::human(format!("p{i}")).with_stack(s))
        .collect();
    Engine::new(TableConfig::default(), &seats, Some(8)).expect("engine")
}

fn check_down(e: &mut Engine, mut p: Progress) -> Progress {
    while let Progress::Continue { next, .. } = p {
        p = e.apply_action(next, Action::Call).unwrap();
    }
    p
}

#[test]
fn short_all_in_wins_main_pot_only() {
    let mut e = table(&[50, 200, 200]);
    // dealt from the small blind (seat 1): seat 0 gets aces, seat 1 kings
    let order = parse_cards("Ks 7c As Kh 2d Ah 8h Qd 9s 4h 8d 3c 8c Jd").unwrap();
    e.start_hand_with_deck(Deck::stacked(&order)).unwrap();
    e.apply_action(0, Action::Raise(50)).unwrap();
    e.apply_action(1, Action::Raise(200)).unwrap();
    let p = e.apply_action(2, Action::Call).unwrap();
    let Progress::HandComplete(result) = p else {
        panic!("everyone is all-in");
    };
    assert_eq!(result.pot, 450);
    assert_eq!(result.payouts, vec![(0, 150), (1, 300)]);
    assert_eq!(result.winners, vec![0, 1]);
    assert_eq!(e.players()[0].stack(), 150);
    assert_eq!(e.players()[1].stack(), 300);
    assert_eq!(e.players()[2].stack(), 0);
}

#[test]
fn tied_hands_split_the_pot() {
    let mut e = table(&[1000, 1000]);
    let order = parse_cards("2c 3d 4c 5d 6h Ts Js Qs 7h Ks 8h As").unwrap();
    let p = e.start_hand_with_deck(Deck::stacked(&order)).unwrap();
    let Progress::HandComplete(result) = check_down(&mut e, p) else {
        unreachable!()
    };
    assert!(result.showdown);
    assert_eq!(result.payouts, vec![(1, 10), (0, 10)]);
    assert_eq!(e.players()[0].stack(), 1000);
    assert_eq!(e.players()[1].stack(), 1000);
}

#[test]
fn odd_chip_goes_to_first_winner_left_of_dealer() {
    let mut e = table(&[1000, 1000, 1000]);
    let order = parse_cards("2c 3d 4h 2d 3c 4d 6h Ts Js Qs 7h Ks 8h As").unwrap();
    e.start_hand_with_deck(Deck::stacked(&order)).unwrap();
    e.apply_action(0, Action::Call).unwrap();
    e.apply_action(1, Action::Fold).unwrap();
    let p = e.apply_action(2, Action::Call).unwrap();
    let Progress::HandComplete(result) = check_down(&mut e, p) else {
        unreachable!()
    };
    assert_eq!(result.pot, 25);
    assert_eq!(result.payouts, vec![(2, 13), (0, 12)]);
    assert_eq!(e.players()[2].stack(), 1003);
    assert_eq!(e.players()[0].stack(), 1002);
    assert_eq!(e.players()[1].stack(), 995);
}

#[test]
fn uncalled_excess_returns_to_bettor() {
    let mut e = table(&[1000, 300]);
    e.start_hand().unwrap();
    e.apply_action(0, Action::Raise(500)).unwrap();
    let p = e.apply_action(1, Action::Call).unwrap();
    let Progress::HandComplete(result) = p else {
        panic!("caller is all-in");
    };
    assert_eq!(result.pot, 600);
    assert!(e
        .events()
        .iter()
        .any(|m| m == "Uncalled 200 returned to p0"));
    let s0 = e.players()[0].stack();
    assert!(s0 == 700 || s0 == 1000 || s0 == 1300, "stack {s0}");
    assert_eq!(s0 + e.players()[1].stack(), 1300);
}

#[test]
fn pot_only_grows_when_a_round_completes() {
    let mut e = table(&[1000, 1000, 1000]);
    e.start_hand().unwrap();
    e.apply_action(0, Action::Raise(40)).unwrap();
    assert_eq!(e.pot(), 0);
    assert_eq!(e.total_pot(), 55);
    e.apply_action(1, Action::Call).unwrap();
    assert_eq!(e.pot(), 0);
    e.apply_action(2, Action::Call).unwrap();
    assert_eq!(e.pot(), 120);
    assert_eq!(e.total_pot(), 120);
}
