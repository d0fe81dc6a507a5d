use std::collections::HashSet;

use holdem_engine::cards::parse_cards;
use holdem_engine::deck::Deck;
use holdem_engine::engine::{Engine, Progress};
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::player::Action;

#[test]
fn shuffled_deck_deals_52_distinct_cards() {
    let mut d = Deck::new_with_seed(9);
    d.shuffle();
    let mut seen = HashSet::new();
    while let Some(c) = d.deal_card() {
        assert!(seen.insert(c), "duplicate {c}");
    }
    assert_eq!(seen.len(), 52);
    assert_eq!(d.remaining(), 0);
}

#[test]
fn same_seed_same_order_different_seed_differs() {
    let order = |seed| {
        let mut d = Deck::new_with_seed(seed);
        d.shuffle();
        (0..52).filter_map(|_| d.deal_card()).collect::<Vec<_>>()
    };
    assert_eq!(order(42), order(42));
    assert_ne!(order(42), order(43));
}

#[test]
fn stacked_deck_puts_order_on_top() {
    let top = parse_cards("As Kd 7c").unwrap();
    let mut d = Deck::stacked(&top);
    assert_eq!(d.deal_card(), Some(top[0]));
    assert_eq!(d.deal_card(), Some(top[1]));
    assert_eq!(d.deal_card(), Some(top[2]));
    assert_eq!(d.remaining(), 49);
}

#[test]
fn full_hand_burns_three_and_never_repeats_a_card() {
    let seats: Vec<SeatConfig> = (0..6).map(|i| SeatConfig::human(format!("p{i}"))).collect();
    let mut e = Engine::new(TableConfig::default(), &seats, Some(11)).unwrap();
    let mut p = e.start_hand().unwrap();
    while let Progress::Continue { next, .. } = p {
        p = e.apply_action(next, Action::Call).unwrap();
    }
    assert_eq!(e.deck().burned().len(), 3);
    let mut seen = HashSet::new();
    for c in e
        .players()
        .iter()
        .flat_map(|p| p.hole_cards().iter())
        .chain(e.board())
        .chain(e.deck().burned())
    {
        assert!(seen.insert(*c), "duplicate {c}");
    }
    assert_eq!(seen.len(), 6 * 2 + 5 + 3);
    assert_eq!(e.deck().remaining() + seen.len(), 52);
}
