use std::fs;
use std::path::PathBuf;

use holdem_engine::cards::parse_cards;
use holdem_engine::logger::{ActionRecord, HandLogger, HandRecord, ShowdownInfo, Street};
use holdem_engine::player::Action;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("holdem_{}_{}.jsonl", name, std::process::id()));
    p
}

fn record(id: String) -> HandRecord {
    HandRecord {
        hand_id: id,
        seed: Some(1),
        actions: vec![
            ActionRecord {
                seq: 1,
                hand: 1,
                seat: 0,
                street: Street::Preflop,
                action: Action::Raise(30),
                chips: 25,
                to_call: 5,
            },
            ActionRecord {
                seq: 2,
                hand: 1,
                seat: 1,
                street: Street::Preflop,
                action: Action::Fold,
                chips: 0,
                to_call: 20,
            },
        ],
        board: parse_cards("Ac").unwrap(),
        result: Some("p0".to_string()),
        ts: None,
        meta: None,
        showdown: Some(ShowdownInfo {
            winners: vec![0],
            notes: None,
        }),
    }
}

#[test]
fn writes_jsonl_with_lf_only_and_timestamp() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let id = logger.next_id();
    logger.write(&record(id)).expect("write");
    let text = fs::read_to_string(&path).expect("read file");
    assert!(text.ends_with('\n'));
    assert!(!text.contains('\r'));
    let back: HandRecord = serde_json::from_str(text.trim_end()).expect("parse");
    assert!(back.ts.is_some());
    assert_eq!(back.actions[0].action, Action::Raise(30));
    let _ = fs::remove_file(&path);
}

#[test]
fn action_json_names_the_action_and_amount() {
    let json = serde_json::to_string(&Action::Raise(40)).unwrap();
    assert_eq!(json, r#"{"action":"raise","amount":40}"#);
    let fold: Action = serde_json::from_str(r#"{"action":"fold"}"#).unwrap();
    assert_eq!(fold, Action::Fold);
}

#[test]
fn hand_ids_are_sequential() {
    let mut logger = HandLogger::with_seq_for_test("20250102");
    assert_eq!(logger.next_id(), "20250102-000001");
    assert_eq!(logger.next_id(), "20250102-000002");
}
