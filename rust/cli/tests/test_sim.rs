mod helpers;

use std::collections::HashSet;
use std::fs;

use helpers::{run_cli, EnvGuard};
use holdem_engine::logger::HandRecord;
use serde_json::Value;
use serial_test::serial;

fn records(path: &std::path::Path) -> Vec<HandRecord> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
#[serial]
fn sim_writes_one_record_per_hand() {
    let _env = EnvGuard::clean();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs/hands.jsonl");
    let res = run_cli(&[
        "sim",
        "--hands",
        "12",
        "--seed",
        "4",
        "--players",
        "3",
        "--lineup",
        "aggressive,kelly,position",
        "--max-trials",
        "50",
        "--output",
        path.to_str().unwrap(),
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Simulated: 12 hands"));

    let recs = records(&path);
    assert_eq!(recs.len(), 12);
    let ids: HashSet<&str> = recs.iter().map(|r| r.hand_id.as_str()).collect();
    assert_eq!(ids.len(), 12);
    for r in &recs {
        assert_eq!(r.seed, Some(4));
        assert!(r.board.len() <= 5);
        assert!(r.ts.is_some());
        assert!(r.result.as_deref().is_some_and(|s| s.contains(" wins ")));
        assert!(!r.actions.is_empty());
        assert_eq!(r.meta.as_ref().unwrap()["game"], 0);
    }
}

#[test]
#[serial]
fn same_seed_same_records() {
    let _env = EnvGuard::clean();
    let dir = tempfile::tempdir().unwrap();
    let run = |name: &str| {
        let path = dir.path().join(name);
        let res = run_cli(&[
            "sim", "--hands", "8", "--seed", "21", "--players", "4", "--lineup",
            "random,pattern,basic",
            "--output", path.to_str().unwrap(),
        ]);
        assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
        records(&path)
            .into_iter()
            .map(|r| (r.actions, r.board, r.result))
            .collect::<Vec<_>>()
    };
    assert_eq!(run("a.jsonl"), run("b.jsonl"));
}

#[test]
#[serial]
fn break_after_interrupts_with_130() {
    let _env = EnvGuard::apply(&[("HOLDEM_SIM_BREAK_AFTER", "3")]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.jsonl");
    let res = run_cli(&[
        "sim", "--hands", "10", "--seed", "2", "--players", "2", "--output", path.to_str().unwrap(),
    ]);
    assert_eq!(res.exit_code, 130);
    assert!(res.stdout.contains("Interrupted: saved 3/10"));
    assert!(!res.stderr.contains("Error:"));
    assert_eq!(records(&path).len(), 3);
}

#[test]
#[serial]
fn json_summary_accounts_for_every_chip() {
    let _env = EnvGuard::clean();
    let res = run_cli(&[
        "sim", "--hands", "30", "--seed", "6", "--players", "5", "--lineup",
        "aggressive,conservative,adaptive,bayesian,phase", "--max-trials", "40", "--json",
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let v: Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(v["hands"], 30);
    assert_eq!(v["seed"], 6);
    assert_eq!(v["balance_errors"], 0);
    let strategies = v["strategies"].as_object().unwrap();
    assert_eq!(strategies.len(), 5);
    let total: i64 = strategies.values().map(|s| s["chip_delta"].as_i64().unwrap()).sum();
    assert_eq!(total, 0);
    assert!(strategies.values().all(|s| s["decisions"].as_u64().unwrap() > 0));
}

#[test]
#[serial]
fn short_stacks_play_several_games() {
    let _env = EnvGuard::clean();
    let res = run_cli(&[
        "sim", "--hands", "200", "--seed", "9", "--players", "2", "--stack", "60", "--lineup",
        "aggressive", "--json",
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let v: Value = serde_json::from_str(&res.stdout).unwrap();
    assert!(v["games_finished"].as_u64().unwrap() >= 2);
}
