//! `deal`: deals one seeded hand, checks it down and shows every hole card,
//! the board and the showdown.

use std::io::Write;

use holdem_engine::engine::{Engine, Progress};
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::player::Action;

use crate::config::MAX_PLAYERS;
use crate::error::CliError;
use crate::formatters::{format_board, format_result};

pub fn handle_deal_command(
    seed: Option<u64>,
    players: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if !(2..=MAX_PLAYERS).contains(&players) {
        return Err(CliError::InvalidInput(format!(
            "players must be between 2 and {}",
            MAX_PLAYERS
        )));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let seats: Vec<SeatConfig> = (1..=players)
        .map(|i| SeatConfig::ai(format!("P{}", i), "basic"))
        .collect();
    let mut engine = Engine::new(TableConfig::default(), &seats, Some(seed))?;

    let mut progress = engine.start_hand()?;
    writeln!(out, "Seed: {}", seed)?;
    for p in engine.players() {
        writeln!(out, "Hole {}: {}", p.name(), format_board(p.hole_cards()))?;
    }
    let result = loop {
        match progress {
            Progress::Continue { next, .. } => progress = engine.apply_action(next, Action::Call)?,
            Progress::HandComplete(result) => break result,
        }
    };
    writeln!(out, "Board: {}", format_board(&result.board))?;
    for line in format_result(&result, engine.players()) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(seed: u64, players: usize) -> String {
        let mut out = Vec::new();
        handle_deal_command(Some(seed), players, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn seeded_deal_is_reproducible() {
        let a = deal(42, 3);
        assert_eq!(a, deal(42, 3));
        assert_eq!(a.lines().filter(|l| l.starts_with("Hole ")).count(), 3);
        assert!(a.contains("Board: ["));
        assert!(a.contains(" wins "));
    }

    #[test]
    fn rejects_bad_player_count() {
        let mut out = Vec::new();
        assert!(handle_deal_command(Some(1), 1, &mut out).is_err());
        assert!(handle_deal_command(Some(1), 23, &mut out).is_err());
    }
}
