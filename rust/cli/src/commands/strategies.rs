//! `strategies`: the identifiers the registry resolves.

use std::io::Write;

use holdem_ai::StrategyKind;
use serde::Serialize;

use crate::error::CliError;

#[derive(Serialize)]
struct Entry {
    id: &'static str,
    description: &'static str,
}

pub fn handle_strategies_command(json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let entries: Vec<Entry> = StrategyKind::ALL
        .iter()
        .map(|k| Entry {
            id: k.id(),
            description: k.description(),
        })
        .collect();

    if json {
        let s = serde_json::to_string_pretty(&entries).map_err(std::io::Error::other)?;
        writeln!(out, "{}", s)?;
    } else {
        for e in &entries {
            writeln!(out, "{:<13} {}", e.id, e.description)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_eighteen() {
        let mut out = Vec::new();
        handle_strategies_command(false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 18);
        assert!(text.lines().any(|l| l.starts_with("alphabeta")));
    }

    #[test]
    fn json_listing() {
        let mut out = Vec::new();
        handle_strategies_command(true, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 18);
        assert_eq!(v[0]["id"], "basic");
    }
}
