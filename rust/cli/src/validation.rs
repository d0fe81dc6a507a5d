//! Parsing of interactive input and command arguments.

use holdem_ai::StrategyRegistry;
use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;

/// Outcome of parsing one line typed at the action prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(Action),
    /// Move the whole stack in.
    AllIn,
    Quit,
    Invalid(String),
}

/// Accepted inputs (case-insensitive):
/// - `f` / `fold`
/// - `c` / `check` / `call`
/// - `r N` / `raise N` / `bet N`: make the street total `N`
/// - `a` / `allin` / `all-in`
/// - `q` / `quit`
///
/// ```rust
/// use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::player::Action;
///
/// assert_eq!(parse_player_action("raise 60"), ParseResult::Action(Action::Raise(60)));
/// assert_eq!(parse_player_action("check"), ParseResult::Action(Action::Call));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "f" | "fold" => ParseResult::Action(Action::Fold),
        "c" | "check" | "call" => ParseResult::Action(Action::Call),
        "a" | "allin" | "all-in" => ParseResult::AllIn,
        "r" | "raise" | "bet" => match parts.get(1).map(|n| n.parse::<u32>()) {
            None => {
                ParseResult::Invalid(format!("{} requires an amount (e.g. '{} 60')", verb, verb))
            }
            Some(Ok(amount)) if amount > 0 => ParseResult::Action(Action::Raise(amount)),
            Some(Ok(_)) => ParseResult::Invalid("Raise amount must be positive".to_string()),
            Some(Err(_)) => ParseResult::Invalid(format!("Invalid amount '{}'", parts[1])),
        },
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <to>, allin, q",
            other
        )),
    }
}

/// Checks a typed action against the current decision. Raises below the
/// minimum are rejected here rather than silently floored, so the player
/// sees what the table requires.
pub fn check_human_action(ctx: &DecisionContext, action: Action) -> Result<Action, String> {
    match action {
        Action::Raise(_) if !ctx.can_raise() => Err("Raising is closed on this street".to_string()),
        Action::Raise(to) if to >= ctx.max_raise_to() => Ok(Action::Raise(ctx.max_raise_to())),
        Action::Raise(to) if to < ctx.min_raise_to() => Err(format!(
            "Minimum raise is to {} (max {})",
            ctx.min_raise_to(),
            ctx.max_raise_to()
        )),
        other => Ok(other),
    }
}

/// Every identifier must resolve in `registry`.
pub fn validate_lineup(lineup: &[String], registry: &StrategyRegistry) -> Result<(), String> {
    if lineup.is_empty() {
        return Err("lineup must name at least one strategy".to_string());
    }
    match lineup.iter().find(|id| !registry.contains(id)) {
        Some(bad) => Err(format!(
            "unknown strategy '{}'; known: {}",
            bad,
            registry.ids().collect::<Vec<_>>().join(", ")
        )),
        None => Ok(()),
    }
}
