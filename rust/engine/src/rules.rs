use crate::errors::GameError;
use crate::player::Action as A;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips added to match the current bet.
    Call(u32),
    /// New street total for the raiser.
    Raise { to: u32 },
    /// Chips added by a player putting in the rest of the stack.
    AllIn(u32),
}

/// Smallest legal raise-to amount: the current bet re-doubled or the table
/// minimum (the big blind) on top of it, whichever is larger.
pub fn min_raise_to(current_bet: u32, big_blind: u32) -> u32 {
    current_bet.saturating_add(current_bet.max(big_blind))
}

/// Betting state seen by [`validate_action`] for the acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetState {
    /// Chips behind.
    pub stack: u32,
    /// Chips this player already has in front of them this street.
    pub player_bet: u32,
    /// Table-high bet this street.
    pub current_bet: u32,
    pub min_raise_to: u32,
    /// Whether the per-street raise cap still allows a raise.
    pub can_raise: bool,
}

impl BetState {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.player_bet)
    }

    /// Largest street total this player can reach.
    pub fn max_raise_to(&self) -> u32 {
        self.player_bet.saturating_add(self.stack)
    }
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts an [`crate::player::Action`] into a [`ValidatedAction`]:
///
/// - a call the stack cannot cover becomes [`ValidatedAction::AllIn`];
/// - a raise below the minimum is silently floored up to the minimum;
/// - a raise at or beyond the stack becomes all-in;
/// - a raise after the street's raise cap, or when the player cannot exceed
///   the current bet, is treated as a call.
///
/// # Errors
///
/// Returns [`GameError::InsufficientChips`] when a player with no chips
/// behind tries to put more in.
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, BetState, ValidatedAction};
/// use holdem_engine::player::Action;
///
/// let state = BetState {
///     stack: 1000,
///     player_bet: 0,
///     current_bet: 50,
///     min_raise_to: 100,
///     can_raise: true,
/// };
/// assert_eq!(validate_action(&state, Action::Call), Ok(ValidatedAction::Call(50)));
/// // below the minimum: floored up
/// assert_eq!(validate_action(&state, Action::Raise(60)), Ok(ValidatedAction::Raise { to: 100 }));
///
/// let short = BetState { stack: 80, ..state };
/// assert_eq!(validate_action(&short, Action::Raise(300)), Ok(ValidatedAction::AllIn(80)));
/// ```
pub fn validate_action(state: &BetState, action: A) -> Result<ValidatedAction, GameError> {
    let to_call = state.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Call => call(state.stack, to_call),
        A::Raise(amount) => {
            if !state.can_raise || state.max_raise_to() <= state.current_bet {
                return call(state.stack, to_call);
            }
            let target = amount.max(state.min_raise_to);
            if target >= state.max_raise_to() {
                Ok(ValidatedAction::AllIn(state.stack))
            } else {
                Ok(ValidatedAction::Raise { to: target })
            }
        }
    }
}

fn call(stack: u32, to_call: u32) -> Result<ValidatedAction, GameError> {
    if to_call == 0 {
        Ok(ValidatedAction::Check)
    } else if stack == 0 {
        Err(GameError::InsufficientChips)
    } else if stack <= to_call {
        Ok(ValidatedAction::AllIn(stack))
    } else {
        Ok(ValidatedAction::Call(to_call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_raise_doubles_or_uses_big_blind() {
        assert_eq!(min_raise_to(0, 10), 10);
        assert_eq!(min_raise_to(10, 10), 20);
        assert_eq!(min_raise_to(30, 10), 60);
        assert_eq!(min_raise_to(5, 10), 15);
    }

    #[test]
    fn raise_cap_turns_raise_into_call() {
        let s = BetState {
            stack: 500,
            player_bet: 0,
            current_bet: 40,
            min_raise_to: 80,
            can_raise: false,
        };
        assert_eq!(validate_action(&s, A::Raise(200)), Ok(ValidatedAction::Call(40)));
    }
}
