//! # Play Command
//!
//! Interactive play: the user holds seat 1 and every other seat is an AI
//! strategy from the configured lineup.
//!
//! Table output goes to `out`. Prompts and input feedback go to `err`, so
//! a transcript on stdout stays readable when input is piped. The
//! configured think delay pauses before each AI decision and has no effect
//! on what the AI decides.

use std::io::{BufRead, Write};
use std::time::Duration;

use holdem_ai::{build_agents, play_hand, ActionSource, AiError, HandObserver};
use holdem_engine::engine::{Engine, HandResult};
use holdem_engine::game::SeatConfig;
use holdem_engine::player::Action;
use holdem_engine::snapshot::DecisionContext;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_record, format_result};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{check_human_action, parse_player_action, ParseResult};

const HUMAN_SEAT: usize = 0;

/// Reads the user's decisions from a line-based input.
struct TerminalSource<'a> {
    input: &'a mut dyn BufRead,
    prompt: &'a mut dyn Write,
}

impl TerminalSource<'_> {
    fn ask(&mut self, ctx: &DecisionContext) -> std::io::Result<Option<String>> {
        let to_call = if ctx.call_amount == 0 {
            "check".to_string()
        } else {
            format!("{} to call", ctx.call_amount)
        };
        let raise = if ctx.can_raise() {
            format!(", raise to {}..{}", ctx.min_raise_to(), ctx.max_raise_to())
        } else {
            String::new()
        };
        write!(
            self.prompt,
            "[{} | pot {} | stack {} | {}{}] fold/check/call/raise N/allin/q: ",
            format_board(&ctx.hole_cards),
            ctx.pot_size,
            ctx.stack(),
            to_call,
            raise
        )?;
        self.prompt.flush()?;
        Ok(read_stdin_line(self.input))
    }
}

impl ActionSource for TerminalSource<'_> {
    fn choose(&mut self, ctx: &DecisionContext) -> Result<Action, AiError> {
        let io = |e: std::io::Error| AiError::Input(e.to_string());
        loop {
            let Some(line) = self.ask(ctx).map_err(io)? else {
                return Err(AiError::Quit);
            };
            let feedback = match parse_player_action(&line) {
                ParseResult::Action(a) => match check_human_action(ctx, a) {
                    Ok(a) => return Ok(a),
                    Err(msg) => msg,
                },
                ParseResult::AllIn if ctx.can_raise() => {
                    return Ok(Action::Raise(ctx.max_raise_to()));
                }
                ParseResult::AllIn => return Ok(Action::Call),
                ParseResult::Quit => return Err(AiError::Quit),
                ParseResult::Invalid(msg) => msg,
            };
            ui::write_error(self.prompt, &feedback).map_err(io)?;
        }
    }
}

/// Prints the table as the hand unfolds.
struct TableView<'a> {
    out: &'a mut dyn Write,
    think_delay: Duration,
    shown_hand: u64,
    board_len: usize,
    error: Option<std::io::Error>,
}

impl TableView<'_> {
    fn emit(&mut self, f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) {
        if self.error.is_none()
            && let Err(e) = f(&mut *self.out)
        {
            self.error = Some(e);
        }
    }

    fn sync(&mut self, engine: &Engine) {
        if engine.hand_number() != self.shown_hand {
            self.shown_hand = engine.hand_number();
            self.board_len = 0;
            let players = engine.players();
            let dealer = players[engine.dealer_index()].name().to_string();
            let (sb, bb) = engine.blinds();
            let hole = format_board(players[HUMAN_SEAT].hole_cards());
            let hand = engine.hand_number();
            self.emit(|out| {
                writeln!(out, "--- Hand {} (blinds {}/{}, button {}) ---", hand, sb, bb, dealer)?;
                writeln!(out, "Your cards: {}", hole)
            });
        }
        let board = engine.board();
        if board.len() > self.board_len {
            self.board_len = board.len();
            let line = format!("{}: {}", engine.street(), format_board(board));
            self.emit(|out| writeln!(out, "{}", line));
        }
    }
}

impl HandObserver for TableView<'_> {
    fn before_decision(&mut self, seat: usize, engine: &Engine) {
        self.sync(engine);
        if seat != HUMAN_SEAT && !self.think_delay.is_zero() {
            std::thread::sleep(self.think_delay);
        }
    }

    fn after_action(&mut self, _seat: usize, _action: Action, engine: &Engine) {
        if let Some(rec) = engine.action_history().last() {
            let line = format_record(rec, engine.players());
            self.emit(|out| writeln!(out, "{}", line));
        }
    }

    fn hand_complete(&mut self, result: &HandResult, engine: &Engine) {
        self.sync(engine);
        let board = format_board(&result.board);
        let lines = format_result(result, engine.players());
        let players = engine.players();
        let reveal: Vec<String> = if result.showdown {
            result
                .hands
                .iter()
                .map(|(seat, h)| {
                    let p = &players[*seat];
                    format!("{} shows {} ({})", p.name(), format_board(p.hole_cards()), h.category)
                })
                .collect()
        } else {
            Vec::new()
        };
        let stack = players[HUMAN_SEAT].stack();
        self.emit(|out| {
            for r in &reveal {
                writeln!(out, "{}", r)?;
            }
            writeln!(out, "Board: {}", board)?;
            for l in &lines {
                writeln!(out, "{}", l)?;
            }
            writeln!(out, "Your stack: {}", stack)
        });
    }
}

fn seats(config: &Config) -> Vec<SeatConfig> {
    std::iter::once(SeatConfig::human("You"))
        .chain((1..config.players).map(|i| {
            let id = config.strategy_for(i - 1);
            SeatConfig::ai(format!("{}-{}", id, i + 1), id)
        }))
        .collect()
}

pub fn handle_play_command(
    config: &Config,
    hands: u32,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut engine = Engine::new(config.table_config(), &seats(config), Some(seed))?;
    let registry = config.registry();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    writeln!(
        out,
        "play: players={} hands={} seed={} lineup={}",
        config.players,
        hands,
        seed,
        config.lineup.join(",")
    )?;
    info!(seed, players = config.players, "interactive game started");

    let mut view = TableView {
        out: &mut *out,
        think_delay: Duration::from_millis(config.think_delay_ms),
        shown_hand: 0,
        board_len: 0,
        error: None,
    };
    let source = TerminalSource {
        input: stdin,
        prompt: &mut *err,
    };
    let mut agents = build_agents(engine.players(), &registry, {
        let mut source = Some(source);
        move |seat| match source.take() {
            Some(s) => Ok(Box::new(s) as Box<dyn ActionSource + '_>),
            None => Err(AiError::MissingAgent(seat)),
        }
    })?;

    let mut played = 0u32;
    let mut quit = false;
    while played < hands && !engine.is_game_over() {
        match play_hand(&mut engine, &mut agents, &mut rng, None, &mut view) {
            Ok(_) => played += 1,
            Err(AiError::Quit) => {
                quit = true;
                break;
            }
            Err(e) => return Err(e.into()),
        }
        if let Some(e) = view.error.take() {
            return Err(e.into());
        }
        if engine.players()[HUMAN_SEAT].stack() == 0 {
            break;
        }
    }
    drop(agents);

    let stack = engine.players()[HUMAN_SEAT].stack();
    if quit {
        writeln!(out, "Quit after {} hands. Final stack: {}", played, stack)?;
    } else if stack == 0 {
        writeln!(out, "You are out of chips after {} hands.", played)?;
    } else if engine.is_game_over() {
        writeln!(out, "You won the table in {} hands!", played)?;
    } else {
        writeln!(out, "Played {} hands. Final stack: {}", played, stack)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn config(players: usize) -> Config {
        Config {
            players,
            seed: Some(42),
            lineup: vec!["conservative".into()],
            ..Config::default()
        }
    }

    fn run(cfg: &Config, hands: u32, input: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let r = handle_play_command(cfg, hands, &mut out, &mut err, &mut stdin);
        (r, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn folding_every_hand() {
        let (r, out, _) = run(&config(3), 3, "fold\nfold\nfold\nfold\nfold\nfold\n");
        r.unwrap();
        assert!(out.contains("--- Hand 1"));
        assert!(out.contains("Your cards: ["));
        assert!(out.contains("You fold") || out.contains("wins"));
    }

    #[test]
    fn eof_quits_gracefully() {
        let (r, out, _) = run(&config(2), 5, "");
        r.unwrap();
        assert!(out.contains("Quit after 0 hands"));
    }

    #[test]
    fn invalid_input_is_reported_and_reprompted() {
        let (r, _, err) = run(&config(2), 1, "dance\nraise 1\nq\n");
        r.unwrap();
        assert!(err.contains("Unrecognized action 'dance'"));
        assert!(err.contains("Minimum raise is to"));
    }

    #[test]
    fn zero_hands_rejected() {
        let (r, _, _) = run(&config(2), 0, "");
        assert!(matches!(r, Err(CliError::InvalidInput(_))));
    }
}
