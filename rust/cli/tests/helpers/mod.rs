//! Shared helpers for the CLI integration tests.
//!
//! Every test drives [`holdem_cli::run`] in-process with captured buffers.
//! Tests that touch `HOLDEM_*` variables must be `#[serial]`; [`EnvGuard`]
//! restores the previous values on drop.

#![allow(dead_code)]

pub const CONFIG_VARS: &[&str] = &[
    "HOLDEM_CONFIG",
    "HOLDEM_STARTING_STACK",
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_BIG_BLIND",
    "HOLDEM_PLAYERS",
    "HOLDEM_THINK_DELAY_MS",
    "HOLDEM_MAX_RAISES",
    "HOLDEM_SEED",
    "HOLDEM_LINEUP",
    "HOLDEM_SIM_BREAK_AFTER",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv = std::iter::once("holdem").chain(args.iter().copied());
    let exit_code = holdem_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Clears every configuration variable, applies `pairs` and restores the
/// old environment when dropped.
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in CONFIG_VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }

    pub fn clean() -> Self {
        Self::apply(&[])
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
