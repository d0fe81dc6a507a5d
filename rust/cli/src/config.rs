//! Layered configuration: defaults, then the TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment variables, then command-line
//! flags. Every field remembers which layer set it so `cfg` can show it.

use std::fmt;
use std::fs;

use holdem_ai::{StrategyRegistry, Tuning};
use holdem_engine::game::{SeatConfig, TableConfig};
use holdem_engine::player::STARTING_STACK;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const MAX_PLAYERS: usize = 22;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seed: Option<u64>,
    pub players: usize,
    /// Strategy identifiers assigned to AI seats in order, cycling.
    pub lineup: Vec<String>,
    pub think_delay_ms: u64,
    /// Zero means unlimited.
    pub max_raises_per_round: u32,
    pub tuning: Tuning,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            starting_stack: STARTING_STACK,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            seed: None,
            players: 6,
            lineup: vec!["basic".into()],
            think_delay_ms: 0,
            max_raises_per_round: table.max_raises_per_round.unwrap_or(0),
            tuning: Tuning::default(),
        }
    }
}

impl Config {
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            starting_stack: self.starting_stack,
            max_raises_per_round: (self.max_raises_per_round > 0)
                .then_some(self.max_raises_per_round),
            ..TableConfig::default()
        }
    }

    /// Strategy for the `n`th AI seat.
    pub fn strategy_for(&self, n: usize) -> &str {
        if self.lineup.is_empty() {
            "basic"
        } else {
            &self.lineup[n % self.lineup.len()]
        }
    }

    /// `players` AI seats named after their strategy.
    pub fn ai_seats(&self) -> Vec<SeatConfig> {
        (0..self.players)
            .map(|i| {
                let id = self.strategy_for(i);
                SeatConfig::ai(format!("{}-{}", id, i + 1), id)
            })
            .collect()
    }

    pub fn registry(&self) -> StrategyRegistry {
        StrategyRegistry::new(self.tuning.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub seed: ValueSource,
    pub players: ValueSource,
    pub lineup: ValueSource,
    pub think_delay_ms: ValueSource,
    pub max_raises_per_round: ValueSource,
    pub tuning: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            seed: ValueSource::Default,
            players: ValueSource::Default,
            lineup: ValueSource::Default,
            think_delay_ms: ValueSource::Default,
            max_raises_per_round: ValueSource::Default,
            tuning: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub players: Option<usize>,
    pub lineup: Option<Vec<String>>,
    pub starting_stack: Option<u32>,
    pub think_delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    lineup: Option<Vec<String>>,
    #[serde(default)]
    think_delay_ms: Option<u64>,
    #[serde(default)]
    max_raises_per_round: Option<u32>,
    #[serde(default)]
    tuning: Option<Tuning>,
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_overrides(&Overrides::default())
}

pub fn load_with_overrides(flags: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        apply_file(&mut cfg, &mut sources, toml::from_str(&s)?);
    }
    apply_env(&mut cfg, &mut sources)?;
    apply_flags(&mut cfg, &mut sources, flags);

    validate(&cfg)?;
    Ok(ConfigResolved { config: cfg, sources })
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    macro_rules! take {
        ($field:ident) => {
            if let Some(v) = f.$field {
                cfg.$field = v;
                sources.$field = ValueSource::File;
            }
        };
    }
    take!(starting_stack);
    take!(small_blind);
    take!(big_blind);
    take!(players);
    take!(lineup);
    take!(think_delay_ms);
    take!(max_raises_per_round);
    take!(tuning);
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    env_value(name)
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid {}: '{}'", name, v)))
        })
        .transpose()
}

fn apply_env(cfg: &mut Config, sources: &mut ConfigSources) -> Result<(), ConfigError> {
    macro_rules! number {
        ($var:literal, $field:ident) => {
            if let Some(v) = env_number($var)? {
                cfg.$field = v;
                sources.$field = ValueSource::Env;
            }
        };
    }
    number!("HOLDEM_STARTING_STACK", starting_stack);
    number!("HOLDEM_SMALL_BLIND", small_blind);
    number!("HOLDEM_BIG_BLIND", big_blind);
    number!("HOLDEM_PLAYERS", players);
    number!("HOLDEM_THINK_DELAY_MS", think_delay_ms);
    number!("HOLDEM_MAX_RAISES", max_raises_per_round);
    if let Some(seed) = env_number("HOLDEM_SEED")? {
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Env;
    }
    if let Some(lineup) = env_value("HOLDEM_LINEUP") {
        cfg.lineup = split_lineup(&lineup);
        sources.lineup = ValueSource::Env;
    }
    Ok(())
}

fn apply_flags(cfg: &mut Config, sources: &mut ConfigSources, flags: &Overrides) {
    if let Some(v) = flags.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Flag;
    }
    if let Some(v) = flags.players {
        cfg.players = v;
        sources.players = ValueSource::Flag;
    }
    if let Some(v) = &flags.lineup {
        cfg.lineup = v.clone();
        sources.lineup = ValueSource::Flag;
    }
    if let Some(v) = flags.starting_stack {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Flag;
    }
    if let Some(v) = flags.think_delay_ms {
        cfg.think_delay_ms = v;
        sources.think_delay_ms = ValueSource::Flag;
    }
}

/// Comma or whitespace separated strategy identifiers.
pub fn split_lineup(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::Invalid(format!("Invalid configuration: {}", msg)));
    if cfg.starting_stack == 0 {
        return invalid("starting_stack must be > 0");
    }
    if cfg.small_blind == 0 || cfg.big_blind < cfg.small_blind {
        return invalid("blinds must satisfy 0 < small_blind <= big_blind");
    }
    if !(2..=MAX_PLAYERS).contains(&cfg.players) {
        return invalid(&format!("players must be between 2 and {}", MAX_PLAYERS));
    }
    let registry = StrategyRegistry::default();
    if let Some(bad) = cfg.lineup.iter().find(|id| !registry.contains(id)) {
        return invalid(&format!("unknown strategy '{}' in lineup", bad));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineup_cycles() {
        let cfg = Config {
            lineup: vec!["kelly".into(), "random".into()],
            players: 3,
            ..Config::default()
        };
        let seats = cfg.ai_seats();
        assert_eq!(seats.len(), 3);
        assert_eq!(seats[2].name, "kelly-3");
    }

    #[test]
    fn zero_raise_cap_means_unlimited() {
        let cfg = Config {
            max_raises_per_round: 0,
            ..Config::default()
        };
        assert_eq!(cfg.table_config().max_raises_per_round, None);
        assert_eq!(Config::default().table_config().max_raises_per_round, Some(4));
    }

    #[test]
    fn file_layer_with_partial_tuning() {
        let f: FileConfig = toml::from_str(
            "players = 4\nlineup = [\"kelly\", \"basic\"]\n[tuning.kelly]\nfraction = 0.3\n",
        )
        .unwrap();
        let mut cfg = Config::default();
        let mut sources = ConfigSources::default();
        apply_file(&mut cfg, &mut sources, f);
        assert_eq!(cfg.players, 4);
        assert_eq!(sources.players, ValueSource::File);
        assert_eq!(sources.seed, ValueSource::Default);
        assert_eq!(cfg.tuning.kelly.fraction, 0.3);
        assert_eq!(cfg.tuning.kelly.cautious_fraction, 0.25);
        assert_eq!(sources.tuning, ValueSource::File);
    }

    #[test]
    fn adaptive_mode_profile_from_file() {
        let f: FileConfig = toml::from_str(
            "[tuning.adaptive.profiles.standard]\nraise = 0.5\ncall = 0.3\nbluff = 0.1\n",
        )
        .unwrap();
        let mut cfg = Config::default();
        let mut sources = ConfigSources::default();
        apply_file(&mut cfg, &mut sources, f);
        let profiles = &cfg.tuning.adaptive.profiles;
        assert_eq!(profiles.standard.raise, 0.5);
        assert_eq!(profiles.standard.bet_fraction, None);
        assert_eq!(profiles.cautious.raise, 0.7);
        assert_eq!(cfg.tuning.adaptive.short_bb, 15.0);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("level = 3\n").is_err());
    }

    #[test]
    fn flags_win() {
        let mut cfg = Config::default();
        let mut sources = ConfigSources::default();
        apply_flags(
            &mut cfg,
            &mut sources,
            &Overrides {
                seed: Some(9),
                ..Overrides::default()
            },
        );
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(sources.seed, ValueSource::Flag);
    }

    #[test]
    fn validation() {
        assert!(validate(&Config::default()).is_ok());
        let bad = Config {
            lineup: vec!["oracle".into()],
            ..Config::default()
        };
        assert!(validate(&bad).unwrap_err().to_string().contains("oracle"));
        let bad = Config {
            players: 1,
            ..Config::default()
        };
        assert!(validate(&bad).is_err());
        let bad = Config {
            small_blind: 20,
            big_blind: 10,
            ..Config::default()
        };
        assert!(validate(&bad).is_err());
    }

    #[test]
    fn lineup_parsing() {
        assert_eq!(split_lineup("kelly, basic  random"), vec!["kelly", "basic", "random"]);
    }
}
