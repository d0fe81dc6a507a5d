//! # holdem-engine: Texas Hold'em Table Engine
//!
//! A deterministic no-limit Texas Hold'em engine for two to twenty-two seats.
//! It owns the deck, the pot and the betting-round state machine, evaluates
//! hands, and hands read-only snapshots to whatever decides for each seat.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hand evaluation and comparison
//! - [`strength`] - Continuous strength estimate for incomplete hands
//! - [`player`] - Player state, actions and chip movement
//! - [`rules`] - Action validation and raise sizing
//! - [`pot`] - Main pot and side pot construction
//! - [`game`] - Table and seat configuration, blind placement
//! - [`engine`] - The betting-round state machine
//! - [`snapshot`] - Views handed to strategies
//! - [`logger`] - Action records and JSONL hand history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate_hand(&cards);
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal_card(), b.deal_card());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod snapshot;
pub mod strength;
