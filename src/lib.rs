//! kusokurae: rule engine for the kusokurae trick card game
//!
//! Goals:
//! - One fixed ruleset for 3 or 4 players
//! - Deterministic deals from an explicit seed
//! - No panics for invalid moves; every failing call returns an error and
//!   leaves the game untouched
//!
//! ## Quick start
//! ```
//! use kusokurae::game::{Game, GameConfig, GameError, GameStatus};
//!
//! let mut game = Game::new(GameConfig::new(3).with_seed(7)).unwrap();
//! assert!(matches!(game.play("G".parse().unwrap()), Err(GameError::NotInGame(_))));
//!
//! game.start().unwrap();
//! assert_eq!(game.active_seat(), Some(0));
//!
//! let card = game.playable_cards()[0];
//! game.play(card).unwrap();
//! assert_eq!(game.active_seat(), Some(1));
//! assert_eq!(game.status(), GameStatus::Play);
//! ```
//!
//! ## TUI
//! Run the hot-seat TUI with:
//! ```sh
//! cargo run --bin kusokurae -- --players 4
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod game;
pub mod rules;
pub mod tui;
pub mod turn;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
