//! Hangman engine - pure game logic for word-guessing sessions.
//!
//! This crate owns the per-session state machine and nothing else: it receives
//! a target word and a hint string and does not know how they were obtained.
//!
//! # Architecture
//!
//! - **GameState**: target word, reveal slots, guessed letters, attempt and
//!   open-letter budgets
//! - **Evaluator**: `apply_guess` / `open_letter` transitions with win/loss
//!   derivation
//! - **Difficulty** / **Language**: creation-time budgets and per-language
//!   guess alphabets
//!
//! # Example
//!
//! ```
//! use hangman_engine::{Difficulty, GameState, Language};
//!
//! let mut game = GameState::with_difficulty("cat", "A pet", Difficulty::Normal, Language::English);
//! assert!(game.apply_guess('c').unwrap());
//! assert_eq!(game.display_word(), "c _ _");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod difficulty;
mod error;
mod game;
mod language;
mod types;

pub use difficulty::Difficulty;
pub use error::GameError;
pub use game::GameState;
pub use language::Language;
pub use types::{GameStatus, HIDDEN_MARKER, Slot, canonical};
