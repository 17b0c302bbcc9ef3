//! Core value types shared by the engine.

use serde::{Deserialize, Serialize};

/// Placeholder rendered for a slot that is still hidden.
pub const HIDDEN_MARKER: char = '_';

/// One position of the rendered word, one per letter unit of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Not revealed yet.
    Hidden,
    /// Revealed by a guess or by opening a letter.
    Guessed(char),
    /// Shown only because the game was lost. Never counts toward a win.
    Exposed(char),
}

impl Slot {
    /// Returns true if the slot still renders as the placeholder.
    pub fn is_hidden(&self) -> bool {
        matches!(self, Slot::Hidden)
    }

    /// Returns the character this slot renders as.
    pub fn render(&self) -> char {
        match self {
            Slot::Hidden => HIDDEN_MARKER,
            Slot::Guessed(c) | Slot::Exposed(c) => *c,
        }
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Game is ongoing.
    #[display("in progress")]
    InProgress,
    /// Every slot was revealed by the player.
    #[display("won")]
    Won,
    /// The attempt budget ran out first.
    #[display("lost")]
    Lost,
}

impl GameStatus {
    /// Returns true for `Won` and `Lost`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Folds a letter to its canonical lower-case form.
///
/// Letters whose lower-case mapping expands to several characters keep their
/// first one, so a letter unit always stays a single `char`.
pub fn canonical(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}
