//! Difficulty levels and the budgets they grant.

use serde::{Deserialize, Serialize};

/// Difficulty chosen when a session is created.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Difficulty {
    /// Seven attempts, two open letters.
    #[default]
    Easy,
    /// Five attempts, one open letter.
    Normal,
    /// Three attempts, no open letters.
    Hard,
}

impl Difficulty {
    /// Parses a difficulty label case-insensitively.
    ///
    /// Unrecognized labels fall back to [`Difficulty::Easy`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "hard" => Difficulty::Hard,
            "normal" => Difficulty::Normal,
            _ => Difficulty::Easy,
        }
    }

    /// Returns `(max_attempts, open_letter_budget)`.
    pub fn budgets(self) -> (u32, u32) {
        match self {
            Difficulty::Hard => (3, 0),
            Difficulty::Normal => (5, 1),
            Difficulty::Easy => (7, 2),
        }
    }
}

impl From<&str> for Difficulty {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}
