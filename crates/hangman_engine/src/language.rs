//! Supported word languages and their guess alphabets.

use crate::error::GameError;
use crate::types::canonical;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Polish letters outside the basic Latin range.
const POLISH_EXTRA: &str = "ąćęłńóśźż";

/// Language of a session's word. Also selects the word collection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Language {
    /// English, `en`.
    #[serde(rename = "en")]
    #[display("en")]
    English,
    /// Polish, `pl`.
    #[serde(rename = "pl")]
    #[display("pl")]
    Polish,
    /// Ukrainian, `uk` (legacy clients send `ua`).
    #[serde(rename = "uk", alias = "ua")]
    #[display("uk")]
    Ukrainian,
}

impl Language {
    /// Returns the language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Polish => "pl",
            Language::Ukrainian => "uk",
        }
    }

    /// Returns the name of the remote word collection for this language.
    ///
    /// Ukrainian words are stored under the legacy `ua` tag.
    pub fn collection(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Polish => "pl",
            Language::Ukrainian => "ua",
        }
    }

    /// Checks whether a canonical (lower-case) letter belongs to this alphabet.
    pub fn accepts(self, letter: char) -> bool {
        match self {
            Language::English => letter.is_ascii_lowercase(),
            Language::Polish => letter.is_ascii_lowercase() || POLISH_EXTRA.contains(letter),
            Language::Ukrainian => {
                ('\u{0400}'..='\u{04FF}').contains(&letter) && letter.is_alphabetic()
            }
        }
    }

    /// Validates a raw guess payload and returns its canonical letter.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidInput`] if the payload is empty, holds more
    /// than one character, or the character is outside this alphabet.
    #[instrument]
    pub fn validate_guess(self, input: &str) -> Result<char, GameError> {
        let mut chars = input.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => canonical(c),
            (None, _) => return Err(GameError::InvalidInput("empty guess".to_string())),
            (Some(_), Some(_)) => {
                return Err(GameError::InvalidInput(format!(
                    "'{}' is not a single letter",
                    input.trim()
                )));
            }
        };

        if self.accepts(letter) {
            Ok(letter)
        } else {
            Err(GameError::InvalidInput(format!(
                "'{}' is not a valid letter for language {}",
                letter, self
            )))
        }
    }
}

impl FromStr for Language {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "pl" => Ok(Language::Polish),
            "uk" | "ua" => Ok(Language::Ukrainian),
            other => Err(GameError::InvalidInput(format!("unsupported language '{}'", other))),
        }
    }
}
