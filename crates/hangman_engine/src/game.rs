//! Per-session hangman state machine.
//!
//! A [`GameState`] is created once per session and mutated only through
//! [`GameState::apply_guess`] and [`GameState::open_letter`]. Win and loss are
//! never stored: they are derived from the slots and counters on every query,
//! with a win always taking precedence over an exhausted attempt budget.

use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::language::Language;
use crate::types::{GameStatus, Slot, canonical};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Complete state of one hangman session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Letter units of the answer, as written.
    target_word: Vec<char>,
    /// Opaque hint shown on request.
    hint: String,
    /// One slot per letter unit.
    revealed: Vec<Slot>,
    /// Canonical letters attempted so far.
    guessed_letters: BTreeSet<char>,
    incorrect_count: u32,
    max_attempts: u32,
    open_letter_budget: u32,
    language: Language,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Creates a new game for `word`.
    ///
    /// Only alphabetic characters become slots; spaces, hyphens and
    /// apostrophes in the raw word are dropped.
    #[instrument(skip(word, hint), fields(word_len = word.len()))]
    pub fn new(
        word: &str,
        hint: impl Into<String>,
        max_attempts: u32,
        open_letter_budget: u32,
        language: Language,
    ) -> Self {
        let target_word: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        let revealed = vec![Slot::Hidden; target_word.len()];

        debug!(
            letters = target_word.len(),
            max_attempts, open_letter_budget, %language, "Creating game state"
        );

        Self {
            target_word,
            hint: hint.into(),
            revealed,
            guessed_letters: BTreeSet::new(),
            incorrect_count: 0,
            max_attempts,
            open_letter_budget,
            language,
        }
    }

    /// Creates a new game with budgets taken from `difficulty`.
    pub fn with_difficulty(
        word: &str,
        hint: impl Into<String>,
        difficulty: Difficulty,
        language: Language,
    ) -> Self {
        let (max_attempts, open_letter_budget) = difficulty.budgets();
        Self::new(word, hint, max_attempts, open_letter_budget, language)
    }
}

// ─────────────────────────────────────────────────────────────
//  Transitions
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Applies a letter guess and returns whether it was correct.
    ///
    /// Guessing a letter that was already tried is a no-op returning
    /// `Ok(false)`; it never costs an attempt.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] once the game has been won or lost.
    #[instrument(skip(self), fields(tries_left = self.tries_left()))]
    pub fn apply_guess(&mut self, letter: char) -> Result<bool, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }

        let letter = canonical(letter);
        if !self.guessed_letters.insert(letter) {
            debug!(%letter, "Letter already guessed");
            return Ok(false);
        }

        let matched = self.reveal(letter);
        if matched == 0 {
            self.incorrect_count += 1;
        }

        debug!(%letter, matched, incorrect = self.incorrect_count, "Guess applied");
        self.expose_if_lost();
        Ok(matched > 0)
    }

    /// Opens the leftmost hidden letter, revealing all of its occurrences.
    ///
    /// Opening always costs one attempt and one unit of the open-letter
    /// budget, however many slots it reveals. Returns the letter as written
    /// in the word.
    ///
    /// # Errors
    ///
    /// Checked in order: [`GameError::NoAttemptsLeft`],
    /// [`GameError::NoOpenLettersLeft`], [`GameError::NothingToOpen`].
    #[instrument(skip(self), fields(tries_left = self.tries_left(), budget = self.open_letter_budget))]
    pub fn open_letter(&mut self) -> Result<char, GameError> {
        if self.tries_left() == 0 {
            return Err(GameError::NoAttemptsLeft);
        }
        if self.open_letter_budget == 0 {
            return Err(GameError::NoOpenLettersLeft);
        }

        let written = self
            .revealed
            .iter()
            .position(Slot::is_hidden)
            .map(|i| self.target_word[i])
            .ok_or(GameError::NothingToOpen)?;

        let letter = canonical(written);
        let matched = self.reveal(letter);
        self.guessed_letters.insert(letter);
        self.open_letter_budget -= 1;
        self.incorrect_count += 1;

        info!(%letter, matched, budget = self.open_letter_budget, "Letter opened");
        self.expose_if_lost();
        Ok(written)
    }

    /// Reveals every slot whose letter folds to `letter`, returning the count.
    fn reveal(&mut self, letter: char) -> usize {
        let mut matched = 0;
        for (slot, &c) in self.revealed.iter_mut().zip(&self.target_word) {
            if canonical(c) == letter {
                *slot = Slot::Guessed(c);
                matched += 1;
            }
        }
        matched
    }

    /// Shows the whole word once the game is lost.
    fn expose_if_lost(&mut self) {
        if !self.is_lost() {
            return;
        }
        for (slot, &c) in self.revealed.iter_mut().zip(&self.target_word) {
            if slot.is_hidden() {
                *slot = Slot::Exposed(c);
            }
        }
        info!(word = %self.answer(), "Game lost, word exposed");
    }
}

// ─────────────────────────────────────────────────────────────
//  Derived predicates
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Returns true if every slot was revealed by the player.
    pub fn is_won(&self) -> bool {
        self.revealed.iter().all(|s| matches!(s, Slot::Guessed(_)))
    }

    /// Returns true if the attempt budget is spent without a win.
    pub fn is_lost(&self) -> bool {
        !self.is_won() && self.incorrect_count >= self.max_attempts
    }

    /// Returns true once the game is won or lost.
    pub fn is_game_over(&self) -> bool {
        self.is_won() || self.incorrect_count >= self.max_attempts
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        if self.is_won() {
            GameStatus::Won
        } else if self.is_lost() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    /// Renders the slots separated by single spaces, `_` for hidden ones.
    pub fn display_word(&self) -> String {
        self.revealed
            .iter()
            .map(|s| s.render().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns the attempts still available.
    pub fn tries_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.incorrect_count)
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Returns the hint.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Returns the session language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the number of letter units in the answer.
    pub fn word_length(&self) -> usize {
        self.target_word.len()
    }

    /// Returns the answer's letter units as a string.
    pub fn answer(&self) -> String {
        self.target_word.iter().collect()
    }

    /// Returns the slots.
    pub fn slots(&self) -> &[Slot] {
        &self.revealed
    }

    /// Returns the canonical letters guessed so far.
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    /// Returns the number of charged attempts.
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    /// Returns the attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the remaining open-letter budget.
    pub fn open_letter_budget(&self) -> u32 {
        self.open_letter_budget
    }
}
