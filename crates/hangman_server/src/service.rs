//! Session operations exposed to clients.
//!
//! [`HangmanService`] is the only place where the store, the word supply and
//! the engine meet. Every action on an existing session runs entirely under
//! that session's lock, from lookup to snapshot.

use crate::error::ServiceError;
use crate::session::{SessionHandle, SessionId, SessionStore};
use crate::words::WordSampler;
use hangman_engine::{Difficulty, GameState, Language};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Request for creating a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameRequest {
    /// Language code: `en`, `pl` or `uk`.
    pub language: String,
    /// `Easy`, `Normal` or `Hard`; anything else plays as `Easy`.
    #[serde(default)]
    pub difficulty: String,
}

/// Response for a created game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// Session ID for subsequent calls.
    pub session_id: SessionId,
    /// Number of letter slots.
    pub word_length: usize,
    /// Attempt budget.
    pub max_attempts: u32,
    /// Open-letter budget.
    pub open_letter_attempts: u32,
}

/// Request for a letter guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// The guessed letter.
    pub letter: String,
}

/// Result of a guess or an opened letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// Whether the letter occurs in the word. Always true for an opened letter.
    pub correct: bool,
    /// Rendered word, `_` for hidden slots.
    pub current_word: String,
    /// Attempts remaining.
    pub tries_left: u32,
    /// Whether the game has ended.
    pub is_game_over: bool,
    /// Whether the game was won.
    pub won: bool,
    /// The letter that was guessed or opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_letter: Option<char>,
}

/// Snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateResponse {
    /// Rendered word, `_` for hidden slots.
    pub current_word: String,
    /// Attempts remaining.
    pub tries_left: u32,
    /// Whether the game has ended.
    pub is_game_over: bool,
    /// Whether the game was won.
    pub won: bool,
    /// Open letters remaining.
    pub open_letter_attempts: u32,
}

/// The hint for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResponse {
    /// Hint text.
    pub hint: String,
}

impl GuessResponse {
    fn from_game(game: &GameState, correct: bool, letter: char) -> Self {
        Self {
            correct,
            current_word: game.display_word(),
            tries_left: game.tries_left(),
            is_game_over: game.is_game_over(),
            won: game.is_won(),
            opened_letter: Some(letter),
        }
    }
}

impl From<&GameState> for GameStateResponse {
    fn from(game: &GameState) -> Self {
        Self {
            current_word: game.display_word(),
            tries_left: game.tries_left(),
            is_game_over: game.is_game_over(),
            won: game.is_won(),
            open_letter_attempts: game.open_letter_budget(),
        }
    }
}

/// Hangman session service.
#[derive(Clone)]
pub struct HangmanService {
    sessions: SessionStore,
    sampler: Arc<dyn WordSampler>,
}

impl std::fmt::Debug for HangmanService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HangmanService")
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

impl HangmanService {
    /// Creates a service over an existing store and word supply.
    #[instrument(skip_all)]
    pub fn new(sessions: SessionStore, sampler: Arc<dyn WordSampler>) -> Self {
        info!("Creating hangman service");
        Self { sessions, sampler }
    }

    /// Returns the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn handle(&self, id: &SessionId) -> Result<SessionHandle, ServiceError> {
        self.sessions
            .get(id)
            .ok_or(ServiceError::SessionNotFound(*id))
    }

    /// Draws a word and registers a new game.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidInput`] for an unknown language,
    /// [`ServiceError::WordSupplyUnavailable`] if no word could be drawn.
    #[instrument(skip(self), fields(language = %req.language, difficulty = %req.difficulty))]
    pub async fn create_game(&self, req: NewGameRequest) -> Result<NewGameResponse, ServiceError> {
        let language: Language = req.language.parse()?;
        let difficulty = Difficulty::from_label(&req.difficulty);

        let record = self.sampler.sample(language).await?;
        let game = GameState::with_difficulty(&record.text, record.hint, difficulty, language);
        if game.word_length() == 0 {
            warn!(text = %record.text, "Drawn word has no letters");
            return Err(ServiceError::WordSupplyUnavailable(
                "drawn word has no letters".to_string(),
            ));
        }

        let word_length = game.word_length();
        let max_attempts = game.max_attempts();
        let open_letter_attempts = game.open_letter_budget();
        let session_id = self.sessions.create(game);

        info!(session_id = %session_id, %difficulty, word_length, "Game created");
        Ok(NewGameResponse {
            session_id,
            word_length,
            max_attempts,
            open_letter_attempts,
        })
    }

    /// Applies a letter guess.
    ///
    /// # Errors
    ///
    /// [`ServiceError::SessionNotFound`], [`ServiceError::InvalidInput`] for a
    /// letter outside the session's alphabet, [`ServiceError::GameOver`] once
    /// the game has ended.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn guess(&self, id: &SessionId, letter: &str) -> Result<GuessResponse, ServiceError> {
        let handle = self.handle(id)?;
        let mut game = handle.lock();

        let letter = game.language().validate_guess(letter)?;
        let correct = game.apply_guess(letter)?;

        debug!(%letter, correct, tries_left = game.tries_left(), "Guess processed");
        Ok(GuessResponse::from_game(&game, correct, letter))
    }

    /// Opens the leftmost hidden letter at the cost of one attempt.
    ///
    /// # Errors
    ///
    /// [`ServiceError::SessionNotFound`], [`ServiceError::NoAttemptsLeft`],
    /// [`ServiceError::NoOpenLettersLeft`], [`ServiceError::NothingToOpen`].
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn open_letter(&self, id: &SessionId) -> Result<GuessResponse, ServiceError> {
        let handle = self.handle(id)?;
        let mut game = handle.lock();

        let letter = game.open_letter()?;

        debug!(%letter, tries_left = game.tries_left(), "Letter opened");
        Ok(GuessResponse::from_game(&game, true, letter))
    }

    /// Returns a snapshot of the game.
    ///
    /// # Errors
    ///
    /// [`ServiceError::SessionNotFound`].
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn state(&self, id: &SessionId) -> Result<GameStateResponse, ServiceError> {
        let handle = self.handle(id)?;
        let game = handle.lock();
        Ok(GameStateResponse::from(&*game))
    }

    /// Returns the hint.
    ///
    /// # Errors
    ///
    /// [`ServiceError::SessionNotFound`].
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn hint(&self, id: &SessionId) -> Result<HintResponse, ServiceError> {
        let handle = self.handle(id)?;
        let game = handle.lock();
        Ok(HintResponse {
            hint: game.hint().to_string(),
        })
    }

    /// Returns the full answer once the game has ended.
    ///
    /// # Errors
    ///
    /// [`ServiceError::SessionNotFound`], or [`ServiceError::InvalidInput`]
    /// while the game is still in progress.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn answer(&self, id: &SessionId) -> Result<String, ServiceError> {
        let handle = self.handle(id)?;
        let game = handle.lock();
        if game.is_game_over() {
            Ok(game.answer())
        } else {
            Err(ServiceError::InvalidInput(
                "the answer is only available after the game ends".to_string(),
            ))
        }
    }

    /// Deletes a session. Unknown IDs are ignored.
    #[instrument(skip(self), fields(session_id = %id))]
    pub fn delete(&self, id: &SessionId) -> bool {
        self.sessions.delete(id)
    }
}
