//! Errors reported by session operations, and their HTTP mapping.

use crate::session::SessionId;
use crate::words::SamplerError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hangman_engine::GameError;
use serde_json::json;
use tracing::warn;

/// Error returned by a session operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ServiceError {
    /// Malformed payload or disallowed letter.
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),

    /// No live session has this ID.
    #[display("Session not found: {}", _0)]
    SessionNotFound(SessionId),

    /// No attempts remain to pay for an open letter.
    #[display("No more attempts left")]
    NoAttemptsLeft,

    /// The open-letter budget is spent.
    #[display("No more open letter attempts left")]
    NoOpenLettersLeft,

    /// Every letter is already revealed.
    #[display("No letters to open")]
    NothingToOpen,

    /// The game already ended.
    #[display("Game is already over")]
    GameOver,

    /// No word could be fetched, so no session was created.
    #[display("Word supply unavailable: {}", _0)]
    WordSupplyUnavailable(String),
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Returns a stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "INVALID_INPUT",
            ServiceError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            ServiceError::NoAttemptsLeft => "NO_ATTEMPTS_LEFT",
            ServiceError::NoOpenLettersLeft => "NO_OPEN_LETTERS_LEFT",
            ServiceError::NothingToOpen => "NOTHING_TO_OPEN",
            ServiceError::GameOver => "GAME_OVER",
            ServiceError::WordSupplyUnavailable(_) => "WORD_SUPPLY_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_)
            | ServiceError::NoAttemptsLeft
            | ServiceError::NoOpenLettersLeft
            | ServiceError::NothingToOpen => StatusCode::BAD_REQUEST,
            ServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::GameOver => StatusCode::CONFLICT,
            ServiceError::WordSupplyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<GameError> for ServiceError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
            GameError::NoAttemptsLeft => ServiceError::NoAttemptsLeft,
            GameError::NoOpenLettersLeft => ServiceError::NoOpenLettersLeft,
            GameError::NothingToOpen => ServiceError::NothingToOpen,
            GameError::GameOver => ServiceError::GameOver,
        }
    }
}

impl From<SamplerError> for ServiceError {
    fn from(err: SamplerError) -> Self {
        ServiceError::WordSupplyUnavailable(err.message)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(code = self.code(), status = %status, error = %self, "Request failed");
        let body = Json(json!({
            "code": self.code(),
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
