//! Errors raised by game transitions.

/// Error that can occur when validating or applying a player action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The guess payload is not a single letter of the session's alphabet.
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),

    /// No attempts remain, so a letter cannot be opened.
    #[display("No more attempts left")]
    NoAttemptsLeft,

    /// The open-letter budget is spent.
    #[display("No more open letter attempts left")]
    NoOpenLettersLeft,

    /// Every slot is already revealed.
    #[display("No letters to open")]
    NothingToOpen,

    /// The game already ended in a win or a loss.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for GameError {}
