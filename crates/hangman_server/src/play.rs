//! Terminal hangman against the configured word supply.

use crate::error::ServiceError;
use crate::service::{GuessResponse, HangmanService, NewGameRequest};
use crate::session::SessionId;
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

/// Gallows drawings, from an empty scaffold to the full figure.
const GALLOWS: [&str; 7] = [
    "\n  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========\n",
    "\n  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========\n",
    "\n  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========\n",
    "\n  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========\n",
    "\n  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========\n",
    "\n  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========\n",
    "\n  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========\n",
];

/// How a terminal game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The word was guessed.
    Won,
    /// The attempts ran out.
    Lost,
    /// Input ended or the player quit.
    Abandoned,
}

/// Picks the drawing for `used` of `max_attempts` spent attempts.
pub fn gallows(used: u32, max_attempts: u32) -> &'static str {
    let last = GALLOWS.len() - 1;
    if max_attempts == 0 {
        return GALLOWS[last];
    }
    let stage = (used as usize * last) / max_attempts as usize;
    GALLOWS[stage.min(last)]
}

/// Plays one game, reading commands from `input` and writing to `output`.
///
/// Each line is a letter guess, `?` for the hint, `!` to open a letter, or
/// `quit`. The session is deleted when the game ends.
///
/// # Errors
///
/// Returns an error if the game cannot be created or the terminal fails.
#[instrument(skip(service, input, output))]
pub async fn play<R, W>(
    service: &HangmanService,
    request: NewGameRequest,
    input: R,
    mut output: W,
) -> Result<PlayOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let created = service.create_game(request).await?;
    let id = created.session_id;
    info!(session_id = %id, "Terminal game started");

    output
        .write_all(
            format!(
                "Welcome to Hangman! {} letters, {} attempts, {} open letters.\n\
                 Type a letter, '?' for a hint, '!' to open a letter, 'quit' to leave.\n",
                created.word_length, created.max_attempts, created.open_letter_attempts
            )
            .as_bytes(),
        )
        .await?;

    let outcome = run_turns(service, &id, created.max_attempts, input, &mut output).await;
    service.delete(&id);
    output.flush().await?;
    outcome
}

async fn run_turns<R, W>(
    service: &HangmanService,
    id: &SessionId,
    max_attempts: u32,
    input: R,
    output: &mut W,
) -> Result<PlayOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        let state = service.state(id)?;
        output
            .write_all(
                format!(
                    "{}\nWord: {}   Tries left: {}   Open letters: {}\n> ",
                    gallows(max_attempts - state.tries_left, max_attempts),
                    state.current_word,
                    state.tries_left,
                    state.open_letter_attempts
                )
                .as_bytes(),
            )
            .await?;

        let Some(line) = lines.next_line().await? else {
            debug!("Input closed");
            return Ok(PlayOutcome::Abandoned);
        };

        let result = match line.trim() {
            "quit" | "exit" => return Ok(PlayOutcome::Abandoned),
            "?" => {
                let hint = service.hint(id)?;
                output.write_all(format!("Hint: {}\n", hint.hint).as_bytes()).await?;
                continue;
            }
            "!" => service.open_letter(id),
            letter => service.guess(id, letter),
        };

        match result {
            Ok(response) => {
                output.write_all(describe(&response).as_bytes()).await?;
                if response.is_game_over {
                    let answer = service.answer(id)?;
                    let outcome = if response.won {
                        output
                            .write_all(format!("Congratulations! The word was '{}'.\n", answer).as_bytes())
                            .await?;
                        PlayOutcome::Won
                    } else {
                        output
                            .write_all(
                                format!(
                                    "{}\nGame over! The word was '{}'.\n",
                                    gallows(max_attempts, max_attempts),
                                    answer
                                )
                                .as_bytes(),
                            )
                            .await?;
                        PlayOutcome::Lost
                    };
                    return Ok(outcome);
                }
            }
            Err(e @ ServiceError::SessionNotFound(_)) => return Err(e.into()),
            Err(e) => {
                output.write_all(format!("{}\n", e).as_bytes()).await?;
            }
        }
    }
}

fn describe(response: &GuessResponse) -> String {
    match (response.correct, response.opened_letter) {
        (true, Some(letter)) => format!("Yes, '{}' is in the word.\n", letter),
        (false, Some(letter)) => format!("No '{}' there (or already tried).\n", letter),
        (_, None) => String::new(),
    }
}
