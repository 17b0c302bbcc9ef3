//! Tests for guess evaluation, the open-letter economy and win/loss derivation.

use hangman_engine::{Difficulty, GameError, GameState, GameStatus, Language, Slot};

fn english(word: &str, max_attempts: u32, budget: u32) -> GameState {
    GameState::new(word, "a hint", max_attempts, budget, Language::English)
}

/// Checks that the rendering agrees exactly with the guessed-letter set.
fn assert_reveal_consistent(game: &GameState) {
    let answer: Vec<char> = game.answer().chars().collect();
    for (slot, c) in game.slots().iter().zip(&answer) {
        let guessed = game.guessed_letters().contains(&c.to_lowercase().next().unwrap());
        match slot {
            Slot::Guessed(shown) => {
                assert!(guessed, "slot {shown} revealed without a guess");
                assert_eq!(shown, c);
            }
            Slot::Hidden => assert!(!guessed, "guessed letter {c} left hidden"),
            Slot::Exposed(shown) => {
                assert!(game.is_lost(), "slot {shown} exposed before a loss");
                assert!(!guessed);
            }
        }
    }
}

#[test]
fn test_cat_scenario() {
    let mut game = english("cat", 5, 1);

    assert_eq!(game.apply_guess('c'), Ok(true));
    assert_eq!(game.display_word(), "c _ _");

    assert_eq!(game.apply_guess('z'), Ok(false));
    assert_eq!(game.tries_left(), 4);

    assert_eq!(game.open_letter(), Ok('a'));
    assert_eq!(game.tries_left(), 3);
    assert_eq!(game.open_letter_budget(), 0);
    assert_eq!(game.display_word(), "c a _");

    assert_eq!(game.apply_guess('t'), Ok(true));
    assert!(game.is_won());
    assert!(game.is_game_over());
    assert_eq!(game.display_word(), "c a t");
}

#[test]
fn test_dog_loss_scenario() {
    let mut game = english("dog", 1, 0);

    assert_eq!(game.apply_guess('x'), Ok(false));
    assert_eq!(game.incorrect_count(), 1);
    assert!(game.is_game_over());
    assert!(!game.is_won());
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.display_word(), "d o g");
}

#[test]
fn test_open_letter_costs_exactly_one_attempt() {
    for (word, expected_revealed) in [("abc", 1), ("aaa", 3), ("abab", 2)] {
        let mut game = english(word, 7, 2);
        game.open_letter().expect("letter should open");
        assert_eq!(game.incorrect_count(), 1, "word {word}");
        let revealed = game.slots().iter().filter(|s| !s.is_hidden()).count();
        assert_eq!(revealed, expected_revealed, "word {word}");
    }
}

#[test]
fn test_open_letter_budget_is_finite() {
    let mut game = english("abcdef", 7, 2);
    assert!(game.open_letter().is_ok());
    assert!(game.open_letter().is_ok());
    assert_eq!(game.open_letter(), Err(GameError::NoOpenLettersLeft));
    assert_eq!(game.incorrect_count(), 2);
    assert_eq!(game.open_letter_budget(), 0);
}

#[test]
fn test_open_letter_can_cause_loss() {
    let mut game = english("abcd", 2, 2);
    game.apply_guess('z').unwrap();
    assert_eq!(game.open_letter(), Ok('a'));
    assert!(game.is_lost());
    assert_eq!(game.display_word(), "a b c d");
    assert_eq!(game.slots()[0], Slot::Guessed('a'));
    assert_eq!(game.slots()[1], Slot::Exposed('b'));
}

#[test]
fn test_uppercase_words_render_as_written() {
    let mut game = GameState::with_difficulty("ŻABA", "frog", Difficulty::Normal, Language::Polish);
    assert_eq!(game.apply_guess('ż'), Ok(true));
    assert_eq!(game.apply_guess('A'), Ok(true));
    assert_eq!(game.display_word(), "Ż A _ A");
    assert_eq!(game.open_letter(), Ok('B'));
    assert!(game.is_won());
}

#[test]
fn test_guess_sequences_keep_invariants() {
    let words = ["hangman", "banana", "rhythm", "queue", "x"];
    let alphabet: Vec<char> = ('a'..='z').collect();

    for word in words {
        // Walk the alphabet with several strides so each word sees many orders.
        for stride in [1usize, 3, 5, 7, 11] {
            let mut game = english(word, 6, 0);
            let mut index = 0;
            while !game.is_game_over() {
                let letter = alphabet[index % alphabet.len()];
                index += stride;

                let before_incorrect = game.incorrect_count();
                let correct = game.apply_guess(letter).unwrap();
                if correct {
                    assert_eq!(game.incorrect_count(), before_incorrect);
                }

                // Guessing it again never changes anything.
                let snapshot = game.clone();
                if !game.is_game_over() {
                    assert_eq!(game.apply_guess(letter), Ok(false));
                    assert_eq!(game, snapshot);
                }

                assert_reveal_consistent(&game);
                assert!(game.incorrect_count() <= game.max_attempts());
                assert!(!(game.is_won() && game.is_lost()));
            }
            assert!(game.status().is_terminal());
        }
    }
}

#[test]
fn test_tries_left_never_negative() {
    let mut game = english("zzz", 3, 0);
    for letter in ['a', 'b', 'c'] {
        game.apply_guess(letter).unwrap();
    }
    assert_eq!(game.tries_left(), 0);
    assert_eq!(game.apply_guess('d'), Err(GameError::GameOver));
    assert_eq!(game.tries_left(), 0);
}
