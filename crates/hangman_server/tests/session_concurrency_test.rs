//! Concurrent access to the session store and service.

use async_trait::async_trait;
use hangman_engine::{GameState, Language};
use hangman_server::{
    HangmanService, NewGameRequest, SamplerError, SessionStore, WordRecord, WordSampler,
};
use std::collections::HashSet;
use std::sync::Arc;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

fn game(word: &str, max_attempts: u32) -> GameState {
    GameState::new(word, "hint", max_attempts, 0, Language::English)
}

#[test]
fn racing_guesses_on_one_session_apply_each_letter_once() {
    let store = SessionStore::new();
    let id = store.create(game("abcdefghij", 100));

    let results: Vec<(usize, usize)> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..16)
            .map(|worker| {
                let store = &store;
                scope.spawn(move || {
                    let handle = store.get(&id).unwrap();
                    let mut letters: Vec<char> = ALPHABET.chars().collect();
                    letters.rotate_left(worker % 26);
                    if worker % 2 == 1 {
                        letters.reverse();
                    }

                    let (mut hits, mut rejected) = (0, 0);
                    for letter in letters {
                        match handle.lock().apply_guess(letter) {
                            Ok(true) => hits += 1,
                            Ok(false) => {}
                            Err(_) => rejected += 1,
                        }
                    }
                    (hits, rejected)
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let hits: usize = results.iter().map(|(h, _)| h).sum();
    assert_eq!(hits, 10, "each word letter is revealed by exactly one guess");

    let handle = store.get(&id).unwrap();
    let game = handle.lock();
    assert!(game.is_won());
    assert_eq!(
        game.incorrect_count() as usize,
        game.guessed_letters().len() - 10,
        "every recorded miss was counted once"
    );
}

#[test]
fn sessions_do_not_share_state() {
    let store = SessionStore::new();
    let ids: Vec<_> = (0..8).map(|_| store.create(game("zebra", 50))).collect();
    assert_eq!(store.len(), 8);

    std::thread::scope(|scope| {
        for (misses, id) in ids.iter().enumerate() {
            let store = &store;
            scope.spawn(move || {
                let handle = store.get(id).unwrap();
                for letter in "cdfghijklmnopqstuvwxy".chars().take(misses) {
                    assert_eq!(handle.lock().apply_guess(letter), Ok(false));
                }
            });
        }
    });

    for (misses, id) in ids.iter().enumerate() {
        let handle = store.get(id).unwrap();
        assert_eq!(handle.lock().incorrect_count() as usize, misses);
    }
}

#[test]
fn creates_and_deletes_from_many_threads() {
    let store = SessionStore::new();

    let created: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let store = &store;
                scope.spawn(move || {
                    (0..25)
                        .map(|_| store.create(game("cat", 5)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect()
    });

    let unique: HashSet<_> = created.iter().copied().collect();
    assert_eq!(unique.len(), 200);
    assert_eq!(store.len(), 200);

    std::thread::scope(|scope| {
        for chunk in created.chunks(50) {
            let store = &store;
            scope.spawn(move || {
                for id in chunk {
                    assert!(store.delete(id));
                }
            });
        }
    });

    assert!(store.is_empty());
    assert!(created.iter().all(|id| store.get(id).is_none()));
}

struct Fixed;

#[async_trait]
impl WordSampler for Fixed {
    async fn sample(&self, language: Language) -> Result<WordRecord, SamplerError> {
        Ok(WordRecord::new("mississippi".to_string(), "A river".to_string(), language))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn service_serializes_parallel_open_letters() {
    let service = HangmanService::new(SessionStore::new(), Arc::new(Fixed));
    let created = service
        .create_game(NewGameRequest {
            language: "en".to_string(),
            difficulty: "Easy".to_string(),
        })
        .await
        .unwrap();
    let id = created.session_id;
    assert_eq!(created.open_letter_attempts, 2);

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.open_letter(&id) })
        })
        .collect();

    let mut opened = Vec::new();
    for task in tasks {
        if let Ok(response) = task.await.unwrap() {
            opened.push(response.opened_letter.unwrap());
        }
    }

    // Two budgeted opens, leftmost hidden letter first.
    assert_eq!(opened.len(), 2);
    assert!(opened.contains(&'m'));
    assert!(opened.contains(&'i'));

    let state = service.state(&id).unwrap();
    assert_eq!(state.open_letter_attempts, 0);
    assert_eq!(state.tries_left, 5);
    assert_eq!(state.current_word, "m i _ _ i _ _ i _ _ i");
}
