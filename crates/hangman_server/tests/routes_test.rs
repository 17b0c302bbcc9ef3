//! REST API tests driven through the router without a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use hangman_server::{HangmanService, SessionStore, WordBank, routes};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with_word(word: &str, hint: &str) -> Router {
    let bank = WordBank::from_json(
        &json!({ "en": [{ "text": word, "hint": hint }] }).to_string(),
    )
    .unwrap();
    routes::router(HangmanService::new(SessionStore::new(), Arc::new(bank)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_game(app: &Router, difficulty: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/game/new",
        Some(json!({ "language": "en", "difficulty": difficulty })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn full_game_over_http() {
    let app = app_with_word("cat", "A pet");

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/game/new",
        Some(json!({ "language": "en", "difficulty": "Normal" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["word_length"], 3);
    assert_eq!(created["max_attempts"], 5);
    assert_eq!(created["open_letter_attempts"], 1);
    let id = created["session_id"].as_str().unwrap();

    let (status, hint) = send(&app, Method::GET, &format!("/api/game/{id}/hint"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hint["hint"], "A pet");

    let guess = format!("/api/game/{id}/guess");
    let (_, r) = send(&app, Method::POST, &guess, Some(json!({ "letter": "c" }))).await;
    assert_eq!(r["correct"], true);
    assert_eq!(r["current_word"], "c _ _");
    assert_eq!(r["tries_left"], 5);

    let (_, r) = send(&app, Method::POST, &guess, Some(json!({ "letter": "z" }))).await;
    assert_eq!(r["correct"], false);
    assert_eq!(r["tries_left"], 4);

    let (status, r) = send(&app, Method::POST, &format!("/api/game/{id}/reveal"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(r["opened_letter"], "a");
    assert_eq!(r["current_word"], "c a _");
    assert_eq!(r["tries_left"], 3);

    let (_, r) = send(&app, Method::POST, &guess, Some(json!({ "letter": "T" }))).await;
    assert_eq!(r["correct"], true);
    assert_eq!(r["current_word"], "c a t");
    assert_eq!(r["is_game_over"], true);
    assert_eq!(r["won"], true);

    let (status, state) = send(&app, Method::GET, &format!("/api/game/{id}/state"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["won"], true);
    assert_eq!(state["open_letter_attempts"], 0);

    let (status, r) = send(&app, Method::POST, &guess, Some(json!({ "letter": "x" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(r["code"], "GAME_OVER");
}

#[tokio::test]
async fn losing_exposes_the_word() {
    let app = app_with_word("dog", "Barks");
    let id = new_game(&app, "Hard").await;
    let guess = format!("/api/game/{id}/guess");

    for letter in ["x", "y"] {
        let (_, r) = send(&app, Method::POST, &guess, Some(json!({ "letter": letter }))).await;
        assert_eq!(r["is_game_over"], false);
    }
    let (_, r) = send(&app, Method::POST, &guess, Some(json!({ "letter": "z" }))).await;
    assert_eq!(r["is_game_over"], true);
    assert_eq!(r["won"], false);
    assert_eq!(r["tries_left"], 0);
    assert_eq!(r["current_word"], "d o g");
}

#[tokio::test]
async fn invalid_guesses_are_rejected() {
    let app = app_with_word("cat", "A pet");
    let id = new_game(&app, "Easy").await;
    let guess = format!("/api/game/{id}/guess");

    for letter in ["ab", "", "1", "ж"] {
        let (status, r) = send(&app, Method::POST, &guess, Some(json!({ "letter": letter }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "letter {letter:?}");
        assert_eq!(r["code"], "INVALID_INPUT");
    }

    let (status, r) = send(&app, Method::POST, &guess, Some(json!({ "wrong": "c" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(r["code"], "INVALID_INPUT");

    let (_, state) = send(&app, Method::GET, &format!("/api/game/{id}/state"), None).await;
    assert_eq!(state["tries_left"], 7);
    assert_eq!(state["current_word"], "_ _ _");
}

#[tokio::test]
async fn open_letter_budget_is_enforced() {
    let app = app_with_word("banana", "Yellow");
    let id = new_game(&app, "Hard").await;
    let reveal = format!("/api/game/{id}/reveal");

    let (status, r) = send(&app, Method::POST, &reveal, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(r["code"], "NO_OPEN_LETTERS_LEFT");
}

#[tokio::test]
async fn unknown_language_is_rejected() {
    let app = app_with_word("cat", "A pet");
    let (status, r) = send(
        &app,
        Method::POST,
        "/api/game/new",
        Some(json!({ "language": "xx" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(r["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn missing_collection_is_service_unavailable() {
    let app = app_with_word("cat", "A pet");
    let (status, r) = send(
        &app,
        Method::POST,
        "/api/game/new",
        Some(json!({ "language": "pl", "difficulty": "Normal" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(r["code"], "WORD_SUPPLY_UNAVAILABLE");
}

#[tokio::test]
async fn session_lookup_errors() {
    let app = app_with_word("cat", "A pet");

    let (status, r) = send(&app, Method::GET, "/api/game/not-a-uuid/state", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(r["code"], "INVALID_INPUT");

    let unknown = uuid::Uuid::new_v4();
    let (status, r) = send(&app, Method::GET, &format!("/api/game/{unknown}/state"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(r["code"], "SESSION_NOT_FOUND");

    // An unknown session wins over a malformed body.
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/game/{unknown}/guess"),
        Some(json!({ "nope": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let app = app_with_word("cat", "A pet");
    let id = new_game(&app, "Normal").await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/game/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/game/{id}/hint"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting twice is not an error.
    let (status, _) = send(&app, Method::DELETE, &format!("/api/game/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_path_gets_json_404() {
    let app = app_with_word("cat", "A pet");
    let (status, r) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(r["code"], "PAGE_NOT_FOUND");
    assert_eq!(r["message"], "Page not found");
}
