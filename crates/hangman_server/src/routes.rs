//! REST API routes.

use crate::error::ServiceError;
use crate::service::{
    GameStateResponse, GuessRequest, GuessResponse, HangmanService, HintResponse, NewGameRequest,
    NewGameResponse,
};
use crate::session::SessionId;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Builds the API router over `service`.
pub fn router(service: HangmanService) -> Router {
    Router::new()
        .route("/api/game/new", post(new_game))
        .route("/api/game/{session_id}", axum::routing::delete(delete_game))
        .route("/api/game/{session_id}/guess", post(make_guess))
        .route("/api/game/{session_id}/reveal", post(open_letter))
        .route("/api/game/{session_id}/state", get(game_state))
        .route("/api/game/{session_id}/hint", get(game_hint))
        .fallback(not_found)
        .layer(ServiceBuilder::new().map_request(|req: Request| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(service)
}

fn parse_session_id(raw: &str) -> Result<SessionId, ServiceError> {
    raw.parse().map_err(|_| {
        debug!(raw, "Malformed session id");
        ServiceError::InvalidInput("Invalid session ID".to_string())
    })
}

#[instrument(skip(service, body))]
async fn new_game(
    State(service): State<HangmanService>,
    body: Result<Json<NewGameRequest>, JsonRejection>,
) -> Result<Json<NewGameResponse>, ServiceError> {
    let Json(req) = body.map_err(|e| ServiceError::InvalidInput(format!("Invalid request: {}", e)))?;
    service.create_game(req).await.map(Json)
}

#[instrument(skip(service, body))]
async fn make_guess(
    State(service): State<HangmanService>,
    Path(session_id): Path<String>,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, ServiceError> {
    let id = parse_session_id(&session_id)?;
    if service.sessions().get(&id).is_none() {
        return Err(ServiceError::SessionNotFound(id));
    }
    let Json(req) = body.map_err(|_| ServiceError::InvalidInput("Invalid guess".to_string()))?;
    service.guess(&id, &req.letter).map(Json)
}

#[instrument(skip(service))]
async fn open_letter(
    State(service): State<HangmanService>,
    Path(session_id): Path<String>,
) -> Result<Json<GuessResponse>, ServiceError> {
    let id = parse_session_id(&session_id)?;
    service.open_letter(&id).map(Json)
}

#[instrument(skip(service))]
async fn game_state(
    State(service): State<HangmanService>,
    Path(session_id): Path<String>,
) -> Result<Json<GameStateResponse>, ServiceError> {
    let id = parse_session_id(&session_id)?;
    service.state(&id).map(Json)
}

#[instrument(skip(service))]
async fn game_hint(
    State(service): State<HangmanService>,
    Path(session_id): Path<String>,
) -> Result<Json<HintResponse>, ServiceError> {
    let id = parse_session_id(&session_id)?;
    service.hint(&id).map(Json)
}

#[instrument(skip(service))]
async fn delete_game(
    State(service): State<HangmanService>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_session_id(&session_id)?;
    service.delete(&id);
    Ok(StatusCode::NO_CONTENT)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "code": "PAGE_NOT_FOUND", "message": "Page not found" })),
    )
}
