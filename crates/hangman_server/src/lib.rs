//! Hangman server library - session store, word supply and REST API.
//!
//! # Architecture
//!
//! - **Session**: concurrent registry from opaque IDs to live games
//! - **Words**: random word supply (local word bank or Firestore)
//! - **Service**: create / guess / open letter / state / hint / delete
//! - **Routes**: axum router over the service
//!
//! # Example
//!
//! ```no_run
//! use hangman_server::{HangmanService, SessionStore, WordBank, routes};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = HangmanService::new(SessionStore::new(), Arc::new(WordBank::builtin()?));
//! let app = routes::router(service);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
mod error;
pub mod play;
pub mod routes;
mod service;
mod session;
pub mod words;

// Crate-level exports - Configuration
pub use config::{ConfigError, FirestoreConfig, ServerConfig, WordSourceConfig};

// Crate-level exports - Errors
pub use error::ServiceError;

// Crate-level exports - Service
pub use service::{
    GameStateResponse, GuessRequest, GuessResponse, HangmanService, HintResponse, NewGameRequest,
    NewGameResponse,
};

// Crate-level exports - Session management
pub use session::{SessionHandle, SessionId, SessionStore};

// Crate-level exports - Word supply
pub use words::{FirestoreSampler, SamplerError, WordBank, WordEntry, WordRecord, WordSampler};
