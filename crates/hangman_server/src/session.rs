//! Concurrent session registry.
//!
//! The directory (id → game) sits behind one `RwLock`; each game has its own
//! `Mutex`, so guesses on unrelated sessions never wait on each other.

use hangman_engine::GameState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Opaque unique identifier for a game session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Shared handle to one live game.
///
/// Cloning the handle does not copy the game; every clone locks the same state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    state: Arc<Mutex<GameState>>,
}

impl SessionHandle {
    /// Returns the session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Locks the game for exclusive access.
    ///
    /// Transitions are applied under this guard, so concurrent actions on the
    /// same session are serialized.
    pub fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true if both handles refer to the same game.
    pub fn same_game(&self, other: &SessionHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    /// Registers `state` under a fresh identifier and returns it.
    #[instrument(skip(self, state), fields(word_length = state.word_length()))]
    pub fn create(&self, state: GameState) -> SessionId {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let id = loop {
            let id = SessionId::new();
            if !sessions.contains_key(&id) {
                break id;
            }
            warn!(session_id = %id, "Generated session id collides with a live session");
        };

        let handle = SessionHandle {
            id,
            state: Arc::new(Mutex::new(state)),
        };
        sessions.insert(id, handle);

        info!(session_id = %id, live = sessions.len(), "Created new session");
        id
    }

    /// Gets the live handle for `id`, if the session exists.
    #[instrument(skip(self))]
    pub fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let handle = sessions.get(id).cloned();

        if handle.is_none() {
            debug!(session_id = %id, "Session not found");
        }

        handle
    }

    /// Removes a session. Returns false if it did not exist.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let removed = sessions.remove(id).is_some();

        if removed {
            info!(session_id = %id, live = sessions.len(), "Deleted session");
        } else {
            debug!(session_id = %id, "Delete of unknown session ignored");
        }

        removed
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no session is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lists all live session IDs.
    #[instrument(skip(self))]
    pub fn ids(&self) -> Vec<SessionId> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let ids: Vec<_> = sessions.keys().copied().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}
