//! Word supply for new sessions.
//!
//! Every source draws a `(word, hint)` pair with the same jump-and-fallback
//! technique: generate a random key, take the first entry whose key sorts at
//! or after it, and if there is none fall back to the first entry of the
//! collection.

mod bank;
mod error;
mod firestore;

pub use bank::{WordBank, WordEntry};
pub use error::SamplerError;
pub use firestore::FirestoreSampler;

use crate::config::WordSourceConfig;
use async_trait::async_trait;
use hangman_engine::Language;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Length of the random keys used to jump into a collection.
pub const DEFAULT_KEY_LENGTH: usize = 20;

/// A word with its hint, as drawn from a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct WordRecord {
    /// The answer.
    pub text: String,
    /// Hint shown on request.
    pub hint: String,
    /// Collection the word was drawn from.
    pub language: Language,
}

/// Source of random words for new sessions.
///
/// Sampling is an approximation of a uniform draw. An entry is chosen when the
/// random key lands in the gap between it and its predecessor, so entries
/// after large gaps in key order come up more often than others.
#[async_trait]
pub trait WordSampler: Send + Sync {
    /// Draws one word for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] when neither the random jump nor the fallback
    /// produced a word.
    async fn sample(&self, language: Language) -> Result<WordRecord, SamplerError>;
}

/// Generates an alphanumeric key of `len` characters.
pub fn random_key(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Builds the sampler described by the configuration.
///
/// # Errors
///
/// Returns [`SamplerError`] if the word bank file cannot be loaded or the
/// HTTP client cannot be built.
#[instrument(skip(config))]
pub fn build_sampler(config: &WordSourceConfig) -> Result<Arc<dyn WordSampler>, SamplerError> {
    match config {
        WordSourceConfig::Bank { path: Some(path) } => {
            info!(path = %path.display(), "Using word bank file");
            Ok(Arc::new(WordBank::from_file(path)?))
        }
        WordSourceConfig::Bank { path: None } => {
            info!("Using built-in word bank");
            Ok(Arc::new(WordBank::builtin()?))
        }
        WordSourceConfig::Firestore(firestore) => {
            info!(project_id = %firestore.project_id(), "Using Firestore word collections");
            Ok(Arc::new(FirestoreSampler::new(firestore)?))
        }
    }
}
