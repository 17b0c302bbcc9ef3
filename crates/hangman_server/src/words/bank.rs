//! In-memory word collections loaded from a JSON word bank.

use super::{DEFAULT_KEY_LENGTH, SamplerError, WordRecord, WordSampler, random_key};
use async_trait::async_trait;
use hangman_engine::Language;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Word bank shipped with the server.
const BUILTIN_WORDS: &str = include_str!("../../words.json");

/// One entry of a word bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The word.
    pub text: String,
    /// Its hint.
    #[serde(default)]
    pub hint: String,
}

/// Per-language collections ordered by random document keys.
///
/// Each word is stored under a random alphanumeric key, the way documents get
/// generated IDs in a remote collection, and sampled by jumping to a random
/// key.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    collections: HashMap<Language, BTreeMap<String, WordRecord>>,
}

impl WordBank {
    /// Builds a bank from raw entries.
    ///
    /// Words are trimmed and compared case-insensitively for duplicates.
    /// Entries without any letter are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] if a language lists the same word twice.
    #[instrument(skip(entries), fields(languages = entries.len()))]
    pub fn from_entries(entries: HashMap<Language, Vec<WordEntry>>) -> Result<Self, SamplerError> {
        let mut collections = HashMap::new();

        for (language, words) in entries {
            let mut seen = HashSet::new();
            let mut collection = BTreeMap::new();

            for entry in words {
                let text = entry.text.trim().to_string();
                if !text.chars().any(char::is_alphabetic) {
                    warn!(%language, text = %entry.text, "Skipping entry without letters");
                    continue;
                }
                if !seen.insert(text.to_lowercase()) {
                    return Err(SamplerError::new(format!(
                        "'{}' appears more than once in [{}]",
                        text, language
                    )));
                }

                let key = loop {
                    let key = random_key(DEFAULT_KEY_LENGTH);
                    if !collection.contains_key(&key) {
                        break key;
                    }
                };
                collection.insert(key, WordRecord::new(text, entry.hint, language));
            }

            debug!(%language, words = collection.len(), "Loaded collection");
            collections.insert(language, collection);
        }

        Ok(Self { collections })
    }

    /// Parses a bank from JSON of the form `{"en": [{"text", "hint"}], ...}`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] on malformed JSON or duplicate words.
    pub fn from_json(json: &str) -> Result<Self, SamplerError> {
        let entries: HashMap<Language, Vec<WordEntry>> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Loads a bank from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SamplerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SamplerError::new(format!(
                "Failed to read word bank {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let bank = Self::from_json(&content)?;
        info!(words = bank.total_words(), "Word bank loaded");
        Ok(bank)
    }

    /// Returns the bank compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] if the embedded JSON is invalid.
    pub fn builtin() -> Result<Self, SamplerError> {
        Self::from_json(BUILTIN_WORDS)
    }

    /// Returns the number of words for `language`.
    pub fn len(&self, language: Language) -> usize {
        self.collections.get(&language).map_or(0, BTreeMap::len)
    }

    /// Returns the number of words across all languages.
    pub fn total_words(&self) -> usize {
        self.collections.values().map(BTreeMap::len).sum()
    }

    /// Draws the first word whose key sorts at or after `key`, falling back to
    /// the first word of the collection when the key sorts past the end.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] if the collection is missing or empty.
    #[instrument(skip(self))]
    pub fn sample_at(&self, language: Language, key: &str) -> Result<WordRecord, SamplerError> {
        let collection = self
            .collections
            .get(&language)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SamplerError::new(format!("No words for language {}", language)))?;

        let record = match collection.range(key.to_string()..).next() {
            Some((_, record)) => record,
            None => {
                debug!("Random key sorts past the end, using first entry");
                collection
                    .values()
                    .next()
                    .ok_or_else(|| SamplerError::new("Collection emptied during sampling"))?
            }
        };

        Ok(record.clone())
    }
}

#[async_trait]
impl WordSampler for WordBank {
    async fn sample(&self, language: Language) -> Result<WordRecord, SamplerError> {
        self.sample_at(language, &random_key(DEFAULT_KEY_LENGTH))
    }
}
