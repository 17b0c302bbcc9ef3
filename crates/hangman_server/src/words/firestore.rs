//! Word collections stored in Cloud Firestore, read over its REST API.

use super::{SamplerError, WordRecord, WordSampler, random_key};
use crate::config::FirestoreConfig;
use async_trait::async_trait;
use hangman_engine::Language;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Firestore-backed sampler.
///
/// Documents live under `artifacts/{app_id}/public/data/{collection}`, one
/// collection per language tag (`en`, `pl`, `ua`), and carry `text` and
/// `hint` string fields.
#[derive(Debug, Clone)]
pub struct FirestoreSampler {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    app_id: String,
    key_length: usize,
    fallback_page_size: u32,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Default, Deserialize)]
struct Fields {
    #[serde(default)]
    text: StringValue,
    #[serde(default)]
    hint: StringValue,
}

#[derive(Debug, Default, Deserialize)]
struct StringValue {
    #[serde(rename = "stringValue", default)]
    string_value: String,
}

impl Document {
    fn into_record(self, language: Language) -> Option<WordRecord> {
        let text = self.fields.text.string_value;
        if text.trim().is_empty() {
            return None;
        }
        Some(WordRecord::new(text, self.fields.hint.string_value, language))
    }
}

impl FirestoreSampler {
    /// Creates a sampler with a client bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError`] if the HTTP client cannot be built.
    #[instrument(skip(config), fields(project_id = %config.project_id()))]
    pub fn new(config: &FirestoreConfig) -> Result<Self, SamplerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            project_id: config.project_id().clone(),
            app_id: config.app_id().clone(),
            key_length: *config.key_length(),
            fallback_page_size: (*config.fallback_page_size()).max(1),
        })
    }

    /// Resource path of the parent of all language collections.
    fn parent_path(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents/artifacts/{}/public/data",
            self.project_id, self.app_id
        )
    }

    /// Runs a structured query that starts at a random document key.
    #[instrument(skip(self))]
    async fn jump(&self, language: Language) -> Result<Option<WordRecord>, SamplerError> {
        let parent = self.parent_path();
        let collection = language.collection();
        let start_at = format!("{}/{}/{}", parent, collection, random_key(self.key_length));
        let url = format!("{}/{}:runQuery", self.base_url, parent);

        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "orderBy": [{
                    "field": { "fieldPath": "__name__" },
                    "direction": "ASCENDING"
                }],
                "startAt": { "values": [{ "referenceValue": start_at }] },
                "limit": 1
            }
        });

        debug!(%url, "Running random jump query");
        let rows: Vec<QueryRow> = self
            .client
            .post(&url)
            .json(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.document)
            .find_map(|doc| doc.into_record(language)))
    }

    /// Lists the first page of the collection and takes its first word.
    #[instrument(skip(self))]
    async fn first_page(&self, language: Language) -> Result<WordRecord, SamplerError> {
        let url = format!(
            "{}/{}/{}?pageSize={}",
            self.base_url,
            self.parent_path(),
            language.collection(),
            self.fallback_page_size
        );

        debug!(%url, "Fetching fallback page");
        let page: ListResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        page.documents
            .into_iter()
            .find_map(|doc| doc.into_record(language))
            .ok_or_else(|| SamplerError::new(format!("No documents in collection {}", language)))
    }
}

#[async_trait]
impl WordSampler for FirestoreSampler {
    #[instrument(skip(self))]
    async fn sample(&self, language: Language) -> Result<WordRecord, SamplerError> {
        match self.jump(language).await {
            Ok(Some(record)) => {
                info!(%language, "Word drawn by random jump");
                return Ok(record);
            }
            Ok(None) => debug!(%language, "Random jump found nothing"),
            Err(e) => warn!(%language, error = %e, "Random jump failed"),
        }

        let record = self.first_page(language).await.map_err(|e| {
            warn!(%language, error = %e, "Fallback fetch failed");
            SamplerError::new(format!(
                "Failed to fetch a word for {}: {}",
                language, e.message
            ))
        })?;

        info!(%language, "Word drawn from fallback page");
        Ok(record)
    }
}
