use std::time::Duration;

use async_trait::async_trait;
use chispa_config::anki::AnkiConfig;
use chispa_core::{CardStore, StoreError};
use chispa_types::{Card, Language};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::note::note_payload;

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
    config: AnkiConfig,
}

impl AnkiConnectClient {
    pub fn new(config: AnkiConfig, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: config.url.clone(),
            client,
            config,
        })
    }

    /// Check if AnkiConnect is available
    pub async fn check_connection(&self) -> Result<u32, StoreError> {
        let response: AnkiResponse<u32> = self.invoke("version", json!({})).await?;
        response.into_result()
    }

    /// Get list of deck names
    pub async fn deck_names(&self) -> Result<Vec<String>, StoreError> {
        let response: AnkiResponse<Vec<String>> = self.invoke("deckNames", json!({})).await?;
        response.into_result()
    }

    /// Get list of model (note type) names
    pub async fn model_names(&self) -> Result<Vec<String>, StoreError> {
        let response: AnkiResponse<Vec<String>> = self.invoke("modelNames", json!({})).await?;
        response.into_result()
    }

    /// Missing deck or note type for `language`; empty when notes can be added
    pub async fn setup_problems(&self, language: Language) -> Result<Vec<String>, StoreError> {
        let decks = self.deck_names().await?;
        let models = self.model_names().await?;
        Ok(missing_setup(
            &decks,
            &models,
            self.config.deck_for(language),
            &self.config.note_type,
        ))
    }

    /// Invoke an AnkiConnect API action
    async fn invoke<T>(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<AnkiResponse<T>, StoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action: action.to_string(),
            version: 6,
            params,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        response.json::<AnkiResponse<T>>().await.map_err(|e| {
            StoreError::InvalidResponse(format!("Failed to parse AnkiConnect response: {e}"))
        })
    }
}

#[async_trait]
impl CardStore for AnkiConnectClient {
    async fn is_available(&self) -> bool {
        match self.check_connection().await {
            Ok(version) => {
                tracing::debug!("AnkiConnect v{} at {}", version, self.base_url);
                true
            }
            Err(e) => {
                tracing::warn!("AnkiConnect unavailable at {}: {}", self.base_url, e);
                false
            }
        }
    }

    async fn add_note(&self, card: &Card, deck: &str) -> Result<u64, StoreError> {
        let params = note_payload(card, deck, &self.config);
        let response: AnkiResponse<u64> = self.invoke("addNote", params).await?;
        response.into_result()
    }
}

fn missing_setup(decks: &[String], models: &[String], deck: &str, note_type: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if !decks.iter().any(|d| d == deck) {
        problems.push(format!("deck '{deck}' does not exist in Anki"));
    }
    if !models.iter().any(|m| m == note_type) {
        problems.push(format!("note type '{note_type}' does not exist in Anki"));
    }
    problems
}

#[derive(Serialize)]
struct AnkiRequest {
    action: String,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T, StoreError> {
        if let Some(error) = self.error {
            return Err(StoreError::Rejected(error));
        }

        self.result.ok_or_else(|| {
            StoreError::InvalidResponse("AnkiConnect returned null result".to_string())
        })
    }
}
