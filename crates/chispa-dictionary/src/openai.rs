use std::time::Duration;

use async_trait::async_trait;
use chispa_config::openai::OpenAiConfig;
use chispa_core::{Dictionary, LookupError};
use chispa_types::{Language, WordLookupResult};
use reqwest::StatusCode;
use serde_json::json;

use crate::prompt::{SYSTEM_PROMPT, lookup_prompt};
use crate::response::{ChatResponse, parse_lookup};

#[derive(Clone)]
pub struct OpenAiDictionary {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiDictionary {
    pub fn new(config: &OpenAiConfig, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.chat_model.clone(),
        })
    }
}

#[async_trait]
impl Dictionary for OpenAiDictionary {
    async fn lookup(
        &self,
        word: &str,
        context: Option<&str>,
        language: Language,
    ) -> Result<WordLookupResult, LookupError> {
        if self.api_key.is_empty() {
            return Err(LookupError::Authentication);
        }

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": lookup_prompt(word, context, language) },
            ],
            "temperature": 0.3,
            "response_format": { "type": "json_object" },
        });

        tracing::debug!("Looking up '{}' ({}) with {}", word, language.code(), self.model);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LookupError::Authentication);
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LookupError::Api(format!("HTTP {status}: {detail}")));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            LookupError::InvalidResponse(format!("Failed to parse response: {e}"))
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LookupError::InvalidResponse("No content in response".to_string()))?;

        parse_lookup(word, &content, language)
    }
}
