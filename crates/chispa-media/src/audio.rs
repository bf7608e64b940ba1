use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chispa_config::elevenlabs::ElevenLabsConfig;
use chispa_core::{GenerationError, Narrator};
use reqwest::StatusCode;
use serde_json::json;

use crate::naming::{audio_file_name, audio_ref, save};

/// ElevenLabs text-to-speech
pub struct ElevenLabsNarrator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model_id: String,
    media_dir: PathBuf,
}

impl ElevenLabsNarrator {
    pub fn new(
        config: &ElevenLabsConfig,
        media_dir: PathBuf,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: speech_url(&config.base_url, &config.voice_id),
            model_id: config.model_id.clone(),
            media_dir,
        })
    }
}

fn speech_url(base_url: &str, voice_id: &str) -> String {
    format!(
        "{}/v1/text-to-speech/{}",
        base_url.trim_end_matches('/'),
        voice_id
    )
}

#[async_trait]
impl Narrator for ElevenLabsNarrator {
    async fn generate(&self, text: &str, word: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&json!({ "text": text, "model_id": self.model_id }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(GenerationError::Api("invalid ElevenLabs API key".to_string()));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api(format!("HTTP {status}: {detail}")));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(GenerationError::NoData);
        }

        let file_name = audio_file_name(word);
        save(&self.media_dir, &file_name, &bytes).await?;
        Ok(audio_ref(&file_name))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn voice_goes_into_the_path() {
        assert_eq!(
            speech_url("https://api.elevenlabs.io/", "iLNdboCfbjKNDLRgl0GZ"),
            "https://api.elevenlabs.io/v1/text-to-speech/iLNdboCfbjKNDLRgl0GZ"
        );
    }
}
