use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use chispa_config::openai::OpenAiConfig;
use chispa_core::{GenerationError, ImageGenerator};
use serde::Deserialize;
use serde_json::json;

use crate::naming::{image_file_name, image_ref, save};

const SAFE_PROMPT_SYSTEM: &str = "You convert sentences into safe image prompts for educational \
flashcards. Focus on the SCENE and CONTEXT, not explicit content. Output only the image prompt, \
nothing else.";

fn safe_prompt_request(sentence: &str) -> String {
    format!(
        "Create a safe, non-explicit image prompt that captures the context/scene of this \
         sentence: \"{sentence}\"\n\nIf the sentence is explicit, focus on the setting, emotions, \
         or non-explicit elements. The image should help remember the sentence without showing \
         anything inappropriate."
    )
}

fn illustration_prompt(safe_prompt: &str) -> String {
    format!(
        "Create a clear, simple illustration that depicts: {safe_prompt}. Style: clean, \
         educational, suitable for a flashcard. No text in the image."
    )
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ImageData {
    b64_json: Option<String>,
    url: Option<String>,
}

/// Where the generated picture comes from
#[derive(Debug, PartialEq, Eq)]
enum ImagePayload {
    Inline(Vec<u8>),
    Remote(String),
}

fn payload(response: ImagesResponse) -> Result<ImagePayload, GenerationError> {
    let data = response
        .data
        .into_iter()
        .next()
        .ok_or(GenerationError::NoData)?;

    match (data.b64_json, data.url) {
        (Some(b64), _) if !b64.is_empty() => base64::engine::general_purpose::STANDARD
            .decode(b64.as_bytes())
            .map(ImagePayload::Inline)
            .map_err(|e| GenerationError::Decode(e.to_string())),
        (_, Some(url)) if !url.is_empty() => Ok(ImagePayload::Remote(url)),
        _ => Err(GenerationError::NoData),
    }
}

/// OpenAI image generation with a safe-prompt rewrite in front
pub struct OpenAiImageGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    prompt_model: String,
    image_model: String,
    media_dir: PathBuf,
}

impl OpenAiImageGenerator {
    pub fn new(
        config: &OpenAiConfig,
        media_dir: PathBuf,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            prompt_model: config.prompt_model.clone(),
            image_model: config.image_model.clone(),
            media_dir,
        })
    }

    async fn post(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, GenerationError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api(format!("HTTP {status}: {detail}")));
        }
        Ok(response)
    }

    /// Rewrites the sentence into something an image model will accept
    async fn safe_prompt(&self, sentence: &str) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.prompt_model,
            "messages": [
                { "role": "system", "content": SAFE_PROMPT_SYSTEM },
                { "role": "user", "content": safe_prompt_request(sentence) },
            ],
            "temperature": 0.3,
            "max_tokens": 100,
        });

        let chat: ChatResponse = self
            .post("chat/completions", body)
            .await?
            .json()
            .await
            .map_err(|e| GenerationError::Api(format!("Failed to parse response: {e}")))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GenerationError::Api("No prompt in response".to_string()))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, GenerationError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &str, word: &str) -> Result<String, GenerationError> {
        let safe = self.safe_prompt(prompt).await?;
        tracing::debug!("Image prompt for '{}': {}", word, safe);

        let body = json!({
            "model": self.image_model,
            "prompt": illustration_prompt(&safe),
            "size": "1024x1024",
            "quality": "auto",
            "n": 1,
        });

        let images: ImagesResponse = self
            .post("images/generations", body)
            .await?
            .json()
            .await
            .map_err(|e| GenerationError::Api(format!("Failed to parse response: {e}")))?;

        let bytes = match payload(images)? {
            ImagePayload::Inline(bytes) => bytes,
            ImagePayload::Remote(url) => self.download(&url).await?,
        };

        let file_name = image_file_name(word);
        save(&self.media_dir, &file_name, &bytes).await?;
        Ok(image_ref(&file_name))
    }
}
