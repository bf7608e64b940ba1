use serde::{Deserialize, Serialize};

use crate::EnvLookup;

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_prompt_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_image_model() -> String {
    "gpt-image-1".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Dictionary lookups
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Rewrites example sentences into safe image prompts
    #[serde(default = "default_prompt_model")]
    pub prompt_model: String,
    /// `gpt-image-1` or `dall-e-3`
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            prompt_model: default_prompt_model(),
            image_model: default_image_model(),
        }
    }
}

impl OpenAiConfig {
    pub fn from_lookup(env: &EnvLookup) -> Self {
        let defaults = Self::default();

        Self {
            api_key: env("OPENAI_API_KEY").unwrap_or_default(),
            base_url: env("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            chat_model: env("OPENAI_CHAT_MODEL").unwrap_or(defaults.chat_model),
            prompt_model: defaults.prompt_model,
            image_model: env("IMAGE_MODEL").unwrap_or(defaults.image_model),
        }
    }
}
