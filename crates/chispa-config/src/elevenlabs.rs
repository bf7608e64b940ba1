use serde::{Deserialize, Serialize};

use crate::EnvLookup;

fn default_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    "iLNdboCfbjKNDLRgl0GZ".to_string()
}

fn default_model_id() -> String {
    // Best results for Spanish
    "eleven_multilingual_v2".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            voice_id: default_voice_id(),
            model_id: default_model_id(),
        }
    }
}

impl ElevenLabsConfig {
    pub fn from_lookup(env: &EnvLookup) -> Self {
        let defaults = Self::default();

        Self {
            api_key: env("ELEVENLABS_API_KEY").unwrap_or_default(),
            base_url: env("ELEVENLABS_BASE_URL").unwrap_or(defaults.base_url),
            voice_id: env("ELEVENLABS_VOICE_ID").unwrap_or(defaults.voice_id),
            model_id: env("ELEVENLABS_MODEL_ID").unwrap_or(defaults.model_id),
        }
    }
}
