use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::elevenlabs::ElevenLabsConfig;
use self::media::MediaConfig;
use self::network::NetworkConfig;
use self::openai::OpenAiConfig;

pub mod anki;
pub mod elevenlabs;
pub mod media;
pub mod network;
pub mod openai;

/// Key → value source; `env::var` in production, a map in tests
pub type EnvLookup = dyn Fn(&str) -> Option<String>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set in environment")]
    MissingVar(&'static str),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid AnkiConnect URL: {0}")]
    InvalidUrl(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot use media folder {path}: {source}")]
    MediaDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub elevenlabs: ElevenLabsConfig,
    pub anki: AnkiConfig,
    pub media: MediaConfig,
    pub network: NetworkConfig,
}

impl Config {
    /// Build the config from process environment (call `dotenvy::dotenv` first)
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(env: &EnvLookup) -> Self {
        Config {
            openai: OpenAiConfig::from_lookup(env),
            elevenlabs: ElevenLabsConfig::from_lookup(env),
            anki: AnkiConfig::from_lookup(env),
            media: MediaConfig::from_lookup(env),
            network: NetworkConfig::from_lookup(env),
        }
    }

    /// Load a JSON config file; API keys left empty there come from the environment
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_file_with(path, &process_env)
    }

    pub fn from_file_with(path: &Path, env: &EnvLookup) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if config.openai.api_key.is_empty() {
            config.openai.api_key = env("OPENAI_API_KEY").unwrap_or_default();
        }
        if config.elevenlabs.api_key.is_empty() {
            config.elevenlabs.api_key = env("ELEVENLABS_API_KEY").unwrap_or_default();
        }

        Ok(config)
    }

    /// Every problem at once, empty when the config is usable
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.openai.api_key.is_empty() {
            errors.push(ConfigError::MissingVar("OPENAI_API_KEY"));
        }
        if self.elevenlabs.api_key.is_empty() {
            errors.push(ConfigError::MissingVar("ELEVENLABS_API_KEY"));
        }
        if !self.anki.url.starts_with("http://") && !self.anki.url.starts_with("https://") {
            errors.push(ConfigError::InvalidUrl(self.anki.url.clone()));
        }
        if self.anki.deck_spanish.trim().is_empty() {
            errors.push(ConfigError::EmptyField {
                field: "ANKI_DECK_SPANISH",
            });
        }
        if self.anki.deck_english.trim().is_empty() {
            errors.push(ConfigError::EmptyField {
                field: "ANKI_DECK_ENGLISH",
            });
        }
        if self.anki.note_type.trim().is_empty() {
            errors.push(ConfigError::EmptyField {
                field: "ANKI_NOTE_TYPE",
            });
        }

        errors
    }
}

/// Set-but-empty variables count as unset
fn process_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
