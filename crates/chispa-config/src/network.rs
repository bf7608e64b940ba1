use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::EnvLookup;

/// Per-service request timeouts, applied at the HTTP client boundary
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub lookup_timeout_secs: u64,
    /// Image generation is slow; covers prompt rewrite and download separately
    pub image_timeout_secs: u64,
    pub audio_timeout_secs: u64,
    pub anki_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_secs: 60,
            image_timeout_secs: 120,
            audio_timeout_secs: 60,
            anki_timeout_secs: 10,
        }
    }
}

impl NetworkConfig {
    pub fn from_lookup(env: &EnvLookup) -> Self {
        let defaults = Self::default();
        let secs = |key: &str, default: u64| {
            env(key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        };

        Self {
            lookup_timeout_secs: secs("LOOKUP_TIMEOUT_SECS", defaults.lookup_timeout_secs),
            image_timeout_secs: secs("IMAGE_TIMEOUT_SECS", defaults.image_timeout_secs),
            audio_timeout_secs: secs("AUDIO_TIMEOUT_SECS", defaults.audio_timeout_secs),
            anki_timeout_secs: secs("ANKI_TIMEOUT_SECS", defaults.anki_timeout_secs),
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn audio_timeout(&self) -> Duration {
        Duration::from_secs(self.audio_timeout_secs)
    }

    pub fn anki_timeout(&self) -> Duration {
        Duration::from_secs(self.anki_timeout_secs)
    }
}
