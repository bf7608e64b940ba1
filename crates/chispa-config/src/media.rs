use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, EnvLookup};

const LOCAL_MEDIA_DIR: &str = "anki_media";

/// Where generated images and audio are written
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct MediaConfig {
    /// Explicit media folder, skips Anki profile discovery
    pub dir: Option<PathBuf>,
    /// Anki profile whose `collection.media` should be used
    pub anki_profile: Option<String>,
}

impl MediaConfig {
    pub fn from_lookup(env: &EnvLookup) -> Self {
        Self {
            dir: env("CHISPA_MEDIA_DIR").map(PathBuf::from),
            anki_profile: env("ANKI_PROFILE"),
        }
    }

    /// Resolve the media folder, creating the local fallback when needed.
    ///
    /// Order: explicit dir, then `<data dir>/Anki2/<profile>/collection.media`,
    /// then `./anki_media`.
    pub fn resolve_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.dir {
            fs::create_dir_all(dir).map_err(|source| ConfigError::MediaDir {
                path: dir.clone(),
                source,
            })?;
            return Ok(dir.clone());
        }

        if let Some(anki_root) = dirs::data_dir().map(|d| d.join("Anki2")) {
            if let Some(media) = find_collection_media(&anki_root, self.anki_profile.as_deref()) {
                tracing::debug!("Using Anki media folder {}", media.display());
                return Ok(media);
            }
        }

        let local = std::env::current_dir()
            .map(|cwd| cwd.join(LOCAL_MEDIA_DIR))
            .unwrap_or_else(|_| PathBuf::from(LOCAL_MEDIA_DIR));
        fs::create_dir_all(&local).map_err(|source| ConfigError::MediaDir {
            path: local.clone(),
            source,
        })?;
        tracing::warn!(
            "Anki media folder not found, writing media to {}",
            local.display()
        );
        Ok(local)
    }
}

/// Find `collection.media` under an Anki root folder.
///
/// A named profile wins when it exists; otherwise the first profile
/// (alphabetically, hidden folders ignored) that has a media folder.
pub fn find_collection_media(anki_root: &Path, profile: Option<&str>) -> Option<PathBuf> {
    if let Some(profile) = profile {
        let media = anki_root.join(profile).join("collection.media");
        if media.is_dir() {
            return Some(media);
        }
        tracing::warn!("Anki profile '{profile}' has no collection.media, searching others");
    }

    let mut profiles: Vec<PathBuf> = fs::read_dir(anki_root)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.'))
        })
        .collect();
    profiles.sort();

    profiles
        .into_iter()
        .map(|profile| profile.join("collection.media"))
        .find(|media| media.is_dir())
}
