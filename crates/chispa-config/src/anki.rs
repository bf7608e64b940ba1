use chispa_types::Language;
use serde::{Deserialize, Serialize};

use crate::EnvLookup;

fn default_url() -> String {
    "http://localhost:8765".to_string()
}

fn default_deck_spanish() -> String {
    "esp".to_string()
}

fn default_deck_english() -> String {
    "en".to_string()
}

fn default_note_type() -> String {
    "All-Purpose".to_string()
}

fn default_tag() -> String {
    "chispa".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnkiConfig {
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_deck_spanish")]
    pub deck_spanish: String,
    #[serde(default = "default_deck_english")]
    pub deck_english: String,
    /// Note type (model) the fields below belong to
    #[serde(default = "default_note_type")]
    pub note_type: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub fields: NoteFieldNames,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            deck_spanish: default_deck_spanish(),
            deck_english: default_deck_english(),
            note_type: default_note_type(),
            tag: default_tag(),
            fields: NoteFieldNames::default(),
        }
    }
}

impl AnkiConfig {
    pub fn from_lookup(env: &EnvLookup) -> Self {
        let defaults = Self::default();

        Self {
            url: env("ANKI_CONNECT_URL").unwrap_or(defaults.url),
            deck_spanish: env("ANKI_DECK_SPANISH").unwrap_or(defaults.deck_spanish),
            deck_english: env("ANKI_DECK_ENGLISH").unwrap_or(defaults.deck_english),
            note_type: env("ANKI_NOTE_TYPE").unwrap_or(defaults.note_type),
            tag: defaults.tag,
            fields: defaults.fields,
        }
    }

    /// Deck that receives cards for the given language
    pub fn deck_for(&self, language: Language) -> &str {
        match language {
            Language::Spanish => &self.deck_spanish,
            Language::English => &self.deck_english,
        }
    }
}

/// Field names of the note type, keyed by the card part they hold
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NoteFieldNames {
    pub front_blank: String,
    pub front_picture: String,
    pub front_definition: String,
    pub back_word: String,
    pub full_sentence: String,
    pub extra_info: String,
}

impl Default for NoteFieldNames {
    fn default() -> Self {
        Self {
            front_blank: "Front (Example with word blanked out or missing)".to_string(),
            front_picture: "Front (Picture)".to_string(),
            front_definition: "Front (Definitions, base word, etc.)".to_string(),
            back_word: "Back (a single word/phrase, no context)".to_string(),
            full_sentence: "- The full sentence (no words blanked out)".to_string(),
            extra_info: "- Extra Info (Pronunciation, personal connections, conjugations, etc)"
                .to_string(),
        }
    }
}
