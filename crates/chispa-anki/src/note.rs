use chispa_config::anki::AnkiConfig;
use chispa_types::Card;
use serde_json::{Value, json};

/// `addNote` params for a card, fields keyed by the configured note type
pub fn note_payload(card: &Card, deck: &str, anki: &AnkiConfig) -> Value {
    let names = &anki.fields;
    let mut fields = serde_json::Map::new();
    for (name, value) in [
        (&names.front_blank, &card.sentence_blank),
        (&names.front_picture, &card.image_ref),
        (&names.front_definition, &card.definition),
        (&names.back_word, &card.word),
        (&names.full_sentence, &card.sentence_full),
        (&names.extra_info, &card.audio_ref),
    ] {
        fields.insert(name.clone(), Value::String(value.clone()));
    }

    json!({
        "note": {
            "deckName": deck,
            "modelName": anki.note_type,
            "fields": fields,
            "options": { "allowDuplicate": false },
            "tags": [anki.tag],
        }
    })
}
