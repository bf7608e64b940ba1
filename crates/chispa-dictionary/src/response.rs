use chispa_core::LookupError;
use chispa_core::cloze::split_marked;
use chispa_types::{Language, WordLookupResult, WordMeaning};
use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Deserialize)]
pub(crate) struct ChatMessage {
    pub content: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawLookup {
    word: Option<String>,
    meanings: Vec<RawMeaning>,
}

/// Both key sets are accepted; the language decides which one is read
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawMeaning {
    definition: Option<String>,
    part_of_speech: Option<String>,
    example: Option<String>,
    example_blanked: Option<String>,
    example_spanish: Option<String>,
    example_spanish_blanked: Option<String>,
    example_english: Option<String>,
}

impl RawMeaning {
    fn into_meaning(self, language: Language) -> WordMeaning {
        let (example, blanked, translation) = if language.is_english() {
            (self.example, self.example_blanked, None)
        } else {
            (
                self.example_spanish,
                self.example_spanish_blanked,
                self.example_english,
            )
        };
        let example = example.unwrap_or_default();
        let blanked = blanked.unwrap_or_default();

        // Marked span wins over the model's own blanking
        let (example, example_blanked) = match split_marked(&example) {
            (full, marked) if full != example => (full, marked),
            _ => (example, blanked),
        };

        WordMeaning {
            definition: self.definition.unwrap_or_default(),
            part_of_speech: self.part_of_speech.unwrap_or_default(),
            example,
            example_blanked,
            translation: split_marked(&translation.unwrap_or_default()).0,
        }
    }
}

/// Map the JSON body of a lookup answer.
///
/// A missing or blank `word` keeps the spelling that was looked up.
pub fn parse_lookup(
    word: &str,
    content: &str,
    language: Language,
) -> Result<WordLookupResult, LookupError> {
    let raw: RawLookup = serde_json::from_str(content)
        .map_err(|e| LookupError::InvalidResponse(format!("Failed to parse lookup JSON: {e}")))?;

    let normalized = raw
        .word
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| word.to_string());

    Ok(WordLookupResult {
        word: normalized,
        meanings: raw
            .meanings
            .into_iter()
            .map(|m| m.into_meaning(language))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn markers_are_stripped_from_translation() {
        let content = r#"{
            "word": "banco",
            "meanings": [{
                "definition": "bench",
                "part_of_speech": "noun",
                "example_spanish": "Me senté en el **banco** del parque.",
                "example_english": "I sat on the park **bench**."
            }]
        }"#;

        let result = parse_lookup("banco", content, Language::Spanish).unwrap();

        assert_eq!(result.meanings[0].translation, "I sat on the park bench.");
        assert_eq!(result.meanings[0].example, "Me senté en el banco del parque.");
    }

    #[test]
    fn spanish_keys_are_mapped() {
        let content = r#"{
            "word": "víspera",
            "meanings": [{
                "definition": "eve",
                "part_of_speech": "noun",
                "example_spanish": "La víspera de Navidad cenamos juntos.",
                "example_spanish_blanked": "La ___ de Navidad cenamos juntos.",
                "example_english": "On Christmas Eve we have dinner together."
            }]
        }"#;

        let result = parse_lookup("vispera", content, Language::Spanish).unwrap();

        assert_eq!(result.word, "víspera");
        assert_eq!(
            result.meanings,
            vec![WordMeaning {
                definition: "eve".to_string(),
                part_of_speech: "noun".to_string(),
                example: "La víspera de Navidad cenamos juntos.".to_string(),
                example_blanked: "La ___ de Navidad cenamos juntos.".to_string(),
                translation: "On Christmas Eve we have dinner together.".to_string(),
            }]
        );
    }

    #[test]
    fn english_keys_are_mapped_without_translation() {
        let content = r#"{
            "word": "serendipity",
            "meanings": [{
                "definition": "a happy accident",
                "part_of_speech": "noun",
                "example": "Finding that café was pure serendipity.",
                "example_blanked": "Finding that café was pure ___.",
                "example_english": "ignored"
            }]
        }"#;

        let result = parse_lookup("serendipity", content, Language::English).unwrap();
        let meaning = &result.meanings[0];

        assert_eq!(meaning.example, "Finding that café was pure serendipity.");
        assert_eq!(meaning.example_blanked, "Finding that café was pure ___.");
        assert_eq!(meaning.translation, "");
    }

    #[test]
    fn markers_override_model_blanking() {
        let content = r#"{
            "word": "echar de menos",
            "meanings": [{
                "definition": "to miss",
                "example_spanish": "Te **echo de menos** cada día.",
                "example_spanish_blanked": "Te ___ de menos cada día.",
                "example_english": "I miss you every day."
            }]
        }"#;

        let result = parse_lookup("echar de menos", content, Language::Spanish).unwrap();
        let meaning = &result.meanings[0];

        assert_eq!(meaning.example, "Te echo de menos cada día.");
        assert_eq!(meaning.example_blanked, "Te ___ ___ ___ cada día.");
        assert_eq!(meaning.part_of_speech, "");
    }

    #[test]
    fn missing_word_keeps_input_spelling() {
        let content = r#"{"meanings": [{"definition": "bank"}]}"#;
        let result = parse_lookup("banco", content, Language::Spanish).unwrap();
        assert_eq!(result.word, "banco");

        let content = r#"{"word": "  ", "meanings": []}"#;
        let result = parse_lookup("banco", content, Language::Spanish).unwrap();
        assert_eq!(result.word, "banco");
        assert!(result.meanings.is_empty());
    }

    #[test]
    fn non_json_is_invalid_response() {
        let err = parse_lookup("banco", "Sorry, I cannot help", Language::Spanish).unwrap_err();
        assert!(matches!(err, LookupError::InvalidResponse(_)));
    }
}
