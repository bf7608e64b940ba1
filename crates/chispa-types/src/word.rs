use std::fmt;

use serde::{Deserialize, Serialize};

/// One candidate sense of a looked-up word
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordMeaning {
    pub definition: String,
    /// noun, verb, adjective... may be empty
    pub part_of_speech: String,
    /// Full example sentence in the target language
    pub example: String,
    /// Example with the headword replaced by `___` tokens
    pub example_blanked: String,
    /// English rendering of the example, empty for English targets
    pub translation: String,
}

impl fmt::Display for WordMeaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.part_of_speech.is_empty() {
            write!(f, "{}", self.definition)
        } else {
            write!(f, "{} ({})", self.definition, self.part_of_speech)
        }
    }
}

/// Outcome of one dictionary query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordLookupResult {
    /// Normalized spelling (accents, casing) as returned by the service
    pub word: String,
    /// Relevance order
    pub meanings: Vec<WordMeaning>,
}

impl WordLookupResult {
    pub fn is_ambiguous(&self) -> bool {
        self.meanings.len() > 1
    }

    /// 1-based accessor matching what the user types
    pub fn meaning(&self, index: usize) -> Option<&WordMeaning> {
        index.checked_sub(1).and_then(|i| self.meanings.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meaning(definition: &str, pos: &str) -> WordMeaning {
        WordMeaning {
            definition: definition.to_string(),
            part_of_speech: pos.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn display_omits_empty_part_of_speech() {
        assert_eq!(meaning("bank", "noun").to_string(), "bank (noun)");
        assert_eq!(meaning("bench", "").to_string(), "bench");
    }

    #[test]
    fn meaning_is_one_based() {
        let result = WordLookupResult {
            word: "banco".to_string(),
            meanings: vec![meaning("bank", "noun"), meaning("bench", "noun")],
        };

        assert!(result.is_ambiguous());
        assert_eq!(result.meaning(1).unwrap().definition, "bank");
        assert_eq!(result.meaning(2).unwrap().definition, "bench");
        assert!(result.meaning(0).is_none());
        assert!(result.meaning(3).is_none());
    }
}
