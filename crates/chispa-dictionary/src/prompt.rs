use chispa_core::cloze::{MARKER, blank_pattern};
use chispa_types::Language;

pub const SYSTEM_PROMPT: &str =
    "You are a Spanish-English dictionary. Return only valid JSON.";

fn context_instruction(context: Option<&str>) -> String {
    match context {
        Some(context) => format!(
            "The user encountered this word in the following context: \"{context}\"\n\
             PRIORITIZE meanings that match this context. Put the most relevant meaning first.\n\
             If the context clearly points to one meaning, you can return just that one meaning."
        ),
        None => "Return the most common/useful meanings (up to 5, but fewer if the word has \
                 limited meanings).\nOrder by frequency of use (most common first)."
            .to_string(),
    }
}

fn blanking_rules(word: &str) -> String {
    let count = word.split_whitespace().count();
    let pattern = blank_pattern(word);

    format!(
        "Marking and blanking:\n\
         - In the example sentence, wrap the looked-up phrase as it appears in the sentence in {MARKER}, e.g. \"El {MARKER}banco{MARKER} es grande\"\n\
         - The phrase being looked up is: \"{word}\" ({count} word(s))\n\
         - In the blanked sentence you MUST blank it as: {pattern}\n\
         - Blank the ENTIRE phrase, not just part of it\n\
         - For verbs, blank the CONJUGATED form as it appears in the sentence\n\
         - Do NOT leave any part of the phrase visible in the blanked version"
    )
}

const STYLE_RULES: &str = "Important:\n\
- Include slang, vulgar, or colloquial meanings if commonly used; be direct, learners need exact meanings\n\
- NEVER censor or blank words in English translations\n\
- Sentence complexity should match the word: basic vocabulary can have simple sentences, advanced vocabulary, idioms and literary words need rich, authentic ones\n\
- Handle idioms, phrasal verbs and multi-word expressions naturally\n\
- Only return the JSON, no other text";

/// User prompt for one lookup
pub fn lookup_prompt(word: &str, context: Option<&str>, language: Language) -> String {
    let context = context_instruction(context);
    let blanking = blanking_rules(word);

    match language {
        Language::English => format!(
            "Look up the English word/phrase \"{word}\" and provide its meanings.\n\n\
             {context}\n\n\
             For each meaning, provide:\n\
             1. The definition (clear explanation of the meaning)\n\
             2. Part of speech (noun, verb, adjective, etc.)\n\
             3. An example sentence in English using this word with this specific meaning\n\
             4. The same sentence with the word/phrase blanked out\n\n\
             Return as JSON with this exact structure:\n\
             {{\"word\": \"correctly spelled word\", \"meanings\": [{{\"definition\": \"...\", \
             \"part_of_speech\": \"noun\", \"example\": \"...\", \"example_blanked\": \"...\"}}]}}\n\n\
             The \"word\" field must hold the CORRECTLY SPELLED word (e.g. \"cafe\" -> \"café\").\n\n\
             {blanking}\n\n\
             {STYLE_RULES}"
        ),
        Language::Spanish => format!(
            "Look up the Spanish word/phrase \"{word}\" and provide its meanings.\n\n\
             {context}\n\n\
             For each meaning, provide:\n\
             1. The English translation/definition\n\
             2. Part of speech (noun, verb, adjective, etc.)\n\
             3. An example sentence in Spanish using this word with this specific meaning\n\
             4. The same Spanish sentence with the word/phrase blanked out\n\
             5. The English translation of that example sentence\n\n\
             Return as JSON with this exact structure:\n\
             {{\"word\": \"correctly spelled word with proper accents\", \"meanings\": [{{\"definition\": \"...\", \
             \"part_of_speech\": \"noun\", \"example_spanish\": \"...\", \"example_spanish_blanked\": \"...\", \
             \"example_english\": \"...\"}}]}}\n\n\
             The \"word\" field must hold the CORRECTLY SPELLED word with proper accent marks \
             (e.g. \"vispera\" -> \"víspera\").\n\n\
             {blanking}\n\n\
             {STYLE_RULES}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_prioritized_when_given() {
        let prompt = lookup_prompt("banco", Some("sitting in the park"), Language::Spanish);
        assert!(prompt.contains("\"sitting in the park\""));
        assert!(prompt.contains("PRIORITIZE"));
        assert!(!prompt.contains("up to 5"));
    }

    #[test]
    fn multi_word_phrase_gets_matching_blank_pattern() {
        let prompt = lookup_prompt("echar de menos", None, Language::Spanish);
        assert!(prompt.contains("(3 word(s))"));
        assert!(prompt.contains("___ ___ ___"));
        assert!(prompt.contains("up to 5"));
    }

    #[test]
    fn language_selects_json_keys() {
        let spanish = lookup_prompt("banco", None, Language::Spanish);
        assert!(spanish.contains("example_spanish_blanked"));
        assert!(spanish.contains("example_english"));

        let english = lookup_prompt("serendipity", None, Language::English);
        assert!(english.contains("\"example_blanked\""));
        assert!(!english.contains("example_spanish"));
    }

    #[test]
    fn marker_instruction_is_present() {
        let prompt = lookup_prompt("banco", None, Language::English);
        assert!(prompt.contains("**banco**"));
    }
}
