//! Enrichment pipeline: image, audio, then note fields.
//!
//! Image and audio are optional and fail soft. Note assembly cannot fail, so
//! a selected meaning always yields a [`Card`].

use std::sync::Arc;

use chispa_types::{Card, Language, Step, StepOutcome, WordMeaning};

use crate::cloze::{blank_pattern, contains_blank, replace_with_blank};
use crate::progress::{ProgressMode, Spinner};
use crate::services::{ImageGenerator, Narrator};

/// HTML line break used by Anki note fields
const LINE_BREAK: &str = "<br>";

/// An assembled card plus what happened in each optional step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub card: Card,
    pub image: StepOutcome,
    pub audio: StepOutcome,
}

impl Enrichment {
    pub fn outcome(&self, step: Step) -> &StepOutcome {
        match step {
            Step::Image => &self.image,
            Step::Audio => &self.audio,
        }
    }
}

pub struct Enricher {
    images: Arc<dyn ImageGenerator>,
    narrator: Arc<dyn Narrator>,
    progress: ProgressMode,
}

impl Enricher {
    pub fn new(
        images: Arc<dyn ImageGenerator>,
        narrator: Arc<dyn Narrator>,
        progress: ProgressMode,
    ) -> Self {
        Self {
            images,
            narrator,
            progress,
        }
    }

    pub async fn assemble(&self, word: &str, meaning: &WordMeaning, language: Language) -> Enrichment {
        let (image_ref, image) = self.image_step(word, meaning, language).await;
        let (audio_ref, audio) = self.audio_step(word, meaning).await;
        let (sentence_blank, sentence_full) = note_sentences(word, meaning, language);

        Enrichment {
            card: Card {
                word: word.to_string(),
                definition: meaning.definition.clone(),
                sentence_blank,
                sentence_full,
                image_ref,
                audio_ref,
            },
            image,
            audio,
        }
    }

    async fn image_step(
        &self,
        word: &str,
        meaning: &WordMeaning,
        language: Language,
    ) -> (String, StepOutcome) {
        let prompt = image_prompt(meaning, language);

        let spinner = Spinner::start("Generating image...", self.progress);
        let result = self.images.generate(prompt, word).await;
        spinner.stop().await;

        match result {
            Ok(image_ref) => (image_ref, StepOutcome::Done),
            Err(e) => {
                tracing::warn!("Image step failed for '{}': {}", word, e);
                (String::new(), StepOutcome::Failed(e.to_string()))
            }
        }
    }

    async fn audio_step(&self, word: &str, meaning: &WordMeaning) -> (String, StepOutcome) {
        let text = &meaning.example;

        if contains_blank(text) {
            tracing::info!("Audio skipped for '{}': sentence contains blanks", word);
            return (
                String::new(),
                StepOutcome::Skipped("sentence contains blanks".to_string()),
            );
        }

        match self.narrator.generate(text, word).await {
            Ok(audio_ref) => (audio_ref, StepOutcome::Done),
            Err(e) => {
                tracing::warn!("Audio step failed for '{}': {}", word, e);
                (String::new(), StepOutcome::Failed(e.to_string()))
            }
        }
    }
}

/// English translation illustrates better for non-English targets
pub fn image_prompt(meaning: &WordMeaning, language: Language) -> &str {
    if language.is_english() {
        &meaning.example
    } else {
        &meaning.translation
    }
}

/// `(sentence_blank, sentence_full)` for the note.
///
/// The provided blanked example wins; otherwise the headword is blanked in
/// the example directly. Non-English targets get the translation appended.
pub fn note_sentences(word: &str, meaning: &WordMeaning, language: Language) -> (String, String) {
    let blanked = if meaning.example_blanked.is_empty() {
        replace_with_blank(&meaning.example, word, &blank_pattern(word))
    } else {
        meaning.example_blanked.clone()
    };

    if language.is_english() {
        (blanked, meaning.example.clone())
    } else {
        (
            format!("{blanked}{LINE_BREAK}{}", meaning.translation),
            format!("{}{LINE_BREAK}{}", meaning.example, meaning.translation),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn banco() -> WordMeaning {
        WordMeaning {
            definition: "bench".to_string(),
            part_of_speech: "noun".to_string(),
            example: "Me senté en el banco.".to_string(),
            example_blanked: "Me senté en el ___.".to_string(),
            translation: "I sat on the bench.".to_string(),
        }
    }

    #[test]
    fn non_english_appends_translation() {
        let (blank, full) = note_sentences("banco", &banco(), Language::Spanish);
        assert_eq!(blank, "Me senté en el ___.<br>I sat on the bench.");
        assert_eq!(full, "Me senté en el banco.<br>I sat on the bench.");
    }

    #[test]
    fn non_english_appends_single_word_translation() {
        let meaning = WordMeaning {
            example: "¡Salud!".to_string(),
            example_blanked: "¡___!".to_string(),
            translation: "Cheers".to_string(),
            ..banco()
        };
        let (blank, full) = note_sentences("salud", &meaning, Language::Spanish);
        assert_eq!(blank, "¡___!<br>Cheers");
        assert_eq!(full, "¡Salud!<br>Cheers");
    }

    #[test]
    fn english_has_no_translation_line() {
        let meaning = WordMeaning {
            definition: "a happy accident".to_string(),
            part_of_speech: "noun".to_string(),
            example: "Finding it was pure serendipity.".to_string(),
            example_blanked: "Finding it was pure ___.".to_string(),
            translation: String::new(),
        };
        let (blank, full) = note_sentences("serendipity", &meaning, Language::English);
        assert_eq!(blank, "Finding it was pure ___.");
        assert_eq!(full, "Finding it was pure serendipity.");
        assert!(!blank.contains(LINE_BREAK));
        assert!(!full.contains(LINE_BREAK));
    }

    #[test]
    fn missing_blanked_example_falls_back_to_replacement() {
        let meaning = WordMeaning {
            example: "Echo de menos mi casa.".to_string(),
            example_blanked: String::new(),
            ..banco()
        };
        let (blank, _) = note_sentences("echo de menos", &meaning, Language::Spanish);
        assert_eq!(blank, "___ ___ ___ mi casa.<br>I sat on the bench.");
    }

    #[test]
    fn image_prompt_depends_on_language() {
        let meaning = banco();
        assert_eq!(image_prompt(&meaning, Language::Spanish), "I sat on the bench.");
        assert_eq!(image_prompt(&meaning, Language::English), "Me senté en el banco.");
    }
}
