use chispa_core::BatchSummary;
use chispa_types::{CardEvent, Language, StepOutcome, WordLookupResult};

/// Terminal line for a progress event; `None` for events printed elsewhere
pub fn render(event: &CardEvent) -> Option<String> {
    let line = match event {
        CardEvent::BatchStarted { count, language } => {
            format!("Processing {count} {} word(s)...", language.name())
        }
        CardEvent::BatchWord { word, hint: Some(hint) } => format!("\n--- {word} (hint: {hint}) ---"),
        CardEvent::BatchWord { word, hint: None } => format!("\n--- {word} ---"),
        CardEvent::LookingUp {
            word,
            context,
            language,
        } => match context {
            Some(context) => format!("Looking up ({}): {word} (context: {context})", language.name()),
            None => format!("Looking up ({}): {word}", language.name()),
        },
        CardEvent::LookupFailed { word, reason } => {
            format!("  ✗ Error looking up '{word}': {reason}")
        }
        CardEvent::NoMeanings { word } => format!("  ✗ No meanings found for '{word}'"),
        CardEvent::Retrying { context } => format!("\nRetrying with hint: {context}"),
        CardEvent::Normalized { from, to } => format!("\n  Normalized: {from} → {to}"),
        CardEvent::CreatingCard { word, definition } => {
            format!("\n  Creating card for: {word} = {definition}")
        }
        CardEvent::StepFinished { step, outcome } => match outcome {
            StepOutcome::Done => format!("  ✓ {step} generated"),
            StepOutcome::Skipped(reason) => format!("  ⚠ {step} skipped: {reason}"),
            StepOutcome::Failed(reason) => format!("  ⚠ {step} failed: {reason}"),
        },
        CardEvent::AddingNote => "  Adding to Anki...".to_string(),
        CardEvent::CardCreated { note_id, .. } => format!("  ✓ Card created (Note ID: {note_id})"),
        CardEvent::WordSkipped { .. } => "  Skipped".to_string(),
        CardEvent::WordFailed { reason, .. } => format!("  ✗ {reason}"),
        CardEvent::Checkpointed { .. } => return None,
    };
    Some(line)
}

/// Numbered meaning list shown before a choice
pub fn meanings(result: &WordLookupResult, language: Language) -> String {
    let mut out = format!("\nFound {} meaning(s):\n\n", result.meanings.len());
    for (i, meaning) in result.meanings.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, meaning));
        out.push_str(&format!("     Example: {}\n", meaning.example));
        if !language.is_english() {
            out.push_str(&format!("     Translation: {}\n", meaning.translation));
        }
        out.push('\n');
    }
    if result.meanings.len() == 1 {
        out.push_str("Only one meaning found.\n");
    }
    out
}

pub fn summary(summary: &BatchSummary) -> String {
    let mut out = format!(
        "\n--- Summary ---\nCreated: {}\nSkipped/Failed: {}",
        summary.created.len(),
        summary.failed.len()
    );
    if !summary.failed.is_empty() {
        out.push_str(&format!("\n\nFailed words: {}", summary.failed.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use chispa_types::{Step, WordMeaning};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn step_outcomes_are_marked() {
        let done = CardEvent::StepFinished {
            step: Step::Image,
            outcome: StepOutcome::Done,
        };
        let skipped = CardEvent::StepFinished {
            step: Step::Audio,
            outcome: StepOutcome::Skipped("sentence contains blanks".to_string()),
        };
        let failed = CardEvent::StepFinished {
            step: Step::Image,
            outcome: StepOutcome::Failed("request timed out".to_string()),
        };

        assert_eq!(render(&done).unwrap(), "  ✓ Image generated");
        assert_eq!(
            render(&skipped).unwrap(),
            "  ⚠ Audio skipped: sentence contains blanks"
        );
        assert_eq!(render(&failed).unwrap(), "  ⚠ Image failed: request timed out");
    }

    #[test]
    fn lookup_line_shows_context() {
        let event = CardEvent::LookingUp {
            word: "banco".to_string(),
            context: Some("park; seat".to_string()),
            language: Language::Spanish,
        };
        assert_eq!(
            render(&event).unwrap(),
            "Looking up (Spanish): banco (context: park; seat)"
        );
    }

    #[test]
    fn checkpoint_is_left_to_the_caller() {
        assert_eq!(render(&CardEvent::Checkpointed { removed: 2 }), None);
    }

    #[test]
    fn english_meanings_have_no_translation_line() {
        let result = WordLookupResult {
            word: "serendipity".to_string(),
            meanings: vec![WordMeaning {
                definition: "a happy accident".to_string(),
                part_of_speech: "noun".to_string(),
                example: "Pure serendipity.".to_string(),
                ..Default::default()
            }],
        };

        let text = meanings(&result, Language::English);
        assert!(text.contains("  1. a happy accident (noun)\n"));
        assert!(text.contains("     Example: Pure serendipity.\n"));
        assert!(!text.contains("Translation"));
        assert!(text.contains("Only one meaning found."));

        assert!(meanings(&result, Language::Spanish).contains("     Translation: \n"));
    }

    #[test]
    fn summary_lists_failed_words() {
        let text = summary(&BatchSummary {
            created: vec!["banco".to_string()],
            failed: vec!["vela".to_string(), "mesa".to_string()],
        });
        assert!(text.contains("Created: 1\nSkipped/Failed: 2"));
        assert!(text.ends_with("Failed words: vela, mesa"));
    }
}
