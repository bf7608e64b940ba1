use std::sync::Arc;

use chispa_config::anki::AnkiConfig;
use chispa_types::{CardEvent, Language, Step};

use crate::error::StoreError;
use crate::pipeline::Enricher;
use crate::resolver::Selection;
use crate::services::{CardStore, Interaction};

/// Turns a selected meaning into a stored note
pub struct CardMaker {
    enricher: Enricher,
    store: Arc<dyn CardStore>,
    anki: AnkiConfig,
}

impl CardMaker {
    pub fn new(enricher: Enricher, store: Arc<dyn CardStore>, anki: AnkiConfig) -> Self {
        Self {
            enricher,
            store,
            anki,
        }
    }

    pub async fn store_available(&self) -> bool {
        self.store.is_available().await
    }

    pub fn deck_for(&self, language: Language) -> &str {
        self.anki.deck_for(language)
    }

    /// Enrich and store one card.
    ///
    /// `input_word` is what the user typed; the card carries the selection's
    /// normalized spelling.
    pub async fn create(
        &self,
        input_word: &str,
        selection: &Selection,
        language: Language,
        interaction: &mut dyn Interaction,
    ) -> Result<u64, StoreError> {
        let word = selection.word.as_str();
        if word != input_word {
            interaction.emit(CardEvent::Normalized {
                from: input_word.to_string(),
                to: word.to_string(),
            });
        }

        interaction.emit(CardEvent::CreatingCard {
            word: word.to_string(),
            definition: selection.meaning.definition.clone(),
        });

        let enrichment = self
            .enricher
            .assemble(word, &selection.meaning, language)
            .await;
        for step in [Step::Image, Step::Audio] {
            interaction.emit(CardEvent::StepFinished {
                step,
                outcome: enrichment.outcome(step).clone(),
            });
        }

        interaction.emit(CardEvent::AddingNote);
        let deck = self.deck_for(language);

        match self.store.add_note(&enrichment.card, deck).await {
            Ok(note_id) => {
                tracing::info!("Added card to Anki: note_id={}", note_id);
                interaction.emit(CardEvent::CardCreated {
                    word: word.to_string(),
                    deck: deck.to_string(),
                    note_id,
                });
                Ok(note_id)
            }
            Err(e) => {
                tracing::error!("Failed to add card for '{}': {}", word, e);
                interaction.emit(CardEvent::WordFailed {
                    word: word.to_string(),
                    reason: format!("error adding card: {e}"),
                });
                Err(e)
            }
        }
    }
}
