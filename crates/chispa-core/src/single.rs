use chispa_types::{Language, split_entry};

use crate::error::AddError;
use crate::orchestrator::Orchestrator;
use crate::resolver::accumulate_context;
use crate::services::Interaction;

/// A card created by the single-word flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Normalized spelling on the card
    pub word: String,
    pub deck: String,
    pub note_id: u64,
}

impl Orchestrator {
    /// Interactive single-word flow.
    ///
    /// `entry` may carry an inline hint (`banco | park`), which is appended
    /// to `context`.
    pub async fn add_word(
        &self,
        entry: &str,
        context: Option<&str>,
        language: Language,
        interaction: &mut dyn Interaction,
    ) -> Result<AddOutcome, AddError> {
        let (word, inline_hint) = split_entry(entry);
        if word.is_empty() {
            return Err(AddError::EmptyWord);
        }
        let context = match inline_hint {
            Some(hint) => accumulate_context(context, &hint),
            None => context.map(str::to_string),
        };

        if !self.maker.store_available().await {
            return Err(AddError::StoreUnavailable);
        }

        let selection = self
            .resolver(language)
            .resolve(&word, context, interaction)
            .await
            .map_err(AddError::Abandoned)?;

        let note_id = self
            .maker
            .create(&word, &selection, language, interaction)
            .await?;

        Ok(AddOutcome {
            word: selection.word,
            deck: self.deck_for(language).to_string(),
            note_id,
        })
    }
}
