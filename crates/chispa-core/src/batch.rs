use std::collections::HashSet;
use std::path::Path;

use chispa_types::{BatchItem, CardEvent, Language, Outcome};

use crate::checkpoint::{BatchFile, write_atomically};
use crate::error::{AbandonReason, BatchError};
use crate::orchestrator::Orchestrator;
use crate::services::Interaction;

/// Words created and failed in one run, file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub created: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchSummary {
    fn from_items(items: &[BatchItem]) -> Self {
        let words = |outcome| {
            items
                .iter()
                .filter(|item| item.outcome == outcome)
                .map(|item| item.word.clone())
                .collect()
        };

        Self {
            created: words(Outcome::Created),
            failed: words(Outcome::Failed),
        }
    }

    /// Every word made it into the deck
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Orchestrator {
    /// Process every word of a batch file, then drop the created ones from it.
    ///
    /// Words are handled one at a time in file order. The file is rewritten
    /// once, after the last word; an interrupt stops the run without touching it.
    pub async fn run_batch(
        &self,
        path: &Path,
        language: Language,
        interaction: &mut dyn Interaction,
    ) -> Result<BatchSummary, BatchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BatchError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if !self.maker.store_available().await {
            return Err(BatchError::StoreUnavailable);
        }

        let file = BatchFile::parse(&content);
        let mut items = file.items();
        if items.is_empty() {
            return Err(BatchError::NoWords);
        }

        tracing::info!("Processing {} word(s) from {}", items.len(), path.display());
        interaction.emit(CardEvent::BatchStarted {
            count: items.len(),
            language,
        });

        let resolver = self.resolver(language).with_skip(true);

        for idx in 0..items.len() {
            let item = &mut items[idx];
            interaction.emit(CardEvent::BatchWord {
                word: item.word.clone(),
                hint: item.hint.clone(),
            });

            let selection = match resolver
                .resolve(&item.word, item.hint.clone(), interaction)
                .await
            {
                Ok(selection) => selection,
                Err(AbandonReason::Interrupted) => {
                    tracing::warn!("Batch interrupted at '{}'", item.word);
                    let summary = BatchSummary::from_items(&items);
                    return Err(BatchError::Interrupted {
                        created: summary.created,
                    });
                }
                Err(reason) => {
                    if matches!(reason, AbandonReason::Skipped) {
                        interaction.emit(CardEvent::WordSkipped {
                            word: item.word.clone(),
                        });
                    }
                    tracing::info!("'{}' abandoned: {}", item.word, reason);
                    item.outcome = Outcome::Failed;
                    continue;
                }
            };

            item.outcome = match self
                .maker
                .create(&item.word, &selection, language, interaction)
                .await
            {
                Ok(_) => Outcome::Created,
                Err(_) => Outcome::Failed,
            };
        }

        let summary = BatchSummary::from_items(&items);

        if !summary.created.is_empty() {
            let created: HashSet<String> = summary.created.iter().cloned().collect();
            let rewritten = file.render_without(&created);
            let removed = file
                .lines()
                .iter()
                .filter(|line| line.word().is_some_and(|w| created.contains(w)))
                .count();

            if let Err(source) = write_atomically(path, &rewritten).await {
                return Err(BatchError::Checkpoint {
                    path: path.to_path_buf(),
                    source,
                    summary,
                });
            }
            tracing::info!("Checkpointed {}: {} line(s) removed", path.display(), removed);
            interaction.emit(CardEvent::Checkpointed { removed });
        }

        Ok(summary)
    }
}
