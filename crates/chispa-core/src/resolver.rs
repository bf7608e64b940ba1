//! Meaning resolution.
//!
//! A lookup attempt is an explicit [`ResolverState`] value moved through a
//! loop: `Lookup → Present → Selected | Retry → Lookup | Abandoned`. Every
//! transition is a plain function of the current state and one input, so
//! programmatic callers can drive it without a terminal.

use std::sync::Arc;

use chispa_types::{CardEvent, Language, WordLookupResult, WordMeaning};

use crate::error::AbandonReason;
use crate::services::{ChoiceRequest, Dictionary, Interaction};

/// A decision taken while meanings are presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Take the only meaning
    Accept,
    /// 1-based meaning index
    Pick(usize),
    /// Look the word up again with an extra hint
    Retry(String),
    Skip,
    Interrupt,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChoiceError {
    #[error("enter 1-{count}")]
    OutOfRange { index: usize, count: usize },

    #[error("several meanings found, pick one by number")]
    Ambiguous,

    #[error("skipping is not available here")]
    SkipUnavailable,

    #[error("no meanings are being presented")]
    NotPresenting,
}

#[derive(Debug)]
pub enum ResolverState {
    Lookup {
        context: Option<String>,
    },
    Present {
        result: WordLookupResult,
        context: Option<String>,
    },
    Retry {
        context: Option<String>,
        hint: String,
    },
    Selected {
        /// Normalized spelling to put on the card
        word: String,
        meaning: WordMeaning,
    },
    Abandoned(AbandonReason),
}

impl ResolverState {
    pub fn start(context: Option<String>) -> Self {
        ResolverState::Lookup {
            context: context.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Enter the presenting state for a lookup result.
    ///
    /// A result without meanings abandons the word. A result without a
    /// normalized spelling keeps the spelling that was looked up.
    pub fn present(input_word: &str, mut result: WordLookupResult, context: Option<String>) -> Self {
        if result.meanings.is_empty() {
            return ResolverState::Abandoned(AbandonReason::NoMeanings);
        }
        if result.word.trim().is_empty() {
            result.word = input_word.to_string();
        }
        ResolverState::Present { result, context }
    }

    pub fn lookup_result(&self) -> Option<&WordLookupResult> {
        match self {
            ResolverState::Present { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&str> {
        match self {
            ResolverState::Lookup { context }
            | ResolverState::Present { context, .. }
            | ResolverState::Retry { context, .. } => context.as_deref(),
            _ => None,
        }
    }

    /// Apply one decision to a presenting state
    pub fn apply(&self, choice: Choice, allow_skip: bool) -> Result<ResolverState, ChoiceError> {
        let ResolverState::Present { result, context } = self else {
            return Err(ChoiceError::NotPresenting);
        };
        let count = result.meanings.len();

        match choice {
            Choice::Accept if count == 1 => Ok(selected(result, 1)),
            Choice::Accept => Err(ChoiceError::Ambiguous),
            Choice::Pick(index) if (1..=count).contains(&index) => Ok(selected(result, index)),
            Choice::Pick(index) => Err(ChoiceError::OutOfRange { index, count }),
            Choice::Retry(hint) => Ok(ResolverState::Retry {
                context: context.clone(),
                hint,
            }),
            Choice::Skip if allow_skip => Ok(ResolverState::Abandoned(AbandonReason::Skipped)),
            Choice::Skip => Err(ChoiceError::SkipUnavailable),
            Choice::Interrupt => Ok(ResolverState::Abandoned(AbandonReason::Interrupted)),
        }
    }

    /// Explicit retry for programmatic callers: same as choosing `Retry(hint)`
    pub fn retry(&self, hint: &str) -> Result<ResolverState, ChoiceError> {
        self.apply(Choice::Retry(hint.to_string()), false)
    }

    /// Move a `Retry` on to the next `Lookup` with the enlarged context.
    /// Other states are returned unchanged.
    pub fn advance(self) -> ResolverState {
        match self {
            ResolverState::Retry { context, hint } => ResolverState::Lookup {
                context: accumulate_context(context.as_deref(), &hint),
            },
            other => other,
        }
    }
}

fn selected(result: &WordLookupResult, index: usize) -> ResolverState {
    ResolverState::Selected {
        word: result.word.clone(),
        meaning: result.meanings[index - 1].clone(),
    }
}

/// `existing; hint`, or just `hint` when there is no prior context.
/// A blank hint leaves the context as it was.
pub fn accumulate_context(existing: Option<&str>, hint: &str) -> Option<String> {
    let hint = hint.trim();
    let existing = existing.map(str::trim).filter(|c| !c.is_empty());

    match (existing, hint.is_empty()) {
        (existing, true) => existing.map(str::to_string),
        (Some(existing), false) => Some(format!("{existing}; {hint}")),
        (None, false) => Some(hint.to_string()),
    }
}

/// A chosen meaning and the spelling the card should carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub word: String,
    pub meaning: WordMeaning,
}

/// Drives [`ResolverState`] against a dictionary and an [`Interaction`]
pub struct Resolver {
    dictionary: Arc<dyn Dictionary>,
    language: Language,
    allow_skip: bool,
}

impl Resolver {
    pub fn new(dictionary: Arc<dyn Dictionary>, language: Language) -> Self {
        Self {
            dictionary,
            language,
            allow_skip: false,
        }
    }

    /// Batch mode: let the user skip a word
    pub fn with_skip(mut self, allow_skip: bool) -> Self {
        self.allow_skip = allow_skip;
        self
    }

    /// One lookup, ending in `Present` or `Abandoned`
    pub async fn lookup(&self, word: &str, context: Option<String>) -> ResolverState {
        match self
            .dictionary
            .lookup(word, context.as_deref(), self.language)
            .await
        {
            Ok(result) => {
                tracing::debug!("'{}': {} meaning(s)", word, result.meanings.len());
                ResolverState::present(word, result, context)
            }
            Err(e) => {
                tracing::warn!("Lookup of '{}' failed: {}", word, e);
                ResolverState::Abandoned(AbandonReason::Lookup(e))
            }
        }
    }

    /// Run the selection loop until a meaning is chosen or the word is abandoned
    pub async fn resolve(
        &self,
        word: &str,
        hint: Option<String>,
        interaction: &mut dyn Interaction,
    ) -> Result<Selection, AbandonReason> {
        let mut state = ResolverState::start(hint);

        loop {
            state = match state {
                ResolverState::Lookup { context } => {
                    interaction.emit(CardEvent::LookingUp {
                        word: word.to_string(),
                        context: context.clone(),
                        language: self.language,
                    });
                    let next = self.lookup(word, context).await;
                    match &next {
                        ResolverState::Abandoned(AbandonReason::Lookup(e)) => {
                            interaction.emit(CardEvent::LookupFailed {
                                word: word.to_string(),
                                reason: e.to_string(),
                            })
                        }
                        ResolverState::Abandoned(AbandonReason::NoMeanings) => {
                            interaction.emit(CardEvent::NoMeanings {
                                word: word.to_string(),
                            })
                        }
                        _ => {}
                    }
                    next
                }
                ResolverState::Present { result, context } => {
                    let choice = interaction
                        .choose(ChoiceRequest {
                            word,
                            result: &result,
                            language: self.language,
                            allow_skip: self.allow_skip,
                        })
                        .await;

                    let present = ResolverState::Present { result, context };
                    match present.apply(choice, self.allow_skip) {
                        Ok(next) => next,
                        Err(e) => {
                            tracing::debug!("Rejected choice for '{}': {}", word, e);
                            present
                        }
                    }
                }
                retry @ ResolverState::Retry { .. } => {
                    let next = retry.advance();
                    if let Some(context) = next.context() {
                        interaction.emit(CardEvent::Retrying {
                            context: context.to_string(),
                        });
                    }
                    next
                }
                ResolverState::Selected { word, meaning } => {
                    return Ok(Selection { word, meaning });
                }
                ResolverState::Abandoned(reason) => return Err(reason),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn meaning(definition: &str) -> WordMeaning {
        WordMeaning {
            definition: definition.to_string(),
            example: format!("Example for {definition}"),
            ..Default::default()
        }
    }

    fn result(word: &str, definitions: &[&str]) -> WordLookupResult {
        WordLookupResult {
            word: word.to_string(),
            meanings: definitions.iter().map(|d| meaning(d)).collect(),
        }
    }

    #[test]
    fn empty_meanings_abandon() {
        let state = ResolverState::present("banco", result("banco", &[]), None);
        assert!(matches!(
            state,
            ResolverState::Abandoned(AbandonReason::NoMeanings)
        ));
    }

    #[test]
    fn empty_meanings_can_never_be_selected() {
        let state = ResolverState::present("banco", result("banco", &[]), None);
        for choice in [Choice::Accept, Choice::Pick(1), Choice::Pick(0)] {
            assert_eq!(
                state.apply(choice, true).unwrap_err(),
                ChoiceError::NotPresenting
            );
        }
    }

    #[test]
    fn single_meaning_accepts() {
        let state = ResolverState::present("vispera", result("víspera", &["eve"]), None);
        match state.apply(Choice::Accept, false).unwrap() {
            ResolverState::Selected { word, meaning } => {
                assert_eq!(word, "víspera");
                assert_eq!(meaning.definition, "eve");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn ambiguous_result_rejects_accept() {
        let state = ResolverState::present("banco", result("banco", &["bank", "bench"]), None);
        assert_eq!(
            state.apply(Choice::Accept, false).unwrap_err(),
            ChoiceError::Ambiguous
        );
    }

    #[test]
    fn pick_is_bounds_checked() {
        let state = ResolverState::present("banco", result("banco", &["bank", "bench"]), None);

        assert_eq!(
            state.apply(Choice::Pick(0), false).unwrap_err(),
            ChoiceError::OutOfRange { index: 0, count: 2 }
        );
        assert_eq!(
            state.apply(Choice::Pick(3), false).unwrap_err(),
            ChoiceError::OutOfRange { index: 3, count: 2 }
        );
        match state.apply(Choice::Pick(2), false).unwrap() {
            ResolverState::Selected { meaning, .. } => assert_eq!(meaning.definition, "bench"),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn skip_needs_permission() {
        let state = ResolverState::present("banco", result("banco", &["bank"]), None);
        assert_eq!(
            state.apply(Choice::Skip, false).unwrap_err(),
            ChoiceError::SkipUnavailable
        );
        assert!(matches!(
            state.apply(Choice::Skip, true).unwrap(),
            ResolverState::Abandoned(AbandonReason::Skipped)
        ));
    }

    #[test]
    fn missing_normalized_word_keeps_input_spelling() {
        let state = ResolverState::present("cafe", result("  ", &["coffee"]), None);
        assert_eq!(state.lookup_result().unwrap().word, "cafe");
    }

    #[test]
    fn retry_accumulates_context_monotonically() {
        let state = ResolverState::present(
            "banco",
            result("banco", &["bank"]),
            Some("park".to_string()),
        );
        let next = state.retry("seat").unwrap().advance();
        assert_eq!(next.context(), Some("park; seat"));

        let context = next.context().map(String::from);
        let again = ResolverState::present("banco", result("banco", &["bench"]), context)
            .retry("wooden")
            .unwrap()
            .advance();
        assert_eq!(again.context(), Some("park; seat; wooden"));
    }

    #[test]
    fn accumulate_handles_empty_sides() {
        assert_eq!(accumulate_context(None, "slang"), Some("slang".to_string()));
        assert_eq!(accumulate_context(Some(""), "slang"), Some("slang".to_string()));
        assert_eq!(accumulate_context(Some("formal"), "  "), Some("formal".to_string()));
        assert_eq!(accumulate_context(None, ""), None);
    }

    #[test]
    fn start_drops_blank_context() {
        assert_eq!(ResolverState::start(Some("  ".to_string())).context(), None);
        assert_eq!(
            ResolverState::start(Some("cooking".to_string())).context(),
            Some("cooking")
        );
    }
}
