//! Collaborators the orchestrator drives.
//!
//! Network implementations live in the adapter crates; tests use fakes.

use async_trait::async_trait;
use chispa_types::{Card, CardEvent, Language, WordLookupResult};

use crate::error::{GenerationError, LookupError, StoreError};
use crate::resolver::Choice;

/// Dictionary lookup service
#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Meanings ordered by relevance, hint-matching meanings first when `context` is given
    async fn lookup(
        &self,
        word: &str,
        context: Option<&str>,
        language: Language,
    ) -> Result<WordLookupResult, LookupError>;
}

/// Image generation service
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns an opaque reference to embed in the note
    async fn generate(&self, prompt: &str, word: &str) -> Result<String, GenerationError>;
}

/// Text-to-speech service
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Returns an opaque reference to embed in the note
    async fn generate(&self, text: &str, word: &str) -> Result<String, GenerationError>;
}

/// Flashcard store client
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn is_available(&self) -> bool;

    /// Insert a note, returning its id
    async fn add_note(&self, card: &Card, deck: &str) -> Result<u64, StoreError>;
}

/// What the user is asked to decide on
#[derive(Debug, Clone, Copy)]
pub struct ChoiceRequest<'a> {
    pub word: &'a str,
    pub result: &'a WordLookupResult,
    pub language: Language,
    /// Batch mode lets the user skip a word
    pub allow_skip: bool,
}

/// The user side of the orchestrator: decisions in, progress out
#[async_trait]
pub trait Interaction: Send {
    async fn choose(&mut self, request: ChoiceRequest<'_>) -> Choice;

    fn emit(&mut self, event: CardEvent);
}
