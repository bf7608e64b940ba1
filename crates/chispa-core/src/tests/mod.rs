//! Fakes for every collaborator plus flow-level tests


use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chispa_config::anki::AnkiConfig;
use chispa_types::{Card, CardEvent, Language, WordLookupResult, WordMeaning};

use crate::error::{GenerationError, LookupError, StoreError};
use crate::maker::CardMaker;
use crate::orchestrator::Orchestrator;
use crate::pipeline::Enricher;
use crate::progress::ProgressMode;
use crate::resolver::Choice;
use crate::services::{CardStore, ChoiceRequest, Dictionary, ImageGenerator, Interaction, Narrator};

type LookupFn =
    dyn Fn(&str, Option<&str>) -> Result<WordLookupResult, LookupError> + Send + Sync;

pub struct FakeDictionary {
    respond: Box<LookupFn>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeDictionary {
    pub fn new(
        respond: impl Fn(&str, Option<&str>) -> Result<WordLookupResult, LookupError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Every word has exactly one meaning, spelled as looked up
    pub fn single_meaning() -> Arc<Self> {
        Self::new(|word, _| Ok(lookup_result(word, &[word])))
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn looked_up(&self) -> Vec<String> {
        self.calls().into_iter().map(|(word, _)| word).collect()
    }
}

#[async_trait]
impl Dictionary for FakeDictionary {
    async fn lookup(
        &self,
        word: &str,
        context: Option<&str>,
        _language: Language,
    ) -> Result<WordLookupResult, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((word.to_string(), context.map(str::to_string)));
        (self.respond)(word, context)
    }
}

#[derive(Default)]
pub struct FakeMedia {
    fail: bool,
    extension: &'static str,
    pub calls: Mutex<Vec<String>>,
}

impl FakeMedia {
    pub fn images(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            extension: "png",
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn audio(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            extension: "mp3",
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn produce(&self, input: &str, word: &str) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(input.to_string());
        if self.fail {
            return Err(GenerationError::Api("service down".to_string()));
        }
        Ok(format!("chispa_{word}.{}", self.extension))
    }
}

#[async_trait]
impl ImageGenerator for FakeMedia {
    async fn generate(&self, prompt: &str, word: &str) -> Result<String, GenerationError> {
        self.produce(prompt, word)
    }
}

#[async_trait]
impl Narrator for FakeMedia {
    async fn generate(&self, text: &str, word: &str) -> Result<String, GenerationError> {
        self.produce(text, word)
    }
}

pub struct FakeStore {
    available: bool,
    reject: HashSet<String>,
    next_id: AtomicU64,
    pub notes: Mutex<Vec<(Card, String)>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Self::rejecting(&[])
    }

    pub fn rejecting(words: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            available: true,
            reject: words.iter().map(|w| w.to_string()).collect(),
            next_id: AtomicU64::new(1000),
            notes: Mutex::new(Vec::new()),
        })
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self {
            available: false,
            reject: HashSet::new(),
            next_id: AtomicU64::new(1000),
            notes: Mutex::new(Vec::new()),
        })
    }

    pub fn notes(&self) -> Vec<(Card, String)> {
        self.notes.lock().unwrap().clone()
    }

    pub fn stored_words(&self) -> Vec<String> {
        self.notes().into_iter().map(|(card, _)| card.word).collect()
    }
}

#[async_trait]
impl CardStore for FakeStore {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn add_note(&self, card: &Card, deck: &str) -> Result<u64, StoreError> {
        self.notes
            .lock()
            .unwrap()
            .push((card.clone(), deck.to_string()));
        if self.reject.contains(&card.word) {
            return Err(StoreError::Rejected(
                "cannot create note because it is a duplicate".to_string(),
            ));
        }
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

/// Replays scripted choices and records everything it is shown
#[derive(Default)]
pub struct ScriptedInteraction {
    choices: VecDeque<Choice>,
    pub events: Vec<CardEvent>,
    /// (word, meaning count, skip allowed) per prompt
    pub prompts: Vec<(String, usize, bool)>,
}

impl ScriptedInteraction {
    pub fn new(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Interaction for ScriptedInteraction {
    async fn choose(&mut self, request: ChoiceRequest<'_>) -> Choice {
        self.prompts.push((
            request.word.to_string(),
            request.result.meanings.len(),
            request.allow_skip,
        ));
        // Running out of script behaves like Ctrl+C so a bad test cannot spin
        self.choices.pop_front().unwrap_or(Choice::Interrupt)
    }

    fn emit(&mut self, event: CardEvent) {
        self.events.push(event);
    }
}

pub fn meaning(word: &str, definition: &str) -> WordMeaning {
    WordMeaning {
        definition: definition.to_string(),
        part_of_speech: "noun".to_string(),
        example: format!("Una frase con {word}."),
        example_blanked: "Una frase con ___.".to_string(),
        translation: format!("A sentence with {definition}."),
    }
}

pub fn lookup_result(word: &str, definitions: &[&str]) -> WordLookupResult {
    WordLookupResult {
        word: word.to_string(),
        meanings: definitions.iter().map(|d| meaning(word, d)).collect(),
    }
}

pub fn orchestrator(
    dictionary: Arc<FakeDictionary>,
    images: Arc<FakeMedia>,
    narrator: Arc<FakeMedia>,
    store: Arc<FakeStore>,
) -> Orchestrator {
    let enricher = Enricher::new(images, narrator, ProgressMode::Silent);
    let maker = CardMaker::new(enricher, store, AnkiConfig::default());
    Orchestrator::new(dictionary, maker)
}
