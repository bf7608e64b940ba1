use std::sync::Arc;

use chispa_types::Language;

use crate::maker::CardMaker;
use crate::resolver::Resolver;
use crate::services::Dictionary;

/// Entry point for both flows: single word (`add_word`) and file batch (`run_batch`)
pub struct Orchestrator {
    pub(crate) dictionary: Arc<dyn Dictionary>,
    pub(crate) maker: CardMaker,
}

impl Orchestrator {
    pub fn new(dictionary: Arc<dyn Dictionary>, maker: CardMaker) -> Self {
        Self { dictionary, maker }
    }

    pub fn resolver(&self, language: Language) -> Resolver {
        Resolver::new(self.dictionary.clone(), language)
    }

    pub fn deck_for(&self, language: Language) -> &str {
        self.maker.deck_for(language)
    }
}
