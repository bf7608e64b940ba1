use std::fmt;

use crate::language::Language;

/// Optional enrichment steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Image,
    Audio,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Image => f.write_str("Image"),
            Step::Audio => f.write_str("Audio"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped(String),
    Failed(String),
}

impl StepOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, StepOutcome::Done)
    }
}

/// Progress notifications emitted while a card is being built.
///
/// The binary renders these on the terminal; tests collect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    BatchStarted {
        count: usize,
        language: Language,
    },
    BatchWord {
        word: String,
        hint: Option<String>,
    },
    LookingUp {
        word: String,
        context: Option<String>,
        language: Language,
    },
    LookupFailed {
        word: String,
        reason: String,
    },
    NoMeanings {
        word: String,
    },
    Retrying {
        context: String,
    },
    Normalized {
        from: String,
        to: String,
    },
    CreatingCard {
        word: String,
        definition: String,
    },
    StepFinished {
        step: Step,
        outcome: StepOutcome,
    },
    AddingNote,
    CardCreated {
        word: String,
        deck: String,
        note_id: u64,
    },
    WordSkipped {
        word: String,
    },
    WordFailed {
        word: String,
        reason: String,
    },
    Checkpointed {
        removed: usize,
    },
}
