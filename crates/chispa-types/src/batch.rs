use serde::{Deserialize, Serialize};

/// Per-word state during a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Pending,
    Created,
    Failed,
}

/// One data line of a batch input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub word: String,
    pub hint: Option<String>,
    pub outcome: Outcome,
    /// Zero-based index of the source line
    pub line: usize,
}

impl BatchItem {
    pub fn new(word: String, hint: Option<String>, line: usize) -> Self {
        Self {
            word,
            hint,
            outcome: Outcome::Pending,
            line,
        }
    }
}

/// Split a `word | hint` entry on the first `|`.
///
/// Both halves are trimmed; an empty hint becomes `None`.
pub fn split_entry(entry: &str) -> (String, Option<String>) {
    match entry.split_once('|') {
        Some((word, hint)) => {
            let hint = hint.trim();
            let hint = (!hint.is_empty()).then(|| hint.to_string());
            (word.trim().to_string(), hint)
        }
        None => (entry.trim().to_string(), None),
    }
}
