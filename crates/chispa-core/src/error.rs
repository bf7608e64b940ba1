use std::path::PathBuf;

use crate::batch::BatchSummary;

/// Dictionary call failed; fatal for the word, never retried automatically
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication error")]
    Authentication,
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else {
            LookupError::Network(e)
        }
    }
}

/// Image or audio generation failed; the pipeline continues without it
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("no media data received")]
    NoData,

    #[error("failed to decode media: {0}")]
    Decode(String),

    #[error("failed to write media file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Network(e)
        }
    }
}

pub const STORE_UNREACHABLE: &str =
    "Cannot connect to Anki. Make sure Anki is running and AnkiConnect is installed.";

/// Note insertion failed, duplicates included
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),

    #[error("AnkiConnect error: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            StoreError::Unavailable(STORE_UNREACHABLE.to_string())
        } else if e.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Network(e)
        }
    }
}

/// Why no meaning was selected for a word
#[derive(Debug, thiserror::Error)]
pub enum AbandonReason {
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("no meanings found")]
    NoMeanings,

    #[error("skipped")]
    Skipped,

    #[error("cancelled")]
    Interrupted,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}", STORE_UNREACHABLE)]
    StoreUnavailable,

    #[error("no words to process in file")]
    NoWords,

    #[error("batch cancelled")]
    Interrupted { created: Vec<String> },

    #[error("failed to update {path}: {source}")]
    Checkpoint {
        path: PathBuf,
        source: std::io::Error,
        summary: BatchSummary,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("no word given")]
    EmptyWord,

    #[error("{}", STORE_UNREACHABLE)]
    StoreUnavailable,

    #[error("{0}")]
    Abandoned(AbandonReason),

    #[error("error adding card: {0}")]
    Store(#[from] StoreError),
}
