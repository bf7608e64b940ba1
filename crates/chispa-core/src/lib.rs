pub mod batch;
pub mod checkpoint;
pub mod cloze;
pub mod error;
pub mod maker;
pub mod orchestrator;
pub mod pipeline;
pub mod progress;
pub mod resolver;
pub mod services;
pub mod single;

#[cfg(test)]
mod tests;

pub use batch::BatchSummary;
pub use error::{AbandonReason, AddError, BatchError, GenerationError, LookupError, StoreError};
pub use maker::CardMaker;
pub use orchestrator::Orchestrator;
pub use pipeline::{Enricher, Enrichment};
pub use progress::{ProgressMode, Spinner};
pub use resolver::{Choice, ChoiceError, Resolver, ResolverState, Selection};
pub use services::{CardStore, ChoiceRequest, Dictionary, ImageGenerator, Interaction, Narrator};
pub use single::AddOutcome;
