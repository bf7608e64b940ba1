pub mod batch;
pub mod card;
pub mod event;
pub mod language;
pub mod word;

pub use batch::{BatchItem, Outcome, split_entry};
pub use card::Card;
pub use event::{CardEvent, Step, StepOutcome};
pub use language::Language;
pub use word::{WordLookupResult, WordMeaning};
