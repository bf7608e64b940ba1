//! OpenAI-backed dictionary lookups

mod openai;
mod prompt;
mod response;

pub use openai::OpenAiDictionary;
pub use response::parse_lookup;
