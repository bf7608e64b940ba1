use serde::{Deserialize, Serialize};

/// Assembled note content, ready for the flashcard store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub definition: String,
    /// Blanked example, translation appended for non-English targets
    pub sentence_blank: String,
    /// Full example, translation appended for non-English targets
    pub sentence_full: String,
    /// Empty when the image step failed
    pub image_ref: String,
    /// Empty when the audio step was skipped or failed
    pub audio_ref: String,
}

impl Card {
    pub fn has_image(&self) -> bool {
        !self.image_ref.is_empty()
    }
}
