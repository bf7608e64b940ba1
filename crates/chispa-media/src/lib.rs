//! Image and audio generation, saved straight into the Anki media folder

mod audio;
mod image;
mod naming;

pub use audio::ElevenLabsNarrator;
pub use image::OpenAiImageGenerator;
pub use naming::{audio_file_name, audio_ref, image_file_name, image_ref, media_stem};
