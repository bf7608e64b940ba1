use std::path::Path;

use chispa_core::GenerationError;

/// File-name-safe form of a headword: path separators and whitespace become `_`
pub fn media_stem(word: &str) -> String {
    word.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

pub fn image_file_name(word: &str) -> String {
    format!("chispa_{}.png", media_stem(word))
}

pub fn audio_file_name(word: &str) -> String {
    format!("chispa_{}.mp3", media_stem(word))
}

/// HTML embed for a note field
pub fn image_ref(file_name: &str) -> String {
    format!("<img src=\"{file_name}\">")
}

/// Anki sound tag
pub fn audio_ref(file_name: &str) -> String {
    format!("[sound:{file_name}]")
}

pub(crate) async fn save(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<(), GenerationError> {
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
