//! Batch file parsing and the end-of-run rewrite.
//!
//! ```text
//! # Spanish words from chapter 3
//! banco
//! serendipity | feeling
//! ```

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use chispa_types::{BatchItem, split_entry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchLine {
    Blank(String),
    Comment(String),
    Entry {
        raw: String,
        word: String,
        hint: Option<String>,
    },
}

impl BatchLine {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            BatchLine::Blank(raw.to_string())
        } else if trimmed.starts_with('#') {
            BatchLine::Comment(raw.to_string())
        } else {
            let (word, hint) = split_entry(trimmed);
            BatchLine::Entry {
                raw: raw.to_string(),
                word,
                hint,
            }
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            BatchLine::Blank(raw) | BatchLine::Comment(raw) | BatchLine::Entry { raw, .. } => raw,
        }
    }

    /// Headword of a data line
    pub fn word(&self) -> Option<&str> {
        match self {
            BatchLine::Entry { word, .. } if !word.is_empty() => Some(word),
            _ => None,
        }
    }
}

/// Every line of a batch file, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchFile {
    lines: Vec<BatchLine>,
}

impl BatchFile {
    /// Splits on `\n` only, so a CRLF line keeps its `\r` in `raw`
    pub fn parse(content: &str) -> Self {
        let mut raws: Vec<&str> = content.split('\n').collect();
        if raws.last() == Some(&"") {
            raws.pop();
        }
        Self {
            lines: raws.into_iter().map(BatchLine::parse).collect(),
        }
    }

    pub fn lines(&self) -> &[BatchLine] {
        &self.lines
    }

    /// Data lines in file order
    pub fn items(&self) -> Vec<BatchItem> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                BatchLine::Entry { word, hint, .. } if !word.is_empty() => {
                    Some(BatchItem::new(word.clone(), hint.clone(), idx))
                }
                _ => None,
            })
            .collect()
    }

    /// File content with every data line whose headword is in `created`
    /// dropped. Blank and comment lines always stay.
    pub fn render_without(&self, created: &HashSet<String>) -> String {
        let kept: Vec<&str> = self
            .lines
            .iter()
            .filter(|line| !line.word().is_some_and(|w| created.contains(w)))
            .map(BatchLine::raw)
            .collect();

        if kept.is_empty() {
            String::new()
        } else {
            let mut out = kept.join("\n");
            out.push('\n');
            out
        }
    }
}

/// Replace `path` with `content` via a sibling temp file and a rename
pub async fn write_atomically(path: &Path, content: &str) -> io::Result<()> {
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, content).await?;

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    path.with_file_name(format!(".{name}.chispa-tmp"))
}
