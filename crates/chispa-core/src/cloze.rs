//! Blanking of headwords in example sentences.

use regex::{NoExpand, RegexBuilder};

/// Delimits the headword span inside an example sentence
pub const MARKER: &str = "**";

/// One blanked word
pub const BLANK: &str = "___";

/// Split a sentence with a `**marked**` span into `(full, blanked)`.
///
/// Only the first marker pair is used. Without a pair, or with a span that
/// holds no words, the sentence comes back unchanged in both positions.
pub fn split_marked(sentence: &str) -> (String, String) {
    let identity = || (sentence.to_string(), sentence.to_string());

    let Some(open) = sentence.find(MARKER) else {
        return identity();
    };
    let inner_start = open + MARKER.len();
    let Some(close) = sentence[inner_start..].find(MARKER).map(|i| inner_start + i) else {
        return identity();
    };

    let inner = &sentence[inner_start..close];
    let words = inner.split_whitespace().count();
    if words == 0 {
        return identity();
    }

    let before = &sentence[..open];
    let after = &sentence[close + MARKER.len()..];

    (
        format!("{before}{inner}{after}"),
        format!("{before}{}{after}", blanks(words)),
    )
}

/// `___` per word of the headword, space-joined
pub fn blank_pattern(word: &str) -> String {
    blanks(word.split_whitespace().count())
}

fn blanks(count: usize) -> String {
    vec![BLANK; count].join(" ")
}

/// Case-insensitive literal replacement of every occurrence of `word`
pub fn replace_with_blank(sentence: &str, word: &str, blank: &str) -> String {
    if word.trim().is_empty() {
        return sentence.to_string();
    }

    match RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(sentence, NoExpand(blank)).into_owned(),
        Err(e) => {
            tracing::warn!("Cannot blank '{}': {}", word, e);
            sentence.to_string()
        }
    }
}

/// True when the text holds a blank placeholder (two or more underscores)
pub fn contains_blank(text: &str) -> bool {
    text.contains("__")
}
