//! Strips punctuation and whitespace before comparison.
//!
//! Punctuation is any scalar in the Unicode `P` general category (connector,
//! dash, open, close, initial, final and other punctuation), which covers CJK
//! interpunction such as `，` `。` `、` `「」`. Case and diacritics are kept.

use std::sync::OnceLock;

use regex::Regex;

use super::char_sequence::CharSequence;

fn ignorable() -> &'static Regex {
    static IGNORABLE: OnceLock<Regex> = OnceLock::new();
    IGNORABLE.get_or_init(|| Regex::new(r"[\p{P}\s]+").expect("static pattern is valid"))
}

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn normalize(text: &str) -> CharSequence {
        let stripped = ignorable().replace_all(text, "");
        CharSequence::new(stripped.chars().collect())
    }
}
