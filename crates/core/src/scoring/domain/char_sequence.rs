use std::fmt;
use std::ops::Range;

/// Ordered run of Unicode scalar values produced by text normalization.
///
/// Offsets reported by the aligner are indices into this sequence, not byte
/// offsets into the raw string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSequence {
    chars: Vec<char>,
}

impl CharSequence {
    pub fn new(chars: Vec<char>) -> Self {
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Text of a half-open character range, clamped to the sequence bounds.
    pub fn substring(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars[start..end].iter().collect()
    }
}

impl From<&str> for CharSequence {
    fn from(s: &str) -> Self {
        Self::new(s.chars().collect())
    }
}

impl fmt::Display for CharSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_chars_not_bytes() {
        let seq = CharSequence::from("我爱学习");
        assert_eq!(seq.len(), 4);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_substring() {
        let seq = CharSequence::from("hello");
        assert_eq!(seq.substring(1..3), "el");
    }

    #[test]
    fn test_substring_clamps_out_of_range() {
        let seq = CharSequence::from("abc");
        assert_eq!(seq.substring(2..10), "c");
        assert_eq!(seq.substring(5..10), "");
    }

    #[test]
    fn test_display_round_trips_text() {
        let seq = CharSequence::from("你好");
        assert_eq!(seq.to_string(), "你好");
    }
}
