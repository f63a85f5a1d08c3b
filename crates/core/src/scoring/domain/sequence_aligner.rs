//! Longest-common-subsequence alignment of a reference passage against a
//! transcription.
//!
//! Backtracking tie-break: when the two characters differ and the neighbours
//! `dp[i-1][j]` and `dp[i][j-1]` are equal, the walk steps the *transcribed*
//! index. Only a strictly greater `dp[i-1][j]` steps the reference index.
//! Stored scores depend on this choice when several optimal alignments exist,
//! so it must not change.

use super::char_sequence::CharSequence;
use super::span::{Span, SpanBuilder, SpanKind};

/// Result of aligning a reference sequence `R` with a transcribed sequence `T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    /// Length of the LCS.
    pub matched_count: usize,
    /// Coalesced matched/mismatched runs partitioning `T` exactly.
    pub spans: Vec<Span>,
    /// Same classification over `R`; mismatched runs are characters the
    /// reader skipped or replaced.
    pub reference_spans: Vec<Span>,
}

impl Alignment {
    pub fn mismatches(&self) -> Vec<Span> {
        self.spans.iter().copied().filter(Span::is_mismatched).collect()
    }

    pub fn reference_mismatches(&self) -> Vec<Span> {
        self.reference_spans
            .iter()
            .copied()
            .filter(Span::is_mismatched)
            .collect()
    }
}

pub struct SequenceAligner;

impl SequenceAligner {
    pub fn align(reference: &CharSequence, transcribed: &CharSequence) -> Alignment {
        let lcs = longest_common_subsequence(reference.as_slice(), transcribed.as_slice());
        Alignment {
            matched_count: lcs.len(),
            spans: classify(transcribed.as_slice(), &lcs),
            reference_spans: classify(reference.as_slice(), &lcs),
        }
    }
}

/// Row-major `(m + 1) x (n + 1)` DP table.
struct LcsTable {
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(reference: &[char], transcribed: &[char]) -> Self {
        let rows = reference.len() + 1;
        let cols = transcribed.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for i in 1..rows {
            for j in 1..cols {
                cells[i * cols + j] = if reference[i - 1] == transcribed[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
            }
        }

        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }
}

fn longest_common_subsequence(reference: &[char], transcribed: &[char]) -> Vec<char> {
    if reference.is_empty() || transcribed.is_empty() {
        return Vec::new();
    }

    let table = LcsTable::build(reference, transcribed);
    let mut lcs = Vec::with_capacity(table.get(reference.len(), transcribed.len()) as usize);
    let (mut i, mut j) = (reference.len(), transcribed.len());

    while i > 0 && j > 0 {
        if reference[i - 1] == transcribed[j - 1] {
            lcs.push(reference[i - 1]);
            i -= 1;
            j -= 1;
        } else if table.get(i - 1, j) > table.get(i, j - 1) {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs
}

/// Greedy left-to-right walk: a character matches when it equals the next
/// unconsumed LCS character.
fn classify(sequence: &[char], lcs: &[char]) -> Vec<Span> {
    let mut builder = SpanBuilder::default();
    let mut cursor = 0;

    for &c in sequence {
        if lcs.get(cursor) == Some(&c) {
            cursor += 1;
            builder.push(SpanKind::Matched);
        } else {
            builder.push(SpanKind::Mismatched);
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn align(reference: &str, transcribed: &str) -> Alignment {
        SequenceAligner::align(&reference.into(), &transcribed.into())
    }

    fn covered(spans: &[Span]) -> usize {
        spans.iter().map(Span::len).sum()
    }

    #[test]
    fn test_identical_sequences_single_matched_span() {
        let a = align("我爱学习", "我爱学习");
        assert_eq!(a.matched_count, 4);
        assert_eq!(a.spans, vec![Span::matched(0, 4)]);
        assert!(a.mismatches().is_empty());
    }

    #[test]
    fn test_dropped_character_produces_no_transcribed_mismatch() {
        let a = align("我爱学习", "我爱习");
        assert_eq!(a.matched_count, 3);
        assert!(a.mismatches().is_empty());
        assert_eq!(a.reference_mismatches(), vec![Span::mismatched(2, 3)]);
    }

    #[test]
    fn test_inserted_homophone_is_single_mismatch() {
        let a = align("我爱学习", "我爱雪习");
        assert_eq!(a.matched_count, 3);
        assert_eq!(a.mismatches(), vec![Span::mismatched(2, 3)]);
        assert_eq!(
            a.spans,
            vec![Span::matched(0, 2), Span::mismatched(2, 3), Span::matched(3, 4)]
        );
    }

    #[test]
    fn test_adjacent_mismatches_coalesce() {
        let a = align("abcd", "axyd");
        assert_eq!(a.matched_count, 2);
        assert_eq!(a.mismatches(), vec![Span::mismatched(1, 3)]);
    }

    #[test]
    fn test_trailing_mismatch_is_closed() {
        let a = align("ab", "abzz");
        assert_eq!(a.spans, vec![Span::matched(0, 2), Span::mismatched(2, 4)]);
    }

    #[test]
    fn test_empty_transcribed_has_no_spans() {
        let a = align("abc", "");
        assert_eq!(a.matched_count, 0);
        assert!(a.spans.is_empty());
        assert_eq!(a.reference_spans, vec![Span::mismatched(0, 3)]);
    }

    #[test]
    fn test_empty_reference_marks_everything_mismatched() {
        let a = align("", "abc");
        assert_eq!(a.matched_count, 0);
        assert_eq!(a.spans, vec![Span::mismatched(0, 3)]);
    }

    #[test]
    fn test_tie_break_steps_transcribed_index() {
        // R = "ab", T = "ba": LCS length 1 either way. At (2, 2) the neighbours
        // tie, so the walk drops T's trailing 'a' and the LCS is "b".
        let a = align("ab", "ba");
        assert_eq!(a.matched_count, 1);
        assert_eq!(a.spans, vec![Span::matched(0, 1), Span::mismatched(1, 2)]);
        assert_eq!(a.reference_spans, vec![Span::mismatched(0, 1), Span::matched(1, 2)]);
    }

    #[rstest]
    #[case("今天天气很好", "今天天汽很好呀")]
    #[case("the quick brown fox", "thequickbrownfocks")]
    #[case("abcabcabc", "cbacbacba")]
    #[case("x", "yyyy")]
    fn test_spans_partition_both_sequences(#[case] reference: &str, #[case] transcribed: &str) {
        let r: CharSequence = reference.into();
        let t: CharSequence = transcribed.into();
        let a = SequenceAligner::align(&r, &t);

        assert_eq!(covered(&a.spans), t.len());
        assert_eq!(covered(&a.reference_spans), r.len());
        for pair in a.spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_ne!(pair[0].kind, pair[1].kind);
        }
        let matched: usize = a
            .spans
            .iter()
            .filter(|s| !s.is_mismatched())
            .map(Span::len)
            .sum();
        assert_eq!(matched, a.matched_count);
    }

    #[test]
    fn test_alignment_is_deterministic() {
        let first = align("学而时习之不亦说乎", "学而是习之不亦乐乎");
        let second = align("学而时习之不亦说乎", "学而是习之不亦乐乎");
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_passage_does_not_overflow_stack() {
        let reference: String = "春眠不觉晓处处闻啼鸟".repeat(100);
        let transcribed: String = "春眠不觉小处处闻啼鸟".repeat(100);
        let a = align(&reference, &transcribed);
        assert_eq!(a.matched_count, 900);
        assert_eq!(a.mismatches().len(), 100);
    }
}
