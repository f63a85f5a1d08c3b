use super::sequence_aligner::SequenceAligner;
use super::span::Span;
use super::text_normalizer::TextNormalizer;

/// Similarity of a transcription to its reference passage.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreResult {
    /// `matched / len(normalized reference)`, in `[0, 1]`.
    pub score: f64,
    /// Mismatched runs as offsets into the *normalized* transcription.
    pub mismatches: Vec<Span>,
}

/// Score as an integer percentage, rounded half away from zero.
pub fn to_percent(score: f64) -> u32 {
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}

pub struct ScoreComputer;

impl ScoreComputer {
    pub fn score(reference_text: &str, transcribed_text: &str) -> ScoreResult {
        let reference = TextNormalizer::normalize(reference_text);
        let transcribed = TextNormalizer::normalize(transcribed_text);
        let alignment = SequenceAligner::align(&reference, &transcribed);

        // Nothing to read means nothing to flag.
        let (score, mismatches) = if reference.is_empty() {
            (0.0, Vec::new())
        } else {
            (
                alignment.matched_count as f64 / reference.len() as f64,
                alignment.mismatches(),
            )
        };

        log::debug!(
            "Matched {} of {} reference chars, score {score:.3}",
            alignment.matched_count,
            reference.len()
        );

        ScoreResult { score, mismatches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("我爱学习")]
    #[case("Hello, world!")]
    #[case("床前明月光，疑是地上霜。")]
    fn test_identical_text_scores_one(#[case] text: &str) {
        let result = ScoreComputer::score(text, text);
        assert_relative_eq!(result.score, 1.0);
        assert!(result.mismatches.is_empty());
    }

    #[rstest]
    #[case("我爱学习")]
    #[case("Hello")]
    #[case("")]
    fn test_empty_transcription_scores_zero(#[case] text: &str) {
        let result = ScoreComputer::score(text, "");
        assert_relative_eq!(result.score, 0.0);
        assert!(result.mismatches.is_empty());
    }

    #[test]
    fn test_empty_reference_scores_zero_without_mismatches() {
        let result = ScoreComputer::score("，。！", "anything");
        assert_relative_eq!(result.score, 0.0);
        assert!(result.mismatches.is_empty());
    }

    #[test]
    fn test_punctuation_and_whitespace_are_ignored() {
        let result = ScoreComputer::score("Hello, world!", "Helloworld");
        assert_relative_eq!(result.score, 1.0);
        assert!(result.mismatches.is_empty());
    }

    #[test]
    fn test_dropped_character() {
        let result = ScoreComputer::score("我爱学习", "我爱习");
        assert_relative_eq!(result.score, 0.75);
        assert!(result.mismatches.is_empty());
    }

    #[test]
    fn test_homophone_substitution() {
        let result = ScoreComputer::score("我爱学习", "我爱雪习");
        assert_relative_eq!(result.score, 0.75);
        assert_eq!(result.mismatches, vec![Span::mismatched(2, 3)]);
    }

    #[test]
    fn test_offsets_refer_to_normalized_transcription() {
        // "，" in the raw transcription is stripped, so "雪" sits at index 2.
        let result = ScoreComputer::score("我爱学习", "我爱，雪习");
        assert_eq!(result.mismatches, vec![Span::mismatched(2, 3)]);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.756, 76)]
    #[case(0.744, 74)]
    #[case(0.125, 13)]
    #[case(1.0, 100)]
    fn test_to_percent_rounds(#[case] score: f64, #[case] expected: u32) {
        assert_eq!(to_percent(score), expected);
    }

    #[test]
    fn test_extra_words_do_not_raise_score_above_one() {
        let result = ScoreComputer::score("abc", "aabbcc");
        assert_relative_eq!(result.score, 1.0);
        assert_eq!(result.mismatches.len(), 3);
    }
}
