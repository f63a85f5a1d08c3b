use super::char_sequence::CharSequence;
use super::sequence_aligner::SequenceAligner;
use super::span::Span;
use super::text_normalizer::TextNormalizer;

/// Two-sided comparison of a reading, used for side-by-side highlighting.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadingReport {
    pub reference: CharSequence,
    pub recognized: CharSequence,
    /// Partition of `reference`; mismatched runs were skipped or misread.
    pub reference_spans: Vec<Span>,
    /// Partition of `recognized`; mismatched runs were not in the passage.
    pub recognized_spans: Vec<Span>,
    pub correct_count: usize,
}

impl ReadingReport {
    pub fn build(reference_text: &str, recognized_text: &str) -> Self {
        let reference = TextNormalizer::normalize(reference_text);
        let recognized = TextNormalizer::normalize(recognized_text);
        let alignment = SequenceAligner::align(&reference, &recognized);

        Self {
            reference,
            recognized,
            reference_spans: alignment.reference_spans,
            recognized_spans: alignment.spans,
            correct_count: alignment.matched_count,
        }
    }

    pub fn reference_count(&self) -> usize {
        self.reference.len()
    }

    pub fn recognized_count(&self) -> usize {
        self.recognized.len()
    }

    /// Reference characters not read correctly.
    pub fn error_count(&self) -> usize {
        self.reference_count() - self.correct_count
    }

    pub fn accuracy(&self) -> f64 {
        if self.reference.is_empty() {
            return 0.0;
        }
        self.correct_count as f64 / self.reference_count() as f64
    }

    /// Text of every mismatched run in the recognized sequence.
    pub fn misread_words(&self) -> Vec<String> {
        self.recognized_spans
            .iter()
            .filter(|s| s.is_mismatched())
            .map(|s| self.recognized.substring(s.start..s.end))
            .collect()
    }

    /// Text of every mismatched run in the reference.
    pub fn missed_words(&self) -> Vec<String> {
        self.reference_spans
            .iter()
            .filter(|s| s.is_mismatched())
            .map(|s| self.reference.substring(s.start..s.end))
            .collect()
    }
}
