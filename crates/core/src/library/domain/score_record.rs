use serde::{Deserialize, Serialize};

use super::recording::RecordingId;
use crate::scoring::domain::score_computer::{to_percent, ScoreResult};
use crate::scoring::domain::span::Span;

/// Persisted outcome of scoring one recording. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub recording_id: RecordingId,
    /// Raw transcription, before normalization.
    pub transcribed_text: String,
    pub match_score: f64,
    /// Offsets into the normalized transcription.
    pub mismatched_words: Vec<Span>,
}

impl ScoreRecord {
    pub fn new(recording_id: RecordingId, transcribed_text: String, result: ScoreResult) -> Self {
        Self {
            recording_id,
            transcribed_text,
            match_score: result.score,
            mismatched_words: result.mismatches,
        }
    }

    pub fn percent(&self) -> u32 {
        to_percent(self.match_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_new_copies_score_result() {
        let result = ScoreResult {
            score: 0.75,
            mismatches: vec![Span::mismatched(2, 3)],
        };
        let record = ScoreRecord::new(Uuid::nil(), "我爱雪习".to_string(), result);
        assert_eq!(record.match_score, 0.75);
        assert_eq!(record.mismatched_words, vec![Span::mismatched(2, 3)]);
        assert_eq!(record.percent(), 75);
    }
}
