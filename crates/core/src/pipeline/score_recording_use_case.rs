use crate::library::domain::practice_repository::{PracticeRepository, RepositoryError};
use crate::library::domain::recording::Recording;
use crate::library::domain::score_record::ScoreRecord;
use crate::scoring::domain::score_computer::ScoreComputer;
use crate::scoring::domain::text_normalizer::TextNormalizer;
use crate::transcription::domain::transcriber::Transcriber;

use super::pipeline_error::PipelineError;

/// Alignment cost is quadratic, so passages are capped before scoring.
pub const DEFAULT_MAX_PASSAGE_CHARS: usize = 2000;

/// Transcribes a finished recording, scores it against its practice item,
/// and stores recording and score as one commit.
pub struct ScoreRecordingUseCase<'a> {
    repository: &'a mut dyn PracticeRepository,
    transcriber: Box<dyn Transcriber>,
    max_passage_chars: usize,
}

impl<'a> ScoreRecordingUseCase<'a> {
    pub fn new(
        repository: &'a mut dyn PracticeRepository,
        transcriber: Box<dyn Transcriber>,
        max_passage_chars: usize,
    ) -> Self {
        Self {
            repository,
            transcriber,
            max_passage_chars,
        }
    }

    pub fn execute(&mut self, recording: Recording) -> Result<ScoreRecord, PipelineError> {
        // 1. Resolve the reference passage
        let item = self
            .repository
            .item(recording.item_id)?
            .ok_or(RepositoryError::UnknownItem(recording.item_id))?;

        // 2. Transcribe
        let transcribed = self
            .transcriber
            .transcribe(&recording)
            .map_err(PipelineError::Transcription)?;

        // 3. Enforce the input cap on both sides
        for text in [item.content.as_str(), transcribed.as_str()] {
            let length = TextNormalizer::normalize(text).len();
            if length > self.max_passage_chars {
                return Err(PipelineError::PassageTooLong {
                    length,
                    limit: self.max_passage_chars,
                });
            }
        }

        // 4. Score and persist
        let result = ScoreComputer::score(&item.content, &transcribed);
        let record = ScoreRecord::new(recording.id, transcribed, result);
        log::info!(
            "Scored recording {} of item {}: {}%",
            recording.id,
            item.id,
            record.percent()
        );
        self.repository.save_recording(recording, record.clone())?;

        Ok(record)
    }
}
