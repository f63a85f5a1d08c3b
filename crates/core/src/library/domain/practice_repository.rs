use std::path::PathBuf;

use thiserror::Error;

use super::practice_item::{ItemId, PracticeItem};
use super::recording::{Recording, RecordingId};
use super::score_record::ScoreRecord;
use super::topic::{Topic, TopicId, TopicSummary};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("failed to read library from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write library to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed library data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown practice item {0}")]
    UnknownItem(ItemId),
    #[error("unknown topic {0}")]
    UnknownTopic(TopicId),
    #[error("unknown recording {0}")]
    UnknownRecording(RecordingId),
    #[error("recording {0} already exists")]
    DuplicateRecording(RecordingId),
    #[error("preset topic {0} cannot be deleted")]
    PresetTopic(TopicId),
}

/// Read-only view of the practice history at one point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistorySnapshot {
    pub topics: Vec<Topic>,
    pub items: Vec<PracticeItem>,
    pub recordings: Vec<Recording>,
    pub scores: Vec<ScoreRecord>,
}

impl HistorySnapshot {
    pub fn item(&self, id: ItemId) -> Option<&PracticeItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn recordings_for(&self, item_id: ItemId) -> Vec<&Recording> {
        self.recordings
            .iter()
            .filter(|r| r.item_id == item_id)
            .collect()
    }

    pub fn score_for(&self, recording_id: RecordingId) -> Option<&ScoreRecord> {
        self.scores.iter().find(|s| s.recording_id == recording_id)
    }

    /// Topics newest first, each with its item count.
    pub fn topic_summaries(&self) -> Vec<TopicSummary> {
        let mut summaries: Vec<TopicSummary> = self
            .topics
            .iter()
            .map(|t| TopicSummary {
                topic: t.clone(),
                item_count: self.items.iter().filter(|i| i.topic_id == t.id).count(),
            })
            .collect();
        summaries.sort_by(|a, b| b.topic.created_at.cmp(&a.topic.created_at));
        summaries
    }
}

/// Persistence collaborator for practice data.
///
/// Implementations own storage; callers receive materialized snapshots and
/// hand back whole records. Each mutating call is one commit.
pub trait PracticeRepository: Send {
    fn snapshot(&self) -> Result<HistorySnapshot, RepositoryError>;

    /// Store a recording and its score together.
    fn save_recording(
        &mut self,
        recording: Recording,
        score: ScoreRecord,
    ) -> Result<(), RepositoryError>;

    /// Remove a recording and its score.
    fn delete_recording(&mut self, id: RecordingId) -> Result<(), RepositoryError>;

    /// Create a topic and add `items` to it with freshly assigned ids.
    fn import_topic(
        &mut self,
        name: &str,
        description: &str,
        items: Vec<PracticeItem>,
    ) -> Result<TopicId, RepositoryError>;

    /// Remove a non-preset topic with its items, recordings and scores.
    fn delete_topic(&mut self, id: TopicId) -> Result<(), RepositoryError>;

    fn items(&self) -> Result<Vec<PracticeItem>, RepositoryError> {
        Ok(self.snapshot()?.items)
    }

    fn item(&self, id: ItemId) -> Result<Option<PracticeItem>, RepositoryError> {
        Ok(self.snapshot()?.item(id).cloned())
    }

    fn topics(&self) -> Result<Vec<TopicSummary>, RepositoryError> {
        Ok(self.snapshot()?.topic_summaries())
    }

    fn recordings(&self) -> Result<Vec<Recording>, RepositoryError> {
        Ok(self.snapshot()?.recordings)
    }

    fn recordings_for(&self, item_id: ItemId) -> Result<Vec<Recording>, RepositoryError> {
        Ok(self
            .snapshot()?
            .recordings_for(item_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn scores(&self) -> Result<Vec<ScoreRecord>, RepositoryError> {
        Ok(self.snapshot()?.scores)
    }

    fn score_for(&self, recording_id: RecordingId) -> Result<Option<ScoreRecord>, RepositoryError> {
        Ok(self.snapshot()?.score_for(recording_id).cloned())
    }
}
