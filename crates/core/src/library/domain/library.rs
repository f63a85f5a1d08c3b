use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::practice_item::PracticeItem;
use super::practice_repository::{HistorySnapshot, RepositoryError};
use super::recording::{Recording, RecordingId};
use super::score_record::ScoreRecord;
use super::topic::{Topic, TopicId, PRESET_TOPIC_ID};

pub const PRESET_TOPIC_NAME: &str = "Daily Reading";

/// Whole practice library as one serializable document.
///
/// Holds the referential rules shared by every repository implementation:
/// recordings must reference a known item, the preset topic cannot be
/// removed, and deleting a topic cascades to its items, recordings and scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub topics: Vec<Topic>,
    pub items: Vec<PracticeItem>,
    #[serde(default)]
    pub recordings: Vec<Recording>,
    #[serde(default)]
    pub scores: Vec<ScoreRecord>,
}

impl Library {
    /// Empty library containing only the preset topic.
    pub fn new(created_at: NaiveDateTime) -> Self {
        Self {
            topics: vec![Topic {
                id: PRESET_TOPIC_ID,
                name: PRESET_TOPIC_NAME.to_string(),
                description: String::new(),
                created_at,
                is_preset: true,
            }],
            items: Vec::new(),
            recordings: Vec::new(),
            scores: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            topics: self.topics.clone(),
            items: self.items.clone(),
            recordings: self.recordings.clone(),
            scores: self.scores.clone(),
        }
    }

    pub fn save_recording(
        &mut self,
        recording: Recording,
        score: ScoreRecord,
    ) -> Result<(), RepositoryError> {
        if !self.items.iter().any(|i| i.id == recording.item_id) {
            return Err(RepositoryError::UnknownItem(recording.item_id));
        }
        if self.recordings.iter().any(|r| r.id == recording.id) {
            return Err(RepositoryError::DuplicateRecording(recording.id));
        }
        let score = ScoreRecord {
            recording_id: recording.id,
            ..score
        };
        self.recordings.push(recording);
        self.scores.push(score);
        Ok(())
    }

    pub fn delete_recording(&mut self, id: RecordingId) -> Result<(), RepositoryError> {
        let before = self.recordings.len();
        self.recordings.retain(|r| r.id != id);
        if self.recordings.len() == before {
            return Err(RepositoryError::UnknownRecording(id));
        }
        self.scores.retain(|s| s.recording_id != id);
        Ok(())
    }

    pub fn import_topic(
        &mut self,
        name: &str,
        description: &str,
        items: Vec<PracticeItem>,
        created_at: NaiveDateTime,
    ) -> TopicId {
        let topic_id = self.topics.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.topics.push(Topic {
            id: topic_id,
            name: name.to_string(),
            description: description.to_string(),
            created_at,
            is_preset: false,
        });
        self.add_items(topic_id, items);
        topic_id
    }

    /// Append items to an existing topic, assigning ids after the current max.
    pub fn add_items(&mut self, topic_id: TopicId, items: Vec<PracticeItem>) {
        let first_id = self.items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        for (offset, item) in items.into_iter().enumerate() {
            self.items.push(PracticeItem {
                id: first_id + offset as u32,
                topic_id,
                ..item
            });
        }
    }

    pub fn delete_topic(&mut self, id: TopicId) -> Result<(), RepositoryError> {
        let topic = self
            .topics
            .iter()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::UnknownTopic(id))?;
        if topic.is_preset {
            return Err(RepositoryError::PresetTopic(id));
        }

        let removed_items: Vec<_> = self
            .items
            .iter()
            .filter(|i| i.topic_id == id)
            .map(|i| i.id)
            .collect();
        let removed_recordings: Vec<_> = self
            .recordings
            .iter()
            .filter(|r| removed_items.contains(&r.item_id))
            .map(|r| r.id)
            .collect();

        self.scores
            .retain(|s| !removed_recordings.contains(&s.recording_id));
        self.recordings.retain(|r| !removed_items.contains(&r.item_id));
        self.items.retain(|i| i.topic_id != id);
        self.topics.retain(|t| t.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn score(recording_id: RecordingId, value: f64) -> ScoreRecord {
        ScoreRecord {
            recording_id,
            transcribed_text: "text".to_string(),
            match_score: value,
            mismatched_words: Vec::new(),
        }
    }

    fn library_with_items() -> Library {
        let mut lib = Library::new(at(1, 0));
        lib.add_items(
            PRESET_TOPIC_ID,
            vec![
                PracticeItem::new(0, "one", "一", 0),
                PracticeItem::new(0, "two", "二", 0),
            ],
        );
        lib
    }

    #[test]
    fn test_new_has_preset_topic() {
        let lib = Library::new(at(1, 0));
        assert_eq!(lib.topics.len(), 1);
        assert!(lib.topics[0].is_preset);
        assert_eq!(lib.topics[0].id, PRESET_TOPIC_ID);
    }

    #[test]
    fn test_add_items_assigns_sequential_ids() {
        let lib = library_with_items();
        let ids: Vec<_> = lib.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(lib.items.iter().all(|i| i.topic_id == PRESET_TOPIC_ID));
    }

    #[test]
    fn test_import_topic_continues_after_max_id() {
        let mut lib = library_with_items();
        let topic_id = lib.import_topic(
            "Poems",
            "classical",
            vec![PracticeItem::new(0, "p", "春眠不觉晓", 0)],
            at(2, 0),
        );
        assert_eq!(topic_id, 2);
        let imported = lib.items.last().unwrap();
        assert_eq!(imported.id, 3);
        assert_eq!(imported.topic_id, 2);
    }

    #[test]
    fn test_save_recording_rejects_unknown_item() {
        let mut lib = library_with_items();
        let rec = Recording::new(99, at(3, 9), PathBuf::from("x.m4a"));
        let id = rec.id;
        let err = lib.save_recording(rec, score(id, 1.0)).unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownItem(99)));
    }

    #[test]
    fn test_save_recording_rejects_duplicate() {
        let mut lib = library_with_items();
        let rec = Recording::new(1, at(3, 9), PathBuf::from("x.m4a"));
        let id = rec.id;
        lib.save_recording(rec.clone(), score(id, 1.0)).unwrap();
        let err = lib.save_recording(rec, score(id, 1.0)).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateRecording(_)));
    }

    #[test]
    fn test_save_recording_links_score_to_recording() {
        let mut lib = library_with_items();
        let rec = Recording::new(1, at(3, 9), PathBuf::from("x.m4a"));
        let id = rec.id;
        lib.save_recording(rec, score(Uuid::nil(), 0.5)).unwrap();
        assert_eq!(lib.scores[0].recording_id, id);
    }

    #[test]
    fn test_delete_recording_removes_score() {
        let mut lib = library_with_items();
        let rec = Recording::new(1, at(3, 9), PathBuf::from("x.m4a"));
        let id = rec.id;
        lib.save_recording(rec, score(id, 0.8)).unwrap();
        lib.delete_recording(id).unwrap();
        assert!(lib.recordings.is_empty());
        assert!(lib.scores.is_empty());
    }

    #[test]
    fn test_delete_unknown_recording_fails() {
        let mut lib = library_with_items();
        assert!(matches!(
            lib.delete_recording(Uuid::nil()),
            Err(RepositoryError::UnknownRecording(_))
        ));
    }

    #[test]
    fn test_delete_preset_topic_fails() {
        let mut lib = library_with_items();
        assert!(matches!(
            lib.delete_topic(PRESET_TOPIC_ID),
            Err(RepositoryError::PresetTopic(PRESET_TOPIC_ID))
        ));
    }

    #[test]
    fn test_delete_topic_cascades() {
        let mut lib = library_with_items();
        let topic_id = lib.import_topic(
            "Poems",
            "",
            vec![PracticeItem::new(0, "p", "春眠不觉晓", 0)],
            at(2, 0),
        );
        let rec = Recording::new(3, at(3, 9), PathBuf::from("x.m4a"));
        let id = rec.id;
        lib.save_recording(rec, score(id, 0.9)).unwrap();
        let kept = Recording::new(1, at(3, 10), PathBuf::from("y.m4a"));
        let kept_id = kept.id;
        lib.save_recording(kept, score(kept_id, 0.7)).unwrap();

        lib.delete_topic(topic_id).unwrap();

        assert_eq!(lib.topics.len(), 1);
        assert_eq!(lib.items.len(), 2);
        assert_eq!(lib.recordings.len(), 1);
        assert_eq!(lib.scores.len(), 1);
        assert_eq!(lib.scores[0].recording_id, kept_id);
    }

    #[test]
    fn test_delete_unknown_topic_fails() {
        let mut lib = library_with_items();
        assert!(matches!(
            lib.delete_topic(42),
            Err(RepositoryError::UnknownTopic(42))
        ));
    }
}
