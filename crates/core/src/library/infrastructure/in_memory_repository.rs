use chrono::Local;

use crate::library::domain::library::Library;
use crate::library::domain::practice_item::PracticeItem;
use crate::library::domain::practice_repository::{
    HistorySnapshot, PracticeRepository, RepositoryError,
};
use crate::library::domain::recording::{Recording, RecordingId};
use crate::library::domain::score_record::ScoreRecord;
use crate::library::domain::topic::TopicId;

/// Repository that keeps the library in memory only.
#[derive(Clone, Debug)]
pub struct InMemoryRepository {
    library: Library,
}

impl InMemoryRepository {
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(Library::new(Local::now().naive_local()))
    }
}

impl PracticeRepository for InMemoryRepository {
    fn snapshot(&self) -> Result<HistorySnapshot, RepositoryError> {
        Ok(self.library.snapshot())
    }

    fn save_recording(
        &mut self,
        recording: Recording,
        score: ScoreRecord,
    ) -> Result<(), RepositoryError> {
        self.library.save_recording(recording, score)
    }

    fn delete_recording(&mut self, id: RecordingId) -> Result<(), RepositoryError> {
        self.library.delete_recording(id)
    }

    fn import_topic(
        &mut self,
        name: &str,
        description: &str,
        items: Vec<PracticeItem>,
    ) -> Result<TopicId, RepositoryError> {
        Ok(self
            .library
            .import_topic(name, description, items, Local::now().naive_local()))
    }

    fn delete_topic(&mut self, id: TopicId) -> Result<(), RepositoryError> {
        self.library.delete_topic(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::domain::topic::PRESET_TOPIC_ID;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_default_has_only_preset_topic() {
        let repo = InMemoryRepository::default();
        let topics = repo.topics().unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].topic.id, PRESET_TOPIC_ID);
        assert!(repo.items().unwrap().is_empty());
    }

    #[test]
    fn test_trait_defaults_read_through_snapshot() {
        let mut repo = InMemoryRepository::default();
        let topic_id = repo
            .import_topic("Poems", "", vec![PracticeItem::new(0, "p", "床前明月光", 0)])
            .unwrap();
        let item = repo.item(1).unwrap().unwrap();
        assert_eq!(item.topic_id, topic_id);

        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let rec = Recording::new(1, at, PathBuf::from("r.m4a"));
        let id = rec.id;
        let score = ScoreRecord {
            recording_id: id,
            transcribed_text: "床前明月光".to_string(),
            match_score: 1.0,
            mismatched_words: Vec::new(),
        };
        repo.save_recording(rec, score).unwrap();

        assert_eq!(repo.recordings_for(1).unwrap().len(), 1);
        assert!(repo.recordings_for(2).unwrap().is_empty());
        assert_eq!(repo.score_for(id).unwrap().unwrap().match_score, 1.0);
        assert_eq!(repo.scores().unwrap().len(), 1);
    }
}
