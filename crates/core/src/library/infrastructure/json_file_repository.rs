use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::library::domain::library::Library;
use crate::library::domain::practice_item::PracticeItem;
use crate::library::domain::practice_repository::{
    HistorySnapshot, PracticeRepository, RepositoryError,
};
use crate::library::domain::recording::{Recording, RecordingId};
use crate::library::domain::score_record::ScoreRecord;
use crate::library::domain::topic::TopicId;

/// Repository persisting the whole library as one JSON document.
///
/// Every mutation rewrites the file through a sibling temp file and a
/// rename, so a crash leaves either the old or the new document on disk.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    library: Library,
}

impl JsonFileRepository {
    /// Open `path`, creating an empty library there if the file is missing.
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        let library = if path.exists() {
            let json = fs::read_to_string(path).map_err(|source| RepositoryError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let library: Library = serde_json::from_str(&json)?;
            log::debug!(
                "Loaded {} items and {} recordings from {}",
                library.items.len(),
                library.recordings.len(),
                path.display()
            );
            library
        } else {
            log::info!("Creating new library at {}", path.display());
            let library = Library::new(Local::now().naive_local());
            write_atomically(path, &library)?;
            library
        };

        Ok(Self {
            path: path.to_path_buf(),
            library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a mutation and persist it. The in-memory state is left
    /// untouched when either step fails.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Library) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut next = self.library.clone();
        let value = change(&mut next)?;
        write_atomically(&self.path, &next)?;
        self.library = next;
        Ok(value)
    }
}

fn write_atomically(path: &Path, library: &Library) -> Result<(), RepositoryError> {
    let write_err = |source| RepositoryError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let json = serde_json::to_string_pretty(library)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;
    log::debug!("Saved library to {}", path.display());
    Ok(())
}

impl PracticeRepository for JsonFileRepository {
    fn snapshot(&self) -> Result<HistorySnapshot, RepositoryError> {
        Ok(self.library.snapshot())
    }

    fn save_recording(
        &mut self,
        recording: Recording,
        score: ScoreRecord,
    ) -> Result<(), RepositoryError> {
        self.commit(|lib| lib.save_recording(recording, score))
    }

    fn delete_recording(&mut self, id: RecordingId) -> Result<(), RepositoryError> {
        self.commit(|lib| lib.delete_recording(id))
    }

    fn import_topic(
        &mut self,
        name: &str,
        description: &str,
        items: Vec<PracticeItem>,
    ) -> Result<TopicId, RepositoryError> {
        let now = Local::now().naive_local();
        self.commit(|lib| Ok(lib.import_topic(name, description, items, now)))
    }

    fn delete_topic(&mut self, id: TopicId) -> Result<(), RepositoryError> {
        self.commit(|lib| lib.delete_topic(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn recording(item_id: u32) -> Recording {
        let at = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(20, 15, 0)
            .unwrap();
        Recording::new(item_id, at, PathBuf::from("take.m4a"))
    }

    fn score(recording: &Recording) -> ScoreRecord {
        ScoreRecord {
            recording_id: recording.id,
            transcribed_text: "疑是地上霜".to_string(),
            match_score: 0.8,
            mismatched_words: vec![crate::scoring::domain::span::Span::mismatched(1, 2)],
        }
    }

    #[test]
    fn test_open_missing_file_creates_library() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("library.json");
        let repo = JsonFileRepository::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(repo.path(), path.as_path());
        assert_eq!(repo.topics().unwrap().len(), 1);
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");

        let rec = recording(1);
        let id = rec.id;
        {
            let mut repo = JsonFileRepository::open(&path).unwrap();
            repo.import_topic("Poems", "Tang", vec![PracticeItem::new(0, "p", "床前明月光", 0)])
                .unwrap();
            let s = score(&rec);
            repo.save_recording(rec, s).unwrap();
        }

        let repo = JsonFileRepository::open(&path).unwrap();
        assert_eq!(repo.items().unwrap().len(), 1);
        let stored = repo.score_for(id).unwrap().unwrap();
        assert_eq!(stored.transcribed_text, "疑是地上霜");
        assert_eq!(stored.mismatched_words.len(), 1);
        assert_eq!(repo.recordings().unwrap()[0].recorded_at, recording(1).recorded_at);
    }

    #[test]
    fn test_failed_mutation_leaves_state_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        let mut repo = JsonFileRepository::open(&path).unwrap();

        let rec = recording(5);
        let s = score(&rec);
        assert!(repo.save_recording(rec, s).is_err());
        assert!(repo.recordings().unwrap().is_empty());

        let reopened = JsonFileRepository::open(&path).unwrap();
        assert!(reopened.recordings().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileRepository::open(&path),
            Err(RepositoryError::Json(_))
        ));
    }
}
