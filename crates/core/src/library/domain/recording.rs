use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::practice_item::ItemId;

pub type RecordingId = Uuid;

/// One read-aloud attempt at a practice item.
///
/// `recorded_at` is wall-clock time in the user's local calendar; the caller
/// decides the timezone, so day boundaries are the caller's.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: RecordingId,
    pub item_id: ItemId,
    pub recorded_at: NaiveDateTime,
    #[serde(default)]
    pub duration_secs: f64,
    pub file_path: PathBuf,
    #[serde(default)]
    pub note: Option<String>,
}

impl Recording {
    pub fn new(item_id: ItemId, recorded_at: NaiveDateTime, file_path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            recorded_at,
            duration_secs: 0.0,
            file_path,
            note: None,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.recorded_at.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_is_local_calendar_date() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let r = Recording::new(1, at, PathBuf::from("a.m4a"));
        assert_eq!(r.day(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let a = Recording::new(1, at, PathBuf::from("a.m4a"));
        let b = Recording::new(1, at, PathBuf::from("b.m4a"));
        assert_ne!(a.id, b.id);
    }
}
