use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::library::domain::practice_item::{ItemId, PracticeItem};
use crate::library::domain::recording::Recording;

/// Latest recording time per item, restricted to one calendar day.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodaysRecordings {
    latest: HashMap<ItemId, NaiveDateTime>,
}

impl TodaysRecordings {
    pub fn collect(recordings: &[Recording], today: NaiveDate) -> Self {
        let mut latest: HashMap<ItemId, NaiveDateTime> = HashMap::new();
        for r in recordings.iter().filter(|r| r.day() == today) {
            latest
                .entry(r.item_id)
                .and_modify(|t| *t = (*t).max(r.recorded_at))
                .or_insert(r.recorded_at);
        }
        Self { latest }
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.latest.contains_key(&item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Item among `items` with the most recent recording today.
    fn most_recent<'a>(&self, items: &'a [PracticeItem]) -> Option<&'a PracticeItem> {
        items
            .iter()
            .filter_map(|i| self.latest.get(&i.id).map(|t| (i, *t)))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.id.cmp(&a.0.id)))
            .map(|(i, _)| i)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// An item was already recorded today; it stays the daily pick.
    HasTodayPick(ItemId),
    NeedsPick,
}

pub struct DailyScheduler;

impl DailyScheduler {
    pub fn state(items: &[PracticeItem], today: &TodaysRecordings) -> SchedulerState {
        match today.most_recent(items) {
            Some(item) => SchedulerState::HasTodayPick(item.id),
            None => SchedulerState::NeedsPick,
        }
    }

    /// Today's practice item.
    ///
    /// Returns the most recently recorded item if one was practiced today.
    /// Otherwise picks uniformly, via `rng`, among items not practiced today.
    /// `None` means nothing is left to offer.
    pub fn select_daily_item<'a, R: Rng + ?Sized>(
        items: &'a [PracticeItem],
        today: &TodaysRecordings,
        rng: &mut R,
    ) -> Option<&'a PracticeItem> {
        if let Some(item) = today.most_recent(items) {
            return Some(item);
        }

        let candidates: Vec<&PracticeItem> =
            items.iter().filter(|i| !today.contains(i.id)).collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}
