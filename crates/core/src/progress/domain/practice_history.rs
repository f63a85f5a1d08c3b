use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::library::domain::practice_item::{ItemId, PracticeItem};
use crate::library::domain::recording::Recording;

#[derive(Clone, Debug, PartialEq)]
pub struct PracticedItem {
    pub item: PracticeItem,
    pub recording_count: usize,
    pub latest: NaiveDateTime,
}

/// Everything practiced on one calendar day.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyPractices {
    pub date: NaiveDate,
    /// Most recently practiced first.
    pub items: Vec<PracticedItem>,
}

/// Group recordings by day, newest day first.
///
/// Recordings of items not in `items` are skipped.
pub fn practice_history(items: &[PracticeItem], recordings: &[Recording]) -> Vec<DailyPractices> {
    let mut by_day: BTreeMap<NaiveDate, BTreeMap<ItemId, (usize, NaiveDateTime)>> =
        BTreeMap::new();
    for r in recordings {
        by_day
            .entry(r.day())
            .or_default()
            .entry(r.item_id)
            .and_modify(|(count, latest)| {
                *count += 1;
                *latest = (*latest).max(r.recorded_at);
            })
            .or_insert((1, r.recorded_at));
    }

    by_day
        .into_iter()
        .rev()
        .filter_map(|(date, per_item)| {
            let mut practiced: Vec<PracticedItem> = per_item
                .into_iter()
                .filter_map(|(item_id, (recording_count, latest))| {
                    let item = items.iter().find(|i| i.id == item_id)?;
                    Some(PracticedItem {
                        item: item.clone(),
                        recording_count,
                        latest,
                    })
                })
                .collect();
            if practiced.is_empty() {
                return None;
            }
            practiced.sort_by(|a, b| b.latest.cmp(&a.latest).then(a.item.id.cmp(&b.item.id)));
            Some(DailyPractices {
                date,
                items: practiced,
            })
        })
        .collect()
}
