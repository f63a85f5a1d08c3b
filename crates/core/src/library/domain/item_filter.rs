//! Composable predicates for practice-item lists.
//!
//! Filters combine with [`ItemFilter::and`]; [`recent_items`] is separate
//! because it orders and truncates rather than only selecting.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::practice_item::{ItemId, PracticeItem};
use super::recording::Recording;
use super::topic::TopicId;

pub struct ItemFilter<'a> {
    predicate: Box<dyn Fn(&PracticeItem) -> bool + 'a>,
}

impl<'a> ItemFilter<'a> {
    pub fn all() -> Self {
        Self {
            predicate: Box::new(|_| true),
        }
    }

    /// Case-insensitive title substring match. An empty query matches all.
    pub fn search(query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        Self {
            predicate: Box::new(move |item| {
                needle.is_empty() || item.title.to_lowercase().contains(&needle)
            }),
        }
    }

    pub fn topic(topic_id: TopicId) -> Self {
        Self {
            predicate: Box::new(move |item| item.topic_id == topic_id),
        }
    }

    /// Items with no recording at all.
    pub fn unread(recordings: &'a [Recording]) -> Self {
        Self {
            predicate: Box::new(move |item| !recordings.iter().any(|r| r.item_id == item.id)),
        }
    }

    pub fn and(self, other: ItemFilter<'a>) -> Self {
        Self {
            predicate: Box::new(move |item| (self.predicate)(item) && (other.predicate)(item)),
        }
    }

    pub fn matches(&self, item: &PracticeItem) -> bool {
        (self.predicate)(item)
    }

    pub fn apply<'i>(&self, items: &'i [PracticeItem]) -> Vec<&'i PracticeItem> {
        items.iter().filter(|i| self.matches(i)).collect()
    }
}

/// Items that have been recorded, most recently practiced first.
pub fn recent_items<'i>(
    items: &'i [PracticeItem],
    recordings: &[Recording],
    limit: usize,
) -> Vec<&'i PracticeItem> {
    let mut latest: HashMap<ItemId, NaiveDateTime> = HashMap::new();
    for r in recordings {
        latest
            .entry(r.item_id)
            .and_modify(|t| *t = (*t).max(r.recorded_at))
            .or_insert(r.recorded_at);
    }

    let mut recent: Vec<(&PracticeItem, NaiveDateTime)> = items
        .iter()
        .filter_map(|i| latest.get(&i.id).map(|t| (i, *t)))
        .collect();
    recent.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));
    recent.into_iter().take(limit).map(|(i, _)| i).collect()
}
