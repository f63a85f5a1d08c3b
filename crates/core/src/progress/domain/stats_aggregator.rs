use std::collections::HashMap;

use crate::library::domain::practice_item::{ItemId, PracticeItem};
use crate::library::domain::recording::Recording;
use crate::library::domain::score_record::ScoreRecord;
use crate::scoring::domain::score_computer::to_percent;

/// Per-item progress, derived on demand and never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PracticeStats {
    pub item_id: ItemId,
    pub practice_count: u32,
    /// Best score as an integer percentage, 0 when there are no scores.
    pub highest_score: u32,
}

impl PracticeStats {
    pub fn empty(item_id: ItemId) -> Self {
        Self {
            item_id,
            ..Default::default()
        }
    }

    fn record(&mut self, match_score: f64) {
        self.practice_count += 1;
        self.highest_score = self.highest_score.max(to_percent(match_score));
    }
}

pub struct StatsAggregator;

impl StatsAggregator {
    /// Fold `(item, match_score)` pairs into per-item stats.
    ///
    /// The result does not depend on input order.
    pub fn aggregate<I>(records: I) -> HashMap<ItemId, PracticeStats>
    where
        I: IntoIterator<Item = (ItemId, f64)>,
    {
        let mut stats: HashMap<ItemId, PracticeStats> = HashMap::new();
        for (item_id, match_score) in records {
            stats
                .entry(item_id)
                .or_insert_with(|| PracticeStats::empty(item_id))
                .record(match_score);
        }
        stats
    }

    /// Join scores to their recordings and items.
    ///
    /// Every known item gets an entry, with default stats when it has no
    /// scores. Scores whose recording is unknown, and recordings whose item
    /// is unknown, are skipped with a warning.
    pub fn from_history(
        items: &[PracticeItem],
        recordings: &[Recording],
        scores: &[ScoreRecord],
    ) -> HashMap<ItemId, PracticeStats> {
        let item_by_recording: HashMap<_, _> =
            recordings.iter().map(|r| (r.id, r.item_id)).collect();

        let mut stats: HashMap<ItemId, PracticeStats> = items
            .iter()
            .map(|i| (i.id, PracticeStats::empty(i.id)))
            .collect();

        for score in scores {
            let Some(item_id) = item_by_recording.get(&score.recording_id) else {
                log::warn!(
                    "Skipping score for unknown recording {}",
                    score.recording_id
                );
                continue;
            };
            match stats.get_mut(item_id) {
                Some(entry) => entry.record(score.match_score),
                None => log::warn!(
                    "Skipping score for recording {} of unknown item {item_id}",
                    score.recording_id
                ),
            }
        }

        stats
    }
}
