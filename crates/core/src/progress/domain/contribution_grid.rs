//! Calendar heatmap of daily practice, bucketed into Monday-first weeks.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};

use crate::library::domain::recording::Recording;
use crate::library::domain::score_record::ScoreRecord;

pub const DEFAULT_CONTRIBUTION_MONTHS: u32 = 8;

/// Upper bounds (exclusive) of intensity levels 1, 2 and 3; anything higher is 4.
const INTENSITY_THRESHOLDS: [u32; 3] = [60, 75, 85];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContributionCell {
    pub date: NaiveDate,
    /// Best score of the day as an integer percentage, 0 without practice.
    pub score: u32,
    pub practice_count: u32,
}

impl ContributionCell {
    /// Heatmap level 0..=4.
    pub fn intensity(&self) -> u8 {
        if self.practice_count == 0 {
            return 0;
        }
        let below = INTENSITY_THRESHOLDS
            .iter()
            .position(|&limit| self.score < limit)
            .unwrap_or(INTENSITY_THRESHOLDS.len());
        below as u8 + 1
    }
}

/// Seven day slots, index 0 = Monday. `None` marks a day outside the range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContributionWeek {
    pub days: [Option<ContributionCell>; 7],
}

impl ContributionWeek {
    pub fn cells(&self) -> impl Iterator<Item = &ContributionCell> {
        self.days.iter().flatten()
    }

    fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }
}

/// Per-day best score and practice count derived from the history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyTotals {
    pub best_score: HashMap<NaiveDate, u32>,
    pub practice_count: HashMap<NaiveDate, u32>,
}

impl DailyTotals {
    /// Counts every recording on its day. The day's best score is the
    /// highest `match_score` among that day's scored recordings, truncated to
    /// an integer percentage.
    pub fn collect(recordings: &[Recording], scores: &[ScoreRecord]) -> Self {
        let day_by_recording: HashMap<_, _> =
            recordings.iter().map(|r| (r.id, r.day())).collect();

        let mut totals = Self::default();
        for r in recordings {
            *totals.practice_count.entry(r.day()).or_insert(0) += 1;
        }
        for s in scores {
            let Some(day) = day_by_recording.get(&s.recording_id) else {
                log::warn!("Skipping score for unknown recording {}", s.recording_id);
                continue;
            };
            let percent = (s.match_score * 100.0).clamp(0.0, 100.0) as u32;
            let best = totals.best_score.entry(*day).or_insert(0);
            *best = (*best).max(percent);
        }
        totals
    }
}

/// Date range covering the last `months` calendar months up to `today`.
pub fn contribution_window(today: NaiveDate, months: u32) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(today);
    (start, today)
}

/// Distinct abbreviated month names of all cells, in order of first appearance.
pub fn month_labels(weeks: &[ContributionWeek]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for cell in weeks.iter().flat_map(ContributionWeek::cells) {
        let label = cell.date.format("%b").to_string();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

pub struct ContributionIndexer;

impl ContributionIndexer {
    /// One cell per day in `[start, end]`, grouped into Monday-first weeks in
    /// chronological order. The first and last week are padded with `None`.
    pub fn build_grid(
        start: NaiveDate,
        end: NaiveDate,
        daily_best: &HashMap<NaiveDate, u32>,
        daily_count: &HashMap<NaiveDate, u32>,
    ) -> Vec<ContributionWeek> {
        let mut weeks = Vec::new();
        let mut current = ContributionWeek::default();

        for date in start.iter_days().take_while(|d| *d <= end) {
            let slot = date.weekday().num_days_from_monday() as usize;
            let practice_count = daily_count.get(&date).copied().unwrap_or(0);
            let score = if practice_count == 0 {
                0
            } else {
                daily_best.get(&date).copied().unwrap_or(0)
            };
            current.days[slot] = Some(ContributionCell {
                date,
                score,
                practice_count,
            });

            if slot == 6 {
                weeks.push(current);
                current = ContributionWeek::default();
            }
        }

        if !current.is_empty() {
            weeks.push(current);
        }
        weeks
    }

    pub fn build_from_totals(
        start: NaiveDate,
        end: NaiveDate,
        totals: &DailyTotals,
    ) -> Vec<ContributionWeek> {
        Self::build_grid(start, end, &totals.best_score, &totals.practice_count)
    }
}
