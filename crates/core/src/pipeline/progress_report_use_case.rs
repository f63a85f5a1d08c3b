use chrono::NaiveDate;

use crate::library::domain::practice_item::PracticeItem;
use crate::library::domain::practice_repository::PracticeRepository;
use crate::progress::domain::contribution_grid::{
    contribution_window, month_labels, ContributionIndexer, ContributionWeek, DailyTotals,
};
use crate::progress::domain::practice_history::{practice_history, DailyPractices};
use crate::progress::domain::stats_aggregator::{PracticeStats, StatsAggregator};

use super::pipeline_error::PipelineError;

/// Contribution heatmap for a date window.
#[derive(Clone, Debug, PartialEq)]
pub struct ContributionReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weeks: Vec<ContributionWeek>,
    pub month_labels: Vec<String>,
}

/// Derives progress views from the stored history. Nothing here is persisted.
pub struct ProgressReportUseCase<'a> {
    repository: &'a dyn PracticeRepository,
    contribution_months: u32,
}

impl<'a> ProgressReportUseCase<'a> {
    pub fn new(repository: &'a dyn PracticeRepository, contribution_months: u32) -> Self {
        Self {
            repository,
            contribution_months,
        }
    }

    /// Every item with its stats, ordered by item id.
    pub fn item_stats(&self) -> Result<Vec<(PracticeItem, PracticeStats)>, PipelineError> {
        let snapshot = self.repository.snapshot()?;
        let stats =
            StatsAggregator::from_history(&snapshot.items, &snapshot.recordings, &snapshot.scores);

        let mut rows: Vec<(PracticeItem, PracticeStats)> = snapshot
            .items
            .into_iter()
            .map(|item| {
                let s = stats
                    .get(&item.id)
                    .copied()
                    .unwrap_or_else(|| PracticeStats::empty(item.id));
                (item, s)
            })
            .collect();
        rows.sort_by_key(|(item, _)| item.id);
        Ok(rows)
    }

    /// Heatmap of the configured number of months ending on `today`.
    pub fn contributions(&self, today: NaiveDate) -> Result<ContributionReport, PipelineError> {
        let snapshot = self.repository.snapshot()?;
        let (start, end) = contribution_window(today, self.contribution_months);
        let totals = DailyTotals::collect(&snapshot.recordings, &snapshot.scores);
        let weeks = ContributionIndexer::build_from_totals(start, end, &totals);
        log::debug!("Built {} contribution weeks from {start} to {end}", weeks.len());

        Ok(ContributionReport {
            start,
            end,
            month_labels: month_labels(&weeks),
            weeks,
        })
    }

    pub fn history(&self) -> Result<Vec<DailyPractices>, PipelineError> {
        let snapshot = self.repository.snapshot()?;
        Ok(practice_history(&snapshot.items, &snapshot.recordings))
    }
}
