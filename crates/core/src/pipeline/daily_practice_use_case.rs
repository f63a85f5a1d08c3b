use chrono::NaiveDate;
use rand::Rng;

use crate::library::domain::practice_item::PracticeItem;
use crate::library::domain::practice_repository::PracticeRepository;
use crate::progress::domain::daily_scheduler::{DailyScheduler, SchedulerState, TodaysRecordings};

use super::pipeline_error::PipelineError;

/// Picks the item to offer as today's practice.
pub struct DailyPracticeUseCase<'a> {
    repository: &'a dyn PracticeRepository,
}

impl<'a> DailyPracticeUseCase<'a> {
    pub fn new(repository: &'a dyn PracticeRepository) -> Self {
        Self { repository }
    }

    pub fn execute<R: Rng + ?Sized>(
        &self,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Option<PracticeItem>, PipelineError> {
        let snapshot = self.repository.snapshot()?;
        let todays = TodaysRecordings::collect(&snapshot.recordings, today);
        let state = DailyScheduler::state(&snapshot.items, &todays);
        let pick = DailyScheduler::select_daily_item(&snapshot.items, &todays, rng).cloned();

        match (&pick, state) {
            (Some(item), SchedulerState::HasTodayPick(_)) => {
                log::info!("Continuing today's practice: item {} ({})", item.id, item.title)
            }
            (Some(item), SchedulerState::NeedsPick) => {
                log::info!("Picked daily practice: item {} ({})", item.id, item.title)
            }
            (None, _) => log::info!("No practice item left to offer for {today}"),
        }
        Ok(pick)
    }
}
