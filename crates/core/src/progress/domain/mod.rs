pub mod contribution_grid;
pub mod daily_scheduler;
pub mod practice_history;
pub mod stats_aggregator;
