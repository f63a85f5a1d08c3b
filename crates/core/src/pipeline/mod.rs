pub mod daily_practice_use_case;
pub mod pipeline_error;
pub mod progress_report_use_case;
pub mod score_recording_use_case;
