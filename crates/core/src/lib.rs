pub mod library;
pub mod pipeline;
pub mod progress;
pub mod scoring;
pub mod transcription;
