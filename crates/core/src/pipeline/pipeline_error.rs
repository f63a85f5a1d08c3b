use thiserror::Error;

use crate::library::domain::practice_repository::RepositoryError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("passage of {length} characters exceeds the limit of {limit}")]
    PassageTooLong { length: usize, limit: usize },
    #[error("transcription failed: {0}")]
    Transcription(#[source] Box<dyn std::error::Error>),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
