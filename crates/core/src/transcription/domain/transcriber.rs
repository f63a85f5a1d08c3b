use crate::library::domain::recording::Recording;

/// Domain interface for speech-to-text.
///
/// The core only consumes the resulting text; audio handling stays with the
/// implementation.
pub trait Transcriber: Send {
    fn transcribe(&self, recording: &Recording) -> Result<String, Box<dyn std::error::Error>>;
}
