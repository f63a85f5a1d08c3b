use std::fs;
use std::path::PathBuf;

use crate::library::domain::recording::Recording;
use crate::transcription::domain::transcriber::Transcriber;

pub const SIDECAR_EXTENSION: &str = "txt";

/// Reads the transcript an external recognizer wrote next to the audio file
/// (`take.m4a` -> `take.m4a.txt`).
#[derive(Clone, Debug, Default)]
pub struct SidecarTranscriber;

impl SidecarTranscriber {
    pub fn sidecar_path(recording: &Recording) -> PathBuf {
        let mut name = recording.file_path.clone().into_os_string();
        name.push(".");
        name.push(SIDECAR_EXTENSION);
        PathBuf::from(name)
    }
}

impl Transcriber for SidecarTranscriber {
    fn transcribe(&self, recording: &Recording) -> Result<String, Box<dyn std::error::Error>> {
        let path = Self::sidecar_path(recording);
        let text = fs::read_to_string(&path)
            .map_err(|e| format!("Transcript not found at {}: {e}", path.display()))?;
        Ok(text.trim().to_string())
    }
}
