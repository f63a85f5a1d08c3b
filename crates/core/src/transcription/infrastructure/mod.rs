pub mod sidecar_transcriber;
pub mod static_transcriber;
