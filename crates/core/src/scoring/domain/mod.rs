pub mod char_sequence;
pub mod reading_report;
pub mod score_computer;
pub mod sequence_aligner;
pub mod span;
pub mod text_normalizer;
