// Corpus loading — JSON poem files to cleaned, space-joined token strings.

pub mod loader;
pub mod noise;

pub use loader::{load_corpus, Corpus, LoadOptions, SkipReason, SkippedRecord};
pub use noise::{segment, NoiseFilter};
