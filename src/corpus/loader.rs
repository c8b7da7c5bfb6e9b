// Corpus loader — glob over JSON files, segment each record's text field.
//
// Each file is a JSON array of poem records. A record missing its text field
// (or carrying something other than a list of strings there) is skipped and
// reported; the rest of the file and the remaining files still load. Any
// I/O or JSON syntax failure aborts the whole load.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::noise::{segment, NoiseFilter};

/// Field holding a poem's lines in the chinese-poetry JSON layout.
pub const DEFAULT_TEXT_FIELD: &str = "paragraphs";

/// Options controlling how records are read.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Record field that holds the list of paragraph strings
    pub text_field: String,
    /// Characters dropped before tokens are joined
    pub filter: NoiseFilter,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            filter: NoiseFilter::default(),
        }
    }
}

/// Why a record contributed nothing to the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The record has no text field (or is not an object at all)
    MissingField,
    /// The text field exists but is not a list of strings
    NotTextList,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingField => write!(f, "missing text field"),
            SkipReason::NotTextList => write!(f, "text field is not a list of strings"),
        }
    }
}

/// A record that was skipped during loading, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub path: PathBuf,
    /// Position of the record within its file's array
    pub index: usize,
    pub reason: SkipReason,
    pub record: Value,
}

/// The cleaned corpus: one token string per successfully read record.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Token strings in file/record encounter order
    pub documents: Vec<String>,
    pub skipped: Vec<SkippedRecord>,
    /// Number of files matched by the pattern
    pub files_read: usize,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total records seen, including skipped ones.
    pub fn records_seen(&self) -> usize {
        self.documents.len() + self.skipped.len()
    }
}

/// Outcome of reading a single record.
enum RecordOutcome {
    Document(String),
    Skip(SkipReason),
}

/// Load every JSON file matching `pattern` into a corpus.
pub fn load_corpus(pattern: &str, options: &LoadOptions) -> Result<Corpus> {
    let paths = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    let mut corpus = Corpus::default();
    for entry in paths {
        let path = entry.with_context(|| format!("Failed to read a path matching {pattern}"))?;
        load_file(&path, options, &mut corpus)?;
        corpus.files_read += 1;
    }

    if corpus.files_read == 0 {
        warn!(pattern, "No files matched the corpus pattern");
    }

    info!(
        files = corpus.files_read,
        documents = corpus.documents.len(),
        skipped = corpus.skipped.len(),
        "Corpus loaded"
    );

    Ok(corpus)
}

/// Parse one file and append its records to `corpus`.
fn load_file(path: &Path, options: &LoadOptions, corpus: &mut Corpus) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file {}", path.display()))?;
    let data: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed JSON in {}", path.display()))?;

    let records = match data {
        Value::Array(records) => records,
        other => anyhow::bail!(
            "Expected a JSON array of records in {}, found {}",
            path.display(),
            json_kind(&other)
        ),
    };

    debug!(path = %path.display(), records = records.len(), "Reading corpus file");

    for (index, record) in records.into_iter().enumerate() {
        match read_record(&record, options) {
            RecordOutcome::Document(doc) => corpus.documents.push(doc),
            RecordOutcome::Skip(reason) => {
                warn!(
                    path = %path.display(),
                    index,
                    %reason,
                    "Skipping record: {record}"
                );
                corpus.skipped.push(SkippedRecord {
                    path: path.to_path_buf(),
                    index,
                    reason,
                    record,
                });
            }
        }
    }

    Ok(())
}

fn read_record(record: &Value, options: &LoadOptions) -> RecordOutcome {
    let Some(field) = record.get(&options.text_field) else {
        return RecordOutcome::Skip(SkipReason::MissingField);
    };

    let Some(items) = field.as_array() else {
        return RecordOutcome::Skip(SkipReason::NotTextList);
    };

    let paragraphs: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
    match paragraphs {
        Some(paragraphs) => RecordOutcome::Document(segment(&paragraphs, &options.filter)),
        None => RecordOutcome::Skip(SkipReason::NotTextList),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
