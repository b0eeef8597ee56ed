use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::data::log::{numeric, Document, LogHistory, Record};

/// Why an upload was rejected. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Parse(String),

    #[error("log_history must be an array")]
    NotAnArray,

    #[error("Each log_history entry must have numeric epoch or step")]
    MissingAxis,
}

pub type IngestResult<T> = Result<T, IngestError>;

/// A validated upload.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub log_history: LogHistory,
    pub document: Document,
}

/// Parse and validate an uploaded document.
///
/// Only the minimal shape is checked: `log_history` must be an array whose
/// entries all carry a numeric `epoch` or `step`. Every other value passes
/// through untouched.
pub fn ingest(raw: &str) -> IngestResult<Ingested> {
    let document: Document =
        serde_json::from_str(raw).map_err(|e| IngestError::Parse(e.to_string()))?;

    let entries = match document.get("log_history") {
        Some(Value::Array(entries)) => entries,
        _ => return Err(IngestError::NotAnArray),
    };

    let log_history = records(entries).ok_or(IngestError::MissingAxis)?;

    Ok(Ingested {
        log_history,
        document,
    })
}

/// Decode UTF-8 then [`ingest`].
pub fn ingest_bytes(bytes: &[u8]) -> IngestResult<Ingested> {
    let text = std::str::from_utf8(bytes).map_err(|e| IngestError::Parse(e.to_string()))?;
    ingest(text)
}

/// Read a log file from disk and [`ingest_bytes`] it. Blocks, so the app calls
/// this from a worker thread.
pub fn read_log_file(path: &Path) -> IngestResult<Ingested> {
    let bytes = std::fs::read(path)?;
    ingest_bytes(&bytes)
}

/// All-or-nothing: one entry without a numeric axis rejects the whole array.
fn records(entries: &[Value]) -> Option<LogHistory> {
    let all_valid = entries.iter().all(|entry| match entry {
        Value::Object(record) => has_axis(record),
        _ => false,
    });
    if !all_valid {
        return None;
    }

    Some(
        entries
            .iter()
            .filter_map(|entry| entry.as_object().cloned())
            .collect(),
    )
}

fn has_axis(record: &Record) -> bool {
    numeric(record, "epoch").is_some() || numeric(record, "step").is_some()
}
