use serde_json::{Map, Value};
use std::path::PathBuf;
use tally_shared_models::{FollowerRecord, Platform};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Builds a record from a previously written document.
///
/// Only the platform counts matter for fallback. A count is taken when it is
/// a non-negative integer or a numeric string; anything else is skipped.
pub fn record_from_json(doc: &Map<String, Value>) -> FollowerRecord {
    let mut record = FollowerRecord::default();

    for platform in Platform::ALL {
        let count = match doc.get(platform.as_str()) {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        if let Some(count) = count {
            record.counts.insert(platform, count);
        }
    }

    if let Some(Value::String(ts)) = doc.get("updated_at_utc") {
        record.updated_at_utc = Some(ts.clone());
    }

    if let Some(Value::Object(sources)) = doc.get("source") {
        for (key, value) in sources {
            if let (Ok(platform), Some(label)) = (key.parse::<Platform>(), value.as_str()) {
                record.source.insert(platform, label.to_string());
            }
        }
    }

    record
}
