use crate::models::{StoreError, StoreResult, record_from_json};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tally_shared_models::FollowerRecord;
use tracing::{debug, warn};

pub const DEFAULT_OUTPUT: &str = "followers.json";

/// Previous record at `path`.
///
/// A missing, unreadable or malformed file is the same as no prior state.
pub fn read_record(path: &Path) -> FollowerRecord {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no previous record");
            return FollowerRecord::default();
        }
    };

    match serde_json::from_str::<Map<String, Value>>(&text) {
        Ok(doc) => record_from_json(&doc),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed previous record");
            FollowerRecord::default()
        }
    }
}

/// Writes `record` as indented JSON with a trailing newline.
///
/// The document goes to a sibling temp file first and is renamed over
/// `path`, so a reader never sees half a record.
pub fn write_record(path: &Path, record: &FollowerRecord) -> StoreResult<()> {
    let mut body = serde_json::to_string_pretty(record)?;
    body.push('\n');

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
    }

    let tmp = temp_path(path);
    fs::write(&tmp, body).map_err(|source| io_error(&tmp, source))?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        io_error(path, source)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_OUTPUT.into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
