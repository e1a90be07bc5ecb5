use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of one command invocation and its outcome, written to the
/// history directory as JSON. Append-only; nothing in the application
/// reads these back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub command: String,
    pub opts: Map<String, Value>,
    pub date: String,
    pub error: Option<String>,
    pub stdout: String,
    pub stderr: String,
    pub full_command: String,
}

/// `~/.fslgui/.guihistory`
pub fn default_dir() -> Result<PathBuf, String> {
    dirs_next::home_dir()
        .map(|home| home.join(".fslgui").join(".guihistory"))
        .ok_or_else(|| "unable to determine the user home directory".to_string())
}

/// Writes a history record into `dir`, creating the directory if
/// needed, and returns the path it was written to. Persistence failure
/// is returned to the caller rather than logged and dropped.
pub fn save(dir: &Path, when: &NaiveDateTime, record: &HistoryRecord) -> Result<PathBuf, String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("unable to create history directory {}: {e}", dir.display()))?;

    let body = serde_json::to_string(record)
        .map_err(|e| format!("unable to serialize history record: {e}"))?;

    let stem = file_stem(when, &record.command);
    let mut path = dir.join(format!("{stem}.json"));
    // Two identical commands finishing in the same millisecond would
    // otherwise overwrite each other.
    let mut attempt = 1;
    while path.exists() {
        path = dir.join(format!("{stem}-{attempt}.json"));
        attempt += 1;
    }

    fs::write(&path, body)
        .map_err(|e| format!("unable to write history record {}: {e}", path.display()))?;
    Ok(path)
}

/// Timestamp components down to the millisecond, no zero-padding,
/// followed by the command name.
pub(crate) fn file_stem(when: &NaiveDateTime, command: &str) -> String {
    format!(
        "{}-{}-{}_{}-{}-{}-{}_{}",
        when.year(),
        when.month(),
        when.day(),
        when.hour(),
        when.minute(),
        when.second(),
        when.and_utc().timestamp_subsec_millis(),
        command
    )
}
