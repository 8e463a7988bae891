use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single entry in the request log (`~/.pitwall/request-log.jsonl`).
///
/// One line per backend call. Only call metadata is recorded; chat messages
/// and replies never reach the disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub timestamp: String,
    pub method: String,
    /// Endpoint path, e.g. `/api/drivers/standings`.
    pub endpoint: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Append one backend call to the request log.
///
/// Best-effort: a log that cannot be written never fails the call it
/// describes.
pub fn log_request(
    method: &str,
    endpoint: &str,
    success: bool,
    status: Option<u16>,
    latency_ms: u64,
    error: Option<&str>,
) {
    let entry = RequestLogEntry {
        timestamp: Utc::now().to_rfc3339(),
        method: method.to_string(),
        endpoint: endpoint.to_string(),
        success,
        status,
        latency_ms,
        error: error.map(str::to_string),
    };

    if let Some(path) = request_log_path() {
        let _ = append_log_entry(&path, &entry);
    }
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all request log entries.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries() -> Vec<RequestLogEntry> {
    request_log_path()
        .map(|path| read_entries_from(&path))
        .unwrap_or_default()
}

/// Read and parse every well-formed line of a request log file.
pub fn read_entries_from(path: &Path) -> Vec<RequestLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<RequestLogEntry>(&line).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

pub(crate) fn append_log_entry(path: &Path, entry: &RequestLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Return the path to the request log file.
pub fn request_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pitwall").join("request-log.jsonl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(endpoint: &str, success: bool) -> RequestLogEntry {
        RequestLogEntry {
            timestamp: "2025-07-27T13:00:00+00:00".to_string(),
            method: "GET".to_string(),
            endpoint: endpoint.to_string(),
            success,
            status: if success { Some(200) } else { None },
            latency_ms: 42,
            error: (!success).then(|| "transport: connection refused".to_string()),
        }
    }

    #[test]
    fn append_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("request-log.jsonl");

        append_log_entry(&path, &entry("/api/drivers/standings", true)).unwrap();
        append_log_entry(&path, &entry("/api/pit-wall/chat", false)).unwrap();

        let entries = read_entries_from(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], entry("/api/drivers/standings", true));
        assert_eq!(entries[1].error.as_deref(), Some("transport: connection refused"));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request-log.jsonl");
        append_log_entry(&path, &entry("/api/health", true)).unwrap();
        fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(b"{not json\n")
            .unwrap();

        assert_eq!(read_entries_from(&path).len(), 1);
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries_from(&dir.path().join("nope.jsonl")).is_empty());
    }
}
