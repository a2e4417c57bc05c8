//! Exchange recording
//!
//! Optional capture of request/response traffic for offline triage of a
//! diagnostic run. A recorder is injected explicitly into the client
//! options; when none is injected, nothing is persisted.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

/// One captured HTTP round trip
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<serde_json::Value>,
    pub status: u16,
    pub response_body: String,
}

/// Sink for captured exchanges
pub trait ExchangeRecorder: Send + Sync {
    /// Persist one exchange; implementations must not fail the caller
    fn record(&self, exchange: &Exchange);
}

/// Recorder appending JSON lines to a per-invocation file
pub struct FileRecorder {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileRecorder {
    /// Create `hwprobe-<run_id>.jsonl` under `dir`
    pub fn create(dir: &Path, run_id: Uuid) -> std::io::Result<Self> {
        let path = dir.join(format!("hwprobe-{}.jsonl", run_id));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Where this recorder writes
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExchangeRecorder for FileRecorder {
    fn record(&self, exchange: &Exchange) {
        let line = match serde_json::to_string(exchange) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "dropping unserializable exchange");
                return;
            }
        };

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writeln!(file, "{}", line) {
            warn!(path = %self.path.display(), error = %e, "failed to record exchange");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_exchange() -> Exchange {
        Exchange {
            timestamp: Utc::now(),
            method: "GET".to_string(),
            url: "https://x1000c0s0b0/redfish/v1/TaskService/Tasks/j1".to_string(),
            request_body: None,
            status: 200,
            response_body: r#"{"tasks": []}"#.to_string(),
        }
    }

    #[test]
    fn test_file_recorder_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = FileRecorder::create(dir.path(), Uuid::new_v4()).unwrap();

        recorder.record(&sample_exchange());
        recorder.record(&sample_exchange());

        let contents = std::fs::read_to_string(recorder.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["method"], "GET");
        assert_eq!(parsed["status"], 200);
    }
}
