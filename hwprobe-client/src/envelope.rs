//! Double-encoded envelope decoding
//!
//! The job services wrap the real payload in a JSON field whose value is
//! itself JSON-formatted text. These helpers perform the second decode and
//! map failures to [`ClientError::Protocol`].

use hwprobe_core::dto::{LaunchEnvelope, LaunchRecord, RunEnvelope, RunStatusResponse};

use crate::error::{ClientError, Result};

/// Decode the launch envelope out of a per-target launch record
///
/// An absent `launchMessage` means the service has not decided yet.
pub(crate) fn decode_launch(record: &LaunchRecord) -> Result<Option<LaunchEnvelope>> {
    match &record.launch_message {
        None => Ok(None),
        Some(raw) => serde_json::from_str(raw).map(Some).map_err(|e| {
            ClientError::Protocol(format!(
                "malformed launch envelope for {}: {}",
                record.xname, e
            ))
        }),
    }
}

/// Decode the run envelope out of a run-status response
pub(crate) fn decode_run(response: &RunStatusResponse) -> Result<RunEnvelope> {
    serde_json::from_str(&response.message)
        .map_err(|e| ClientError::Protocol(format!("malformed run envelope: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwprobe_core::domain::Xname;

    #[test]
    fn test_decode_launch_pending() {
        let record = LaunchRecord {
            xname: Xname::from("x1000c0s0b0"),
            launch_message: None,
        };
        assert!(decode_launch(&record).unwrap().is_none());
    }

    #[test]
    fn test_decode_launch_accepted() {
        let record = LaunchRecord {
            xname: Xname::from("x1000c0s0b0"),
            launch_message: Some(r#"{"state": "Running"}"#.to_string()),
        };
        let env = decode_launch(&record).unwrap().unwrap();
        assert_eq!(env.state.as_deref(), Some("Running"));
        assert!(env.error.is_none());
    }

    #[test]
    fn test_decode_launch_error_outcome() {
        let record = LaunchRecord {
            xname: Xname::from("x1000c0s0b0"),
            launch_message: Some(
                r#"{"error": "unsupported command: runFooTester"}"#.to_string(),
            ),
        };
        let env = decode_launch(&record).unwrap().unwrap();
        assert_eq!(env.error.as_deref(), Some("unsupported command: runFooTester"));
    }

    #[test]
    fn test_decode_launch_malformed_inner_json() {
        let record = LaunchRecord {
            xname: Xname::from("x1000c0s0b0"),
            launch_message: Some("{not json".to_string()),
        };
        let err = decode_launch(&record).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn test_decode_run_double_encoded() {
        let response = RunStatusResponse {
            message: r#"{"state": "Completed", "endTime": "2026-02-11T08:21:42Z"}"#.to_string(),
        };
        let env = decode_run(&response).unwrap();
        assert_eq!(env.state.as_deref(), Some("Completed"));
    }

    #[test]
    fn test_decode_run_malformed() {
        let response = RunStatusResponse {
            message: "no envelope here".to_string(),
        };
        assert!(decode_run(&response).unwrap_err().is_protocol());
    }
}
