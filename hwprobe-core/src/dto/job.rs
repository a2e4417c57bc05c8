//! Job service wire bodies
//!
//! Both backends speak the same envelope format: the outer bodies below,
//! plus two double-encoded envelopes (`launchMessage` and `message` carry
//! JSON-formatted text that has to be parsed a second time to reach the
//! real payload). Envelope fields are all optional; any field may or may
//! not be present depending on firmware revision.

use serde::{Deserialize, Serialize};

use crate::domain::{JobId, Xname};

/// Body of the job submission POST
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub targets: Vec<Xname>,
    #[serde(rename = "jobName")]
    pub job_name: String,
    /// Space-joined free-form argument string
    pub options: String,
}

/// Response to a job submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(rename = "jobID")]
    pub job_id: JobId,
}

/// Response to a launch-status GET: one record per requested target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchStatusResponse {
    #[serde(default)]
    pub tasks: Vec<LaunchRecord>,
}

/// Per-target launch record
///
/// `launch_message` absent means the service has not yet produced a launch
/// decision for this target. It is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub xname: Xname,
    #[serde(rename = "launchMessage", default, skip_serializing_if = "Option::is_none")]
    pub launch_message: Option<String>,
}

/// Inner envelope decoded from `launchMessage`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchEnvelope {
    /// Initial remote task state when the launch was accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Present when the launch failed (unsupported command, bad argument)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outer body of a run-status GET
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatusResponse {
    /// JSON-encoded [`RunEnvelope`]
    pub message: String,
}

/// Inner envelope decoded from a run-status `message`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "diagnosticMessages", default)]
    pub diagnostic_messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_wire_names() {
        let req = SubmitRequest {
            targets: vec![Xname::from("x1000c0s0b0"), Xname::from("x1000c0s1b0")],
            job_name: "runMemTester".to_string(),
            options: "-l 2 -v".to_string(),
        };

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["jobName"], "runMemTester");
        assert_eq!(body["options"], "-l 2 -v");
        assert_eq!(body["targets"][0], "x1000c0s0b0");
    }

    #[test]
    fn test_submit_response_parses_opaque_id() {
        let resp: SubmitResponse =
            serde_json::from_str(r#"{"jobID": "diag-7f3a"}"#).unwrap();
        assert_eq!(resp.job_id.as_str(), "diag-7f3a");
    }

    #[test]
    fn test_launch_record_without_decision() {
        let resp: LaunchStatusResponse =
            serde_json::from_str(r#"{"tasks": [{"xname": "x1000c0s0b0"}]}"#).unwrap();
        assert_eq!(resp.tasks.len(), 1);
        assert!(resp.tasks[0].launch_message.is_none());
    }

    #[test]
    fn test_run_envelope_tolerates_missing_fields() {
        let env: RunEnvelope = serde_json::from_str(r#"{"state": "Running"}"#).unwrap();
        assert_eq!(env.state.as_deref(), Some("Running"));
        assert!(env.start_time.is_none());
        assert!(env.diagnostic_messages.is_empty());
    }

    #[test]
    fn test_run_envelope_full() {
        let env: RunEnvelope = serde_json::from_str(
            r#"{
                "state": "Completed",
                "startTime": "2026-02-11T08:15:00Z",
                "endTime": "2026-02-11T08:21:42Z",
                "diagnosticMessages": ["PASS: bank 0", "PASS: bank 1"]
            }"#,
        )
        .unwrap();
        assert_eq!(env.state.as_deref(), Some("Completed"));
        assert_eq!(env.end_time.as_deref(), Some("2026-02-11T08:21:42Z"));
        assert_eq!(env.diagnostic_messages.len(), 2);
    }
}
