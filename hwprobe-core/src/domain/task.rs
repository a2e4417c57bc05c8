//! Task domain types
//!
//! A diagnostic task is the remote execution of one diagnostic routine on
//! one target. The remote job services report task state using the Redfish
//! task-service vocabulary; [`TaskState`] is the local state set that
//! vocabulary is mapped onto.

use serde::{Deserialize, Serialize};

/// Opaque job handle returned by a job service at submission time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Create a job id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw job id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a diagnostic task
///
/// `New` and `Running` are the live states; everything else is terminal
/// and never changes once entered. `Cancelled` records an explicit caller
/// cancellation, `TimedOut` a pool-enforced deadline; both trigger the
/// same best-effort remote delete but stay distinguishable in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    /// Launched, not yet observed running
    New,
    /// Remote reports the diagnostic as in progress
    Running,
    Completed,
    Interrupted,
    Killed,
    /// Remote fault, or a transport/protocol failure while polling
    Exception,
    Cancelled,
    TimedOut,
}

impl TaskState {
    /// Whether this state is terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::New | TaskState::Running)
    }

    /// Map the remote task-service vocabulary onto the local state set
    ///
    /// The controllers report the full Redfish `TaskState` vocabulary;
    /// transient states all count as `Running` here. Returns `None` for
    /// vocabulary this version does not know, which callers treat as a
    /// protocol failure.
    pub fn from_remote(state: &str) -> Option<Self> {
        match state {
            "New" => Some(TaskState::New),
            "Starting" | "Pending" | "Running" | "Service" | "Stopping" | "Suspended" => {
                Some(TaskState::Running)
            }
            "Completed" => Some(TaskState::Completed),
            "Interrupted" => Some(TaskState::Interrupted),
            "Killed" => Some(TaskState::Killed),
            "Exception" => Some(TaskState::Exception),
            "Cancelled" | "Canceled" => Some(TaskState::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskState::New => "New",
            TaskState::Running => "Running",
            TaskState::Completed => "Completed",
            TaskState::Interrupted => "Interrupted",
            TaskState::Killed => "Killed",
            TaskState::Exception => "Exception",
            TaskState::Cancelled => "Cancelled",
            TaskState::TimedOut => "TimedOut",
        };
        write!(f, "{}", name)
    }
}
