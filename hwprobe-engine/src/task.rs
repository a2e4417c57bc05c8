//! Per-target diagnostic task
//!
//! A task owns exactly one outstanding remote job handle and the exclusive
//! client session it was submitted through. Once the state turns terminal
//! it never changes again; every transition below guards on that.

use tokio::time::Instant;
use tracing::{debug, warn};

use hwprobe_client::{ClientError, JobLaunchClient};
use hwprobe_core::domain::{JobId, TaskState, Xname};
use hwprobe_core::dto::{LaunchEnvelope, RunEnvelope};

/// Outcome of one launch-status query
pub(crate) enum LaunchCheck {
    /// The service confirmed the launch
    Confirmed,
    /// No launch decision yet
    Pending,
    /// Launch-level failure; the pool drops the member
    Failed(String),
}

/// State machine for one target's diagnostic job
pub struct DiagnosticTask {
    target: Xname,
    client: Box<dyn JobLaunchClient>,
    job: JobId,
    state: TaskState,
    launch_confirmed: bool,
    launch_payload: Option<LaunchEnvelope>,
    run_payload: Option<RunEnvelope>,
    started_at: Instant,
}

impl DiagnosticTask {
    /// Submit the diagnostic for one target
    ///
    /// A target whose submission fails never becomes a task; the caller
    /// logs the rejection and moves on.
    pub(crate) async fn launch(
        client: Box<dyn JobLaunchClient>,
        target: Xname,
        command: &str,
        args: &[String],
    ) -> Result<Self, ClientError> {
        let job = client
            .submit(std::slice::from_ref(&target), command, args)
            .await?;

        debug!(xname = %target, %job, "diagnostic submitted");

        Ok(Self {
            target,
            client,
            job,
            state: TaskState::New,
            launch_confirmed: false,
            launch_payload: None,
            run_payload: None,
            started_at: Instant::now(),
        })
    }

    pub fn target(&self) -> &Xname {
        &self.target
    }

    pub fn job_id(&self) -> &JobId {
        &self.job
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Whether the task has reached a terminal state
    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Time since the task entered its running lifecycle
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Last launch envelope seen, kept for triage
    pub fn launch_payload(&self) -> Option<&LaunchEnvelope> {
        self.launch_payload.as_ref()
    }

    /// Last run envelope seen, kept for triage
    pub fn run_payload(&self) -> Option<&RunEnvelope> {
        self.run_payload.as_ref()
    }

    pub(crate) fn launch_confirmed(&self) -> bool {
        self.launch_confirmed
    }

    /// Query the launch decision for this task
    pub(crate) async fn check_launch(&mut self) -> LaunchCheck {
        match self.client.launch_status(&self.job, &self.target).await {
            Ok(None) => LaunchCheck::Pending,
            Ok(Some(envelope)) => {
                if let Some(reason) = envelope.error.clone() {
                    return LaunchCheck::Failed(reason);
                }

                if let Some(state) = envelope
                    .state
                    .as_deref()
                    .and_then(TaskState::from_remote)
                {
                    self.state = state;
                }
                self.launch_confirmed = true;
                self.launch_payload = Some(envelope);
                LaunchCheck::Confirmed
            }
            Err(e) => LaunchCheck::Failed(e.to_string()),
        }
    }

    /// Query run status once and apply the reported state
    ///
    /// Any transport or protocol failure makes the task `Exception`
    /// (terminal); it is polled no further after that.
    pub(crate) async fn poll(&mut self) {
        if self.is_complete() {
            return;
        }

        match self.client.run_status(&self.job, &self.target).await {
            Ok(envelope) => {
                match envelope.state.as_deref().and_then(TaskState::from_remote) {
                    Some(state) => self.state = state,
                    None => {
                        warn!(
                            xname = %self.target,
                            state = envelope.state.as_deref().unwrap_or("<absent>"),
                            "unrecognized remote task state"
                        );
                        self.state = TaskState::Exception;
                    }
                }
                self.run_payload = Some(envelope);
            }
            Err(e) => {
                warn!(xname = %self.target, error = %e, "status poll failed");
                self.state = TaskState::Exception;
            }
        }
    }

    /// Explicit cancellation
    pub async fn cancel(&mut self) {
        self.finish(TaskState::Cancelled).await;
    }

    /// Pool-enforced deadline cancellation
    pub(crate) async fn time_out(&mut self) {
        self.finish(TaskState::TimedOut).await;
    }

    async fn finish(&mut self, state: TaskState) {
        if self.is_complete() {
            return;
        }

        self.state = state;

        if let Err(e) = self.client.delete_job(&self.job).await {
            debug!(xname = %self.target, error = %e, "ignoring delete failure");
        }
    }

    /// Best-effort remote delete during pool cleanup
    pub(crate) async fn delete_remote(&self) {
        if let Err(e) = self.client.delete_job(&self.job).await {
            debug!(xname = %self.target, error = %e, "ignoring delete failure during cleanup");
        }
    }
}
