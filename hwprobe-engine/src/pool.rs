//! Diagnostic pool
//!
//! Owns the tasks of one diagnostic invocation and orchestrates the launch
//! phase, the run/poll phase, interval throttling, and timeout-driven
//! cancellation. No per-target error ever escapes the polling methods as
//! an error: all failure is represented as a terminal task state, which
//! guarantees [`DiagnosticPool::poll_until_complete`] terminates even when
//! every target fails.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use hwprobe_client::JobClientFactory;
use hwprobe_core::domain::Xname;

use crate::task::{DiagnosticTask, LaunchCheck};

/// Floor on the run-loop pacing so a zero poll interval still yields
/// between cycles instead of spinning.
const MIN_POLL_PACING: Duration = Duration::from_millis(100);

/// Pool-wide configuration
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Minimum spacing between polling cycles that touch the network
    pub poll_interval: Duration,
    /// Deadline, measured from pool start, after which unfinished members
    /// are cancelled as `TimedOut`
    pub timeout: Duration,
}

/// The set of diagnostic tasks for one invocation
pub struct DiagnosticPool {
    /// Visit order is construction order and never changes
    members: Vec<DiagnosticTask>,
    command: String,
    args: Vec<String>,
    poll_interval: Duration,
    timeout: Duration,
    started_at: Instant,
    last_polled_at: Option<Instant>,
}

impl DiagnosticPool {
    /// Submit the diagnostic to every requested target
    ///
    /// Each target gets its own exclusive client from the factory. Targets
    /// whose client setup or submission fails are logged once and omitted;
    /// an empty pool is valid.
    pub async fn launch(
        factory: &dyn JobClientFactory,
        targets: &[Xname],
        command: &str,
        args: &[String],
        options: PoolOptions,
    ) -> Self {
        let mut members = Vec::with_capacity(targets.len());

        for target in targets {
            let client = match factory.create(target) {
                Ok(client) => client,
                Err(e) => {
                    warn!(xname = %target, error = %e, "skipping target: client setup failed");
                    continue;
                }
            };

            match DiagnosticTask::launch(client, target.clone(), command, args).await {
                Ok(task) => members.push(task),
                Err(e) => warn!(xname = %target, error = %e, "skipping target: submission failed"),
            }
        }

        info!(
            command,
            launched = members.len(),
            requested = targets.len(),
            "diagnostic pool created"
        );

        Self {
            members,
            command: command.to_string(),
            args: args.to_vec(),
            poll_interval: options.poll_interval,
            timeout: options.timeout,
            started_at: Instant::now(),
            last_polled_at: None,
        }
    }

    /// The diagnostic command this pool is running
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The free-form arguments passed to the diagnostic
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Time since the pool was constructed
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// All members in stable visit order
    pub fn members(&self) -> impl Iterator<Item = &DiagnosticTask> {
        self.members.iter()
    }

    /// Members that have reached a terminal state
    pub fn completed(&self) -> impl Iterator<Item = &DiagnosticTask> {
        self.members.iter().filter(|t| t.is_complete())
    }

    /// Members still live
    pub fn not_completed(&self) -> impl Iterator<Item = &DiagnosticTask> {
        self.members.iter().filter(|t| !t.is_complete())
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether every member has reached a terminal state
    pub fn is_complete(&self) -> bool {
        self.members.iter().all(|t| t.is_complete())
    }

    /// Poll launch status until every member is acknowledged or dropped
    ///
    /// Launch acknowledgement and run-status reporting are separate remote
    /// calls with separate failure modes: a launch-level error (or a
    /// transport/protocol failure of the launch query itself) removes the
    /// member, where a run-phase failure would make it terminal. The pool
    /// timeout bounds this phase too, so it terminates even when a
    /// controller never acknowledges.
    pub async fn poll_until_launched(&mut self) {
        loop {
            if self.all_launch_decided() {
                return;
            }

            if self.started_at.elapsed() > self.timeout {
                for task in self.members.iter_mut() {
                    if !task.launch_confirmed() && !task.is_complete() {
                        warn!(xname = %task.target(), "launch not acknowledged within timeout");
                        task.time_out().await;
                    }
                }
                return;
            }

            let mut dropped: Vec<Xname> = Vec::new();
            for task in self.members.iter_mut() {
                if task.launch_confirmed() || task.is_complete() {
                    continue;
                }

                match task.check_launch().await {
                    LaunchCheck::Confirmed => {
                        debug!(xname = %task.target(), "launch acknowledged");
                    }
                    LaunchCheck::Pending => {}
                    LaunchCheck::Failed(reason) => {
                        warn!(xname = %task.target(), %reason, "target failed to launch");
                        dropped.push(task.target().clone());
                    }
                }
            }

            if !dropped.is_empty() {
                self.members.retain(|t| !dropped.contains(t.target()));
            }

            if self.all_launch_decided() {
                return;
            }

            sleep(self.pacing()).await;
        }
    }

    /// One rate-limited polling step
    ///
    /// Returns without any network calls when invoked again within
    /// `poll_interval`. Otherwise polls every non-complete member in visit
    /// order; after each member's poll, independently, a member still live
    /// past the pool deadline is cancelled as `TimedOut`.
    pub async fn poll_statuses(&mut self) {
        if let Some(last) = self.last_polled_at {
            if last.elapsed() < self.poll_interval {
                return;
            }
        }

        for task in self.members.iter_mut() {
            if task.is_complete() {
                continue;
            }

            task.poll().await;

            if !task.is_complete() && self.started_at.elapsed() > self.timeout {
                warn!(
                    xname = %task.target(),
                    timeout = ?self.timeout,
                    "diagnostic exceeded timeout, cancelling"
                );
                task.time_out().await;
            }
        }

        self.last_polled_at = Some(Instant::now());
    }

    /// Poll until every member reaches a terminal state
    pub async fn poll_until_complete(&mut self) {
        while !self.is_complete() {
            self.poll_statuses().await;

            if self.is_complete() {
                break;
            }

            sleep(self.pacing()).await;
        }

        info!(
            command = %self.command,
            members = self.members.len(),
            elapsed = ?self.elapsed(),
            "diagnostic pool complete"
        );
    }

    /// Explicitly cancel every live member
    pub async fn cancel_all(&mut self) {
        for task in self.members.iter_mut() {
            if !task.is_complete() {
                task.cancel().await;
            }
        }
    }

    /// Best-effort remote delete for every member, then drop them
    ///
    /// Dropping a member releases its exclusive connection. Errors are
    /// logged inside the delete, never raised.
    pub async fn cleanup(&mut self) {
        for task in self.members.drain(..) {
            task.delete_remote().await;
        }
    }

    fn all_launch_decided(&self) -> bool {
        self.members
            .iter()
            .all(|t| t.launch_confirmed() || t.is_complete())
    }

    fn pacing(&self) -> Duration {
        self.poll_interval.max(MIN_POLL_PACING)
    }
}
