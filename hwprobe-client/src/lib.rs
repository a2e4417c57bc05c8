//! HWProbe Job Clients
//!
//! HTTP clients for the vendor diagnostic job services. Two interchangeable
//! backends implement the same [`JobLaunchClient`] interface:
//!
//! - [`RedfishJobClient`] polls a controller's Redfish task service directly
//! - [`RelayJobClient`] drives the same job lifecycle through the relay
//!   service that fronts the controllers
//!
//! Clients are stateless request/response wrappers: each call is a single
//! bounded-timeout HTTP round trip, and a hung controller surfaces as a
//! transport error on that one call.
//!
//! # Example
//!
//! ```no_run
//! use hwprobe_client::{ClientOptions, JobClientFactory, RelayClientFactory};
//! use hwprobe_core::domain::Xname;
//!
//! # async fn example() -> hwprobe_client::Result<()> {
//! let factory = RelayClientFactory::new("http://relay:28800", ClientOptions::default());
//! let target = Xname::from("x1000c0s0b0");
//!
//! let client = factory.create(&target)?;
//! let job = client.submit(&[target], "runMemTester", &[]).await?;
//! println!("submitted job {}", job);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod envelope;
pub mod recorder;
mod redfish;
mod relay;
mod session;

pub use error::{ClientError, Result};
pub use recorder::{Exchange, ExchangeRecorder, FileRecorder};
pub use redfish::{RedfishClientFactory, RedfishJobClient};
pub use relay::{RelayClientFactory, RelayJobClient};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use hwprobe_core::domain::{JobId, Xname};
use hwprobe_core::dto::{LaunchEnvelope, RunEnvelope};

/// Client interface to a diagnostic job service
///
/// Pure request/response; implementations retain no lifecycle state. The
/// orchestration engine owns one exclusive client per target, so
/// implementations never share connections between targets.
#[async_trait]
pub trait JobLaunchClient: Send + Sync {
    /// Submit a diagnostic for the given targets
    ///
    /// Returns the opaque job handle the service assigned. Fails with
    /// [`ClientError::Submission`] when the service rejects the request
    /// (unsupported command, bad argument).
    async fn submit(&self, targets: &[Xname], command: &str, args: &[String]) -> Result<JobId>;

    /// Fetch the launch decision for one target of a job
    ///
    /// Returns `Ok(None)` while the service has not yet produced a launch
    /// decision for that target. That is a normal pre-acknowledgement
    /// state, not an error.
    async fn launch_status(&self, job: &JobId, target: &Xname) -> Result<Option<LaunchEnvelope>>;

    /// Fetch the current run-status envelope for one target of a job
    async fn run_status(&self, job: &JobId, target: &Xname) -> Result<RunEnvelope>;

    /// Delete a job on the service
    ///
    /// Best-effort: callers ignore failures.
    async fn delete_job(&self, job: &JobId) -> Result<()>;
}

/// Creates one exclusive [`JobLaunchClient`] per target
///
/// Each created client carries its own connection/session; nothing is
/// pooled or shared across targets.
pub trait JobClientFactory: Send + Sync {
    /// Build a client for the given target
    fn create(&self, target: &Xname) -> Result<Box<dyn JobLaunchClient>>;
}

/// Options shared by both backends
#[derive(Clone)]
pub struct ClientOptions {
    /// Bound on every individual HTTP round trip
    pub request_timeout: Duration,
    /// Optional capture of request/response traffic
    pub recorder: Option<Arc<dyn ExchangeRecorder>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            recorder: None,
        }
    }
}
