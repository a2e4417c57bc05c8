//! Relay service backend
//!
//! Drives the same job lifecycle through the relay service that fronts the
//! controllers. The relay forwards submissions to each controller and
//! mirrors the controller envelopes back unchanged, so both backends parse
//! identical payloads.

use async_trait::async_trait;

use hwprobe_core::domain::{JobId, Xname};
use hwprobe_core::dto::{
    LaunchEnvelope, LaunchStatusResponse, RunEnvelope, RunStatusResponse, SubmitRequest,
    SubmitResponse,
};

use crate::envelope;
use crate::error::Result;
use crate::session::Session;
use crate::{ClientOptions, JobClientFactory, JobLaunchClient};

/// Client for the relay job service
pub struct RelayJobClient {
    base_url: String,
    session: Session,
}

impl RelayJobClient {
    /// Build a client against the relay service at `base_url`
    pub fn new(base_url: impl Into<String>, options: &ClientOptions) -> Result<Self> {
        let base_url = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session: Session::new(options, false)?,
        })
    }

    fn jobs_url(&self) -> String {
        format!("{}/v1/jobs", self.base_url)
    }
}

#[async_trait]
impl JobLaunchClient for RelayJobClient {
    async fn submit(&self, targets: &[Xname], command: &str, args: &[String]) -> Result<JobId> {
        let req = SubmitRequest {
            targets: targets.to_vec(),
            job_name: command.to_string(),
            options: args.join(" "),
        };

        let response: SubmitResponse = self.session.post_json(&self.jobs_url(), &req).await?;
        Ok(response.job_id)
    }

    async fn launch_status(&self, job: &JobId, target: &Xname) -> Result<Option<LaunchEnvelope>> {
        let url = format!("{}/{}", self.jobs_url(), job);
        let response: LaunchStatusResponse = self.session.get_json(&url).await?;

        match response.tasks.iter().find(|r| &r.xname == target) {
            Some(record) => envelope::decode_launch(record),
            None => Ok(None),
        }
    }

    async fn run_status(&self, job: &JobId, target: &Xname) -> Result<RunEnvelope> {
        let url = format!("{}/{}/{}", self.jobs_url(), job, target);
        let response: RunStatusResponse = self.session.get_json(&url).await?;
        envelope::decode_run(&response)
    }

    async fn delete_job(&self, job: &JobId) -> Result<()> {
        let url = format!("{}/{}", self.jobs_url(), job);
        self.session.delete(&url).await
    }
}

/// Factory producing one [`RelayJobClient`] per target
///
/// Every target gets its own session even though all sessions point at the
/// same relay endpoint.
pub struct RelayClientFactory {
    base_url: String,
    options: ClientOptions,
}

impl RelayClientFactory {
    pub fn new(base_url: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            base_url: base_url.into(),
            options,
        }
    }
}

impl JobClientFactory for RelayClientFactory {
    fn create(&self, _target: &Xname) -> Result<Box<dyn JobLaunchClient>> {
        Ok(Box::new(RelayJobClient::new(
            self.base_url.clone(),
            &self.options,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_trims_trailing_slash() {
        let client =
            RelayJobClient::new("http://relay:28800/", &ClientOptions::default()).unwrap();
        assert_eq!(client.jobs_url(), "http://relay:28800/v1/jobs");
    }
}
