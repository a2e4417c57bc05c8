//! Direct controller backend
//!
//! Talks straight to a controller's Redfish task service. Controller
//! hostnames resolve by xname, so the base URL is derived from the target
//! itself and every client is pinned to exactly one controller.

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

const TASKS_PATH: &str = "/redfish/v1/TaskService/Tasks";

/// Client for one controller's Redfish task service
pub struct RedfishJobClient {
    base_url: String,
    session: Session,
}

impl RedfishJobClient {
    /// Build a client pinned to the given controller
    ///
    /// Controller BMCs serve self-signed TLS, so certificate verification
    /// is disabled for this backend.
    pub fn new(target: &Xname, options: &ClientOptions) -> Result<Self> {
        Ok(Self {
            base_url: format!("https://{}", target),
            session: Session::new(options, true)?,
        })
    }

    fn tasks_url(&self) -> String {
        format!("{}{}", self.base_url, TASKS_PATH)
    }
}

#[async_trait]
impl JobLaunchClient for RedfishJobClient {
    async fn submit(&self, targets: &[Xname], command: &str, args: &[String]) -> Result<JobId> {
        let req = SubmitRequest {
            targets: targets.to_vec(),
            job_name: command.to_string(),
            options: args.join(" "),
        };

        let response: SubmitResponse = self.session.post_json(&self.tasks_url(), &req).await?;
        Ok(response.job_id)
    }

    async fn launch_status(&self, job: &JobId, target: &Xname) -> Result<Option<LaunchEnvelope>> {
        let url = format!("{}/{}", self.tasks_url(), job);
        let response: LaunchStatusResponse = self.session.get_json(&url).await?;

        // A record that has not materialized yet means no decision either.
        match response.tasks.iter().find(|r| &r.xname == target) {
            Some(record) => envelope::decode_launch(record),
            None => Ok(None),
        }
    }

    async fn run_status(&self, job: &JobId, target: &Xname) -> Result<RunEnvelope> {
        let url = format!("{}/{}/{}", self.tasks_url(), job, target);
        let response: RunStatusResponse = self.session.get_json(&url).await?;
        envelope::decode_run(&response)
    }

    async fn delete_job(&self, job: &JobId) -> Result<()> {
        let url = format!("{}/{}", self.tasks_url(), job);
        self.session.delete(&url).await
    }
}

/// Factory producing one [`RedfishJobClient`] per target
pub struct RedfishClientFactory {
    options: ClientOptions,
}

impl RedfishClientFactory {
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

impl JobClientFactory for RedfishClientFactory {
    fn create(&self, target: &Xname) -> Result<Box<dyn JobLaunchClient>> {
        Ok(Box::new(RedfishJobClient::new(target, &self.options)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_derives_from_xname() {
        let client =
            RedfishJobClient::new(&Xname::from("x1000c0s0b0"), &ClientOptions::default()).unwrap();
        assert_eq!(
            client.tasks_url(),
            "https://x1000c0s0b0/redfish/v1/TaskService/Tasks"
        );
    }
}
