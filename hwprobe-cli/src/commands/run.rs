//! Run command handler
//!
//! Drives the full diagnostic lifecycle: submit to every target, wait for
//! launch acknowledgement, poll to completion (or Ctrl-C), render the
//! report, clean up the remote jobs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};
use uuid::Uuid;

use hwprobe_client::{
    ClientOptions, ExchangeRecorder, FileRecorder, JobClientFactory, RedfishClientFactory,
    RelayClientFactory,
};
use hwprobe_core::domain::{TaskState, Xname};
use hwprobe_engine::{DiagnosticPool, PoolOptions};

use crate::config::{Backend, Config};
use crate::report;

/// Arguments for `hwprobe run`
#[derive(Args)]
pub struct RunArgs {
    /// Comma-separated list of target xnames
    #[arg(long, value_delimiter = ',', required = true)]
    pub targets: Vec<String>,

    /// Diagnostic command to launch (e.g. runMemTester)
    #[arg(long)]
    pub command: String,

    /// Seconds between status polls
    #[arg(long, env = "HWPROBE_POLL_INTERVAL", default_value_t = 5)]
    pub poll_interval: u64,

    /// Seconds before unfinished targets are cancelled
    #[arg(long, env = "HWPROBE_TIMEOUT", default_value_t = 300)]
    pub timeout: u64,

    /// Relay service base URL; controllers are polled directly when unset
    #[arg(long, env = "HWPROBE_RELAY_URL")]
    pub relay_url: Option<String>,

    /// Directory to record request/response traffic into
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Free-form arguments passed through to the diagnostic (after --)
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl RunArgs {
    fn into_config(self) -> Config {
        Config {
            targets: self.targets.into_iter().map(Xname::from).collect(),
            command: self.command,
            args: self.args,
            poll_interval: Duration::from_secs(self.poll_interval),
            timeout: Duration::from_secs(self.timeout),
            backend: match self.relay_url {
                Some(base_url) => Backend::Relay { base_url },
                None => Backend::Direct,
            },
            record_dir: self.record,
        }
    }
}

/// Handle the run command
pub async fn handle_run(args: RunArgs) -> Result<()> {
    let config = args.into_config();
    config.validate()?;

    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        command = %config.command,
        targets = config.targets.len(),
        "starting diagnostic run"
    );

    let recorder = match &config.record_dir {
        Some(dir) => {
            let recorder = FileRecorder::create(dir, run_id)
                .with_context(|| format!("failed to create recorder in {}", dir.display()))?;
            info!(path = %recorder.path().display(), "recording exchanges");
            Some(Arc::new(recorder) as Arc<dyn ExchangeRecorder>)
        }
        None => None,
    };

    let options = ClientOptions {
        recorder,
        ..ClientOptions::default()
    };

    let factory: Box<dyn JobClientFactory> = match &config.backend {
        Backend::Direct => Box::new(RedfishClientFactory::new(options)),
        Backend::Relay { base_url } => {
            Box::new(RelayClientFactory::new(base_url.clone(), options))
        }
    };

    let mut pool = DiagnosticPool::launch(
        factory.as_ref(),
        &config.targets,
        &config.command,
        &config.args,
        PoolOptions {
            poll_interval: config.poll_interval,
            timeout: config.timeout,
        },
    )
    .await;

    if pool.is_empty() {
        anyhow::bail!("no target accepted the diagnostic submission");
    }

    pool.poll_until_launched().await;

    if pool.is_empty() {
        anyhow::bail!("every target failed to launch");
    }

    let interrupted = tokio::select! {
        _ = pool.poll_until_complete() => false,
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        warn!("interrupted, cancelling outstanding diagnostics");
        pool.cancel_all().await;
    }

    report::print_report(&pool);

    let total = pool.members().count();
    let failed = pool
        .members()
        .filter(|t| t.state() != TaskState::Completed)
        .count();

    pool.cleanup().await;

    if failed > 0 {
        anyhow::bail!("{} of {} targets did not complete", failed, total);
    }

    Ok(())
}
