//! Configuration module
//!
//! Validated settings for one diagnostic invocation, assembled from CLI
//! arguments and environment fallbacks.

use std::path::PathBuf;
use std::time::Duration;

use hwprobe_core::domain::Xname;

/// Which job service backend to drive
#[derive(Debug, Clone)]
pub enum Backend {
    /// Poll each controller's Redfish task service directly
    Direct,
    /// Relay the job lifecycle through the indirection service
    Relay { base_url: String },
}

/// Settings for one diagnostic invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub targets: Vec<Xname>,
    pub command: String,
    pub args: Vec<String>,
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub backend: Backend,
    pub record_dir: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration
    ///
    /// A zero poll interval is allowed (it disables request throttling);
    /// a zero timeout is not, since every target would be cancelled on the
    /// first poll cycle.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.targets.is_empty() {
            anyhow::bail!("at least one target is required");
        }

        if self.command.is_empty() {
            anyhow::bail!("diagnostic command cannot be empty");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        if let Backend::Relay { base_url } = &self.backend {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                anyhow::bail!("relay URL must start with http:// or https://");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            targets: vec![Xname::from("x1000c0s0b0")],
            command: "runMemTester".to_string(),
            args: vec![],
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(300),
            backend: Backend::Direct,
            record_dir: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_targets_rejected() {
        let mut config = valid_config();
        config.targets.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_allowed() {
        let mut config = valid_config();
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relay_url_shape_checked() {
        let mut config = valid_config();
        config.backend = Backend::Relay {
            base_url: "relay:28800".to_string(),
        };
        assert!(config.validate().is_err());

        config.backend = Backend::Relay {
            base_url: "http://relay:28800".to_string(),
        };
        assert!(config.validate().is_ok());
    }
}
