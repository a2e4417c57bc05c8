//! Target identity
//!
//! An xname names a specific physical hardware location in the system
//! topology (e.g. `x1000c0s0b0` for a node controller). The engine treats
//! it as opaque; the direct backend additionally uses it as the controller
//! hostname, which is how controller DNS is provisioned.

use serde::{Deserialize, Serialize};

/// Opaque hardware-location identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Xname(String);

impl Xname {
    /// Create an xname from any string-like value
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw xname string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Xname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Xname {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Xname {
    fn from(name: String) -> Self {
        Self(name)
    }
}
