use serde::{Deserialize, Serialize};
use std::fmt;

/// Configured default resolver, `[upstream]` in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_host")]
    pub host: String,

    #[serde(default = "default_upstream_port")]
    pub port: u16,
}

impl UpstreamConfig {
    pub fn endpoint(&self) -> UpstreamEndpoint {
        UpstreamEndpoint::new(self.host.clone(), self.port)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host: default_upstream_host(),
            port: default_upstream_port(),
        }
    }
}

fn default_upstream_host() -> String {
    "one.one.one.one".to_string()
}

fn default_upstream_port() -> u16 {
    53
}

/// The resolver a single request talks to.
///
/// The process-wide default comes from [`UpstreamConfig`]; a request may
/// carry its own endpoint when the URL path names a different host. The
/// value is threaded through the pipeline per request and never shared
/// mutably between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    pub host: String,
    pub port: u16,
}

impl UpstreamEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Same endpoint with the host swapped out, port kept.
    ///
    /// Used for per-request overrides taken from the URL path, which name a
    /// host only; the port stays at the configured value.
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: self.port,
        }
    }
}

impl fmt::Display for UpstreamEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
