use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure for dohgate
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP server configuration (port, bind address, homepage redirect)
    #[serde(default)]
    pub server: ServerConfig,

    /// Default upstream resolver
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dohgate.toml in current directory
    /// 3. /etc/dohgate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dohgate.toml").exists() {
            Self::from_file("dohgate.toml")?
        } else if std::path::Path::new("/etc/dohgate/config.toml").exists() {
            Self::from_file("/etc/dohgate/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.http_port {
            self.server.http_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(host) = overrides.upstream_host {
            self.upstream.host = host;
        }
        if let Some(port) = overrides.upstream_port {
            self.upstream.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.http_port == 0 {
            return Err(ConfigError::Validation("HTTP port cannot be 0".to_string()));
        }

        if self.upstream.host.is_empty() {
            return Err(ConfigError::Validation(
                "Upstream host cannot be empty".to_string(),
            ));
        }

        if self.upstream.port == 0 {
            return Err(ConfigError::Validation(
                "Upstream port cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub http_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream_host: Option<String>,
    pub upstream_port: Option<u16>,
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.upstream.host, "one.one.one.one");
        assert_eq!(config.upstream.port, 53);
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let mut config = Config::default();
        config.apply_cli_overrides(CliOverrides {
            http_port: Some(9000),
            upstream_host: Some("9.9.9.9".to_string()),
            ..Default::default()
        });
        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.upstream.host, "9.9.9.9");
        // untouched fields keep their defaults
        assert_eq!(config.upstream.port, 53);
    }

    #[test]
    fn rejects_empty_upstream_host() {
        let mut config = Config::default();
        config.upstream.host.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [upstream]
            host = "dns.quad9.net"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.host, "dns.quad9.net");
        assert_eq!(config.upstream.port, 53);
        assert_eq!(config.server.http_port, 8053);
    }
}
