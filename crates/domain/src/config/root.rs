use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::directory::DirectoryConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG: &str = "hairpin-dns.toml";
const SYSTEM_CONFIG: &str = "/etc/hairpin-dns/config.toml";
const MAX_QUERY_TIMEOUT_SECS: u64 = 3600;

/// Main configuration structure for Hairpin DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address, workers)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution and answer configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Control-plane service directory
    #[serde(default)]
    pub directory: DirectoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hairpin-dns.toml in current directory
    /// 3. /etc/hairpin-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(namespace) = overrides.namespace {
            self.directory.namespace = namespace;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.num_workers == 0 {
            return Err(ConfigError::Validation(
                "At least one listener worker is required".to_string(),
            ));
        }

        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        if self.dns.query_timeout > MAX_QUERY_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "Query timeout must be at most {} seconds",
                MAX_QUERY_TIMEOUT_SECS
            )));
        }

        if self.directory.namespace.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Directory namespace cannot be empty".to_string(),
            ));
        }

        for server in &self.dns.upstream_servers {
            if server.parse::<SocketAddr>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "Upstream server '{}' is not an ip:port address",
                    server
                )));
            }
        }

        Ok(())
    }

    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG, SYSTEM_CONFIG]
            .into_iter()
            .find(|candidate| std::path::Path::new(candidate).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub namespace: Option<String>,
    pub log_level: Option<String>,
}
