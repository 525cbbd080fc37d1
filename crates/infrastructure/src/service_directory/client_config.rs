use hairpin_dns_domain::{DirectoryConfig, DomainError};
use std::time::Duration;
use tracing::debug;

const SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
const SERVICE_PORT_ENV: &str = "KUBERNETES_SERVICE_PORT";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the API server lives and how to authenticate against it.
#[derive(Clone)]
pub struct KubeClientConfig {
    pub api_server: String,
    pub token: Option<String>,
    pub ca_pem: Option<Vec<u8>>,
}

impl std::fmt::Debug for KubeClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClientConfig")
            .field("api_server", &self.api_server)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("ca_pem", &self.ca_pem.as_ref().map(|pem| pem.len()))
            .finish()
    }
}

impl KubeClientConfig {
    pub fn new(api_server: impl Into<String>) -> Self {
        Self {
            api_server: api_server.into(),
            token: None,
            ca_pem: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// An empty `api_server` means in-cluster discovery, in which case the
    /// token and CA files must exist. With an explicit URL, empty paths
    /// skip the corresponding credential.
    pub fn from_directory_config(config: &DirectoryConfig) -> Result<Self, DomainError> {
        let in_cluster = config.api_server.trim().is_empty();

        let api_server = if in_cluster {
            let host = read_env(SERVICE_HOST_ENV)?;
            let port = read_env(SERVICE_PORT_ENV)?;
            if host.contains(':') {
                format!("https://[{}]:{}", host, port)
            } else {
                format!("https://{}:{}", host, port)
            }
        } else {
            config.api_server.trim().trim_end_matches('/').to_string()
        };

        let token = match read_optional(&config.token_path, in_cluster)? {
            Some(bytes) => Some(
                String::from_utf8(bytes)
                    .map_err(|e| {
                        DomainError::ConfigError(format!(
                            "Service account token {} is not UTF-8: {}",
                            config.token_path, e
                        ))
                    })?
                    .trim()
                    .to_string(),
            ),
            None => None,
        };
        let ca_pem = read_optional(&config.ca_path, in_cluster)?;

        debug!(
            api_server = %api_server,
            token = token.is_some(),
            ca = ca_pem.is_some(),
            "Control-plane client configured"
        );

        Ok(Self {
            api_server,
            token,
            ca_pem,
        })
    }

    pub fn build_client(&self) -> Result<reqwest::Client, DomainError> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("hairpin-dns/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT);

        if let Some(pem) = &self.ca_pem {
            let cert = reqwest::Certificate::from_pem(pem)
                .map_err(|e| DomainError::ConfigError(format!("Invalid cluster CA: {}", e)))?;
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))
    }
}

fn read_env(name: &str) -> Result<String, DomainError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            DomainError::ConfigError(format!(
                "{} is not set; not running in a cluster? Set directory.api_server",
                name
            ))
        })
}

fn read_optional(path: &str, required: bool) -> Result<Option<Vec<u8>>, DomainError> {
    if path.trim().is_empty() {
        return if required {
            Err(DomainError::ConfigError(
                "In-cluster discovery needs token_path and ca_path".to_string(),
            ))
        } else {
            Ok(None)
        };
    }

    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DomainError::ConfigError(format!(
            "Failed to read {}: {}",
            path, e
        ))),
    }
}
