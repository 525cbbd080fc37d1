use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Resolution failed for {domain}: {reason}")]
    ResolutionFailed { domain: String, reason: String },

    #[error("No IPv4 addresses found for {0}")]
    NoAddresses(String),

    #[error("Ambiguous resolution for {domain}: {count} candidate addresses")]
    AmbiguousResolution { domain: String, count: usize },

    #[error("Service directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Upstream forwarding failed: {0}")]
    ForwardingFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    pub fn is_directory_error(&self) -> bool {
        matches!(self, DomainError::DirectoryUnavailable(_))
    }
}
