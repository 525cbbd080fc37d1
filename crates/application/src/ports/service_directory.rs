use async_trait::async_trait;
use hairpin_dns_domain::{DomainError, ServiceRecord};

#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Point-in-time listing of every service in `namespace`, in control-plane
    /// order. Failures surface as `DomainError::DirectoryUnavailable`.
    async fn snapshot(&self, namespace: &str) -> Result<Vec<ServiceRecord>, DomainError>;
}
