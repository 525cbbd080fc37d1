use async_trait::async_trait;
use hairpin_dns_domain::DomainError;
use std::net::Ipv4Addr;

#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve a bare hostname (no trailing root dot) to IPv4 addresses in
    /// resolver order. `Ok(vec![])` means the name exists but has no IPv4
    /// address; the dispatcher treats it as a resolution failure.
    async fn resolve(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError>;
}
