use async_trait::async_trait;
use hairpin_dns_application::ports::AddressResolver;
use hairpin_dns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// Resolves hostnames through the host's configured resolver
/// (`getaddrinfo` via `tokio::net::lookup_host`).
///
/// Only IPv4 results are kept, in resolver order with duplicates removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAddressResolver;

impl SystemAddressResolver {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn ipv4_only(addresses: impl IntoIterator<Item = IpAddr>) -> Vec<Ipv4Addr> {
        let mut out = Vec::new();
        for addr in addresses {
            if let IpAddr::V4(v4) = addr {
                if !out.contains(&v4) {
                    out.push(v4);
                }
            }
        }
        out
    }
}

#[async_trait]
impl AddressResolver for SystemAddressResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let resolved = tokio::net::lookup_host((hostname, 0))
            .await
            .map_err(|e| DomainError::ResolutionFailed {
                domain: hostname.to_string(),
                reason: e.to_string(),
            })?;

        let addresses = Self::ipv4_only(resolved.map(|sa| sa.ip()));
        debug!(hostname = %hostname, count = addresses.len(), "System resolver answered");
        Ok(addresses)
    }
}
