use super::deadline::deadline_after;
use crate::ports::ServiceDirectory;
use hairpin_dns_domain::{AddressMapping, DomainError};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Address the resolver produced.
    pub resolved: Ipv4Addr,
    /// Address to put in the answer.
    pub answer: Ipv4Addr,
    /// Owning service when a rewrite happened.
    pub service: Option<Arc<str>>,
}

impl RewriteOutcome {
    fn unchanged(resolved: Ipv4Addr) -> Self {
        Self {
            resolved,
            answer: resolved,
            service: None,
        }
    }

    pub fn is_rewritten(&self) -> bool {
        self.service.is_some()
    }
}

/// Maps an externally exposed address to its service's cluster address.
///
/// Every call takes a fresh directory snapshot. A directory failure returns
/// the input unchanged so the query still gets a positive answer.
pub struct RewriteAddressUseCase {
    directory: Arc<dyn ServiceDirectory>,
    namespace: Arc<str>,
    timeout: Duration,
}

impl RewriteAddressUseCase {
    pub fn new(
        directory: Arc<dyn ServiceDirectory>,
        namespace: impl Into<Arc<str>>,
        timeout: Duration,
    ) -> Self {
        Self {
            directory,
            namespace: namespace.into(),
            timeout,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub async fn execute(&self, external: Ipv4Addr) -> RewriteOutcome {
        self.execute_before(external, deadline_after(self.timeout))
            .await
    }

    /// Same as [`execute`](Self::execute) but bounded by the caller's deadline.
    pub async fn execute_before(&self, external: Ipv4Addr, deadline: Instant) -> RewriteOutcome {
        let snapshot =
            match tokio::time::timeout_at(deadline, self.directory.snapshot(&self.namespace)).await
            {
                Ok(result) => result,
                Err(_) => Err(DomainError::DirectoryUnavailable(format!(
                    "listing services in {} timed out",
                    self.namespace
                ))),
            };

        let records = match snapshot {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    namespace = %self.namespace,
                    address = %external,
                    error = %e,
                    "Service directory unavailable, answering with resolved address"
                );
                return RewriteOutcome::unchanged(external);
            }
        };

        let mapping = AddressMapping::from_records(&records);

        match mapping.lookup(external) {
            Some(mapped) => RewriteOutcome {
                resolved: external,
                answer: mapped.internal_address,
                service: Some(Arc::clone(&mapped.name)),
            },
            None => {
                debug!(
                    namespace = %self.namespace,
                    address = %external,
                    services = records.len(),
                    exposed = mapping.len(),
                    "No exposed service owns address"
                );
                RewriteOutcome::unchanged(external)
            }
        }
    }
}
