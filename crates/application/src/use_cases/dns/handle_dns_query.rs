use super::deadline::deadline_after;
use super::rewrite_address::{RewriteAddressUseCase, RewriteOutcome};
use crate::ports::AddressResolver;
use hairpin_dns_domain::{AddressSelection, DnsQuery, DomainError, RecordType};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// What the dispatcher decided for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDecision {
    /// Answer synthetically with `outcome.answer`.
    Answer(RewriteOutcome),
    /// Hand the untouched query to the downstream handler.
    Delegate(DelegateReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateReason {
    UnsupportedType(RecordType),
    Resolution(DomainError),
}

pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn AddressResolver>,
    rewriter: Arc<RewriteAddressUseCase>,
    selection: AddressSelection,
    timeout: Duration,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        resolver: Arc<dyn AddressResolver>,
        rewriter: Arc<RewriteAddressUseCase>,
        timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            rewriter,
            selection: AddressSelection::default(),
            timeout,
        }
    }

    pub fn with_selection(mut self, selection: AddressSelection) -> Self {
        self.selection = selection;
        self
    }

    pub async fn execute(&self, query: &DnsQuery) -> QueryDecision {
        if !query.record_type.is_ipv4_address() {
            return QueryDecision::Delegate(DelegateReason::UnsupportedType(query.record_type));
        }

        let deadline = deadline_after(self.timeout);

        let external = match self.resolve(query, deadline).await {
            Ok(address) => address,
            Err(e) => {
                debug!(domain = %query.domain, error = %e, "Resolution failed, delegating");
                return QueryDecision::Delegate(DelegateReason::Resolution(e));
            }
        };

        let outcome = self.rewriter.execute_before(external, deadline).await;

        if let Some(service) = &outcome.service {
            info!(
                domain = %query.domain,
                resolved = %outcome.resolved,
                answer = %outcome.answer,
                service = %service,
                "Rewrote hairpin address"
            );
        }

        QueryDecision::Answer(outcome)
    }

    async fn resolve(
        &self,
        query: &DnsQuery,
        deadline: Instant,
    ) -> Result<std::net::Ipv4Addr, DomainError> {
        let hostname = query.hostname();
        if hostname.is_empty() {
            return Err(DomainError::InvalidDomainName(query.domain.to_string()));
        }

        let candidates = tokio::time::timeout_at(deadline, self.resolver.resolve(hostname))
            .await
            .map_err(|_| DomainError::QueryTimeout)??;

        self.selection
            .select(&candidates)
            .ok_or_else(|| match candidates.len() {
                0 => DomainError::NoAddresses(hostname.to_string()),
                count => DomainError::AmbiguousResolution {
                    domain: hostname.to_string(),
                    count,
                },
            })
    }
}
