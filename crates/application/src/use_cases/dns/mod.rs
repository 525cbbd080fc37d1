mod deadline;
mod handle_dns_query;
mod rewrite_address;

pub use handle_dns_query::{DelegateReason, HandleDnsQueryUseCase, QueryDecision};
pub use rewrite_address::{RewriteAddressUseCase, RewriteOutcome};
