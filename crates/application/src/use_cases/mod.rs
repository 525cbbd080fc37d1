pub mod dns;

pub use dns::{
    DelegateReason, HandleDnsQueryUseCase, QueryDecision, RewriteAddressUseCase, RewriteOutcome,
};
