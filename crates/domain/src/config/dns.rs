use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Which resolved address is rewritten when the resolver returns several.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressSelection {
    /// First address in resolver order.
    #[default]
    First,

    /// Numerically lowest address, stable under round-robin answers.
    Lowest,

    /// Exactly one address required, anything else is handed downstream.
    Single,
}

impl AddressSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Lowest => "lowest",
            Self::Single => "single",
        }
    }

    /// Returns `None` when the policy declines to pick, which includes an
    /// empty candidate list.
    pub fn select(&self, candidates: &[Ipv4Addr]) -> Option<Ipv4Addr> {
        match self {
            Self::First => candidates.first().copied(),
            Self::Lowest => candidates.iter().min().copied(),
            Self::Single => match candidates {
                [only] => Some(*only),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Deadline in seconds for each resolver and directory call.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default = "default_answer_ttl")]
    pub answer_ttl: u32,

    #[serde(default)]
    pub address_selection: AddressSelection,

    /// Where declined queries are forwarded. Empty means SERVFAIL.
    #[serde(default)]
    pub upstream_servers: Vec<String>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            answer_ttl: default_answer_ttl(),
            address_selection: AddressSelection::default(),
            upstream_servers: vec![],
        }
    }
}

impl DnsConfig {
    pub fn query_deadline(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

fn default_query_timeout() -> u64 {
    5
}

fn default_answer_ttl() -> u32 {
    60
}
