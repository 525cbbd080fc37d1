use super::RecordType;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    /// Owner name exactly as asked, trailing root dot included.
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Hostname form expected by the system resolver.
    pub fn hostname(&self) -> &str {
        self.domain.strip_suffix('.').unwrap_or(&self.domain)
    }
}
