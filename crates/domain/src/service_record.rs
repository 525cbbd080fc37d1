use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// How a cluster service is reachable from outside the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExposureKind {
    LoadBalancer,
    NodePort,
    Other,
}

impl ExposureKind {
    /// Maps the control plane's `spec.type` string. Unknown or missing
    /// values are `Other`.
    pub fn from_service_type(service_type: Option<&str>) -> Self {
        match service_type {
            Some("LoadBalancer") => ExposureKind::LoadBalancer,
            Some("NodePort") => ExposureKind::NodePort,
            _ => ExposureKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExposureKind::LoadBalancer => "LoadBalancer",
            ExposureKind::NodePort => "NodePort",
            ExposureKind::Other => "Other",
        }
    }

    /// Only externally exposed services take part in rewriting.
    pub fn is_rewritable(&self) -> bool {
        matches!(self, ExposureKind::LoadBalancer | ExposureKind::NodePort)
    }
}

impl fmt::Display for ExposureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cluster service as currently reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: Arc<str>,
    pub namespace: Arc<str>,
    pub exposure_kind: ExposureKind,
    pub internal_address: Ipv4Addr,
    /// Ingress addresses in control-plane order, without duplicates.
    pub external_addresses: Vec<Ipv4Addr>,
}

impl ServiceRecord {
    pub fn new(
        name: impl Into<Arc<str>>,
        namespace: impl Into<Arc<str>>,
        exposure_kind: ExposureKind,
        internal_address: Ipv4Addr,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            exposure_kind,
            internal_address,
            external_addresses: Vec::new(),
        }
    }

    /// Adds an external address unless it is already present.
    pub fn with_external_address(mut self, address: Ipv4Addr) -> Self {
        self.add_external_address(address);
        self
    }

    pub fn add_external_address(&mut self, address: Ipv4Addr) {
        if !self.external_addresses.contains(&address) {
            self.external_addresses.push(address);
        }
    }

    pub fn exposes(&self, address: Ipv4Addr) -> bool {
        self.external_addresses.contains(&address)
    }
}
