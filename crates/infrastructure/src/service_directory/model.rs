//! The subset of the core/v1 `ServiceList` schema the directory reads.
//! Unknown fields are ignored.

use hairpin_dns_domain::{ExposureKind, ServiceRecord};
use serde::Deserialize;
use std::net::Ipv4Addr;

#[derive(Debug, Default, Deserialize)]
pub struct ServiceList {
    #[serde(default)]
    pub items: Vec<Service>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ServiceSpec,
    #[serde(default)]
    pub status: ServiceStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    #[serde(rename = "clusterIP")]
    pub cluster_ip: Option<String>,
    #[serde(default, rename = "externalIPs")]
    pub external_ips: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    #[serde(default)]
    pub load_balancer: LoadBalancerStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoadBalancerStatus {
    #[serde(default)]
    pub ingress: Vec<LoadBalancerIngress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoadBalancerIngress {
    pub ip: Option<String>,
    pub hostname: Option<String>,
}

impl Service {
    /// `None` when the service has no usable IPv4 cluster address
    /// (headless, dual-stack v6 primary, or not yet allocated).
    pub fn to_record(&self, fallback_namespace: &str) -> Option<ServiceRecord> {
        let internal = self
            .spec
            .cluster_ip
            .as_deref()
            .and_then(|ip| ip.parse::<Ipv4Addr>().ok())?;

        let namespace = if self.metadata.namespace.is_empty() {
            fallback_namespace
        } else {
            self.metadata.namespace.as_str()
        };

        let mut record = ServiceRecord::new(
            self.metadata.name.as_str(),
            namespace,
            ExposureKind::from_service_type(self.spec.service_type.as_deref()),
            internal,
        );

        let ingress = self
            .status
            .load_balancer
            .ingress
            .iter()
            .filter_map(|entry| entry.ip.as_deref());

        for ip in ingress.chain(self.spec.external_ips.iter().map(String::as_str)) {
            if let Ok(addr) = ip.parse::<Ipv4Addr>() {
                record.add_external_address(addr);
            }
        }

        Some(record)
    }
}
