#![allow(dead_code)]
use hairpin_dns_domain::{ExposureKind, ServiceRecord};
use std::net::Ipv4Addr;

pub struct ServiceRecordBuilder {
    name: String,
    namespace: String,
    exposure_kind: ExposureKind,
    internal_address: Ipv4Addr,
    external_addresses: Vec<Ipv4Addr>,
}

impl ServiceRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "web".to_string(),
            namespace: "default".to_string(),
            exposure_kind: ExposureKind::LoadBalancer,
            internal_address: Ipv4Addr::new(10, 0, 0, 1),
            external_addresses: vec![],
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn kind(mut self, kind: ExposureKind) -> Self {
        self.exposure_kind = kind;
        self
    }

    pub fn internal(mut self, ip: &str) -> Self {
        self.internal_address = ip.parse().unwrap();
        self
    }

    pub fn external(mut self, ip: &str) -> Self {
        self.external_addresses.push(ip.parse().unwrap());
        self
    }

    pub fn build(self) -> ServiceRecord {
        let mut record = ServiceRecord::new(
            self.name,
            self.namespace,
            self.exposure_kind,
            self.internal_address,
        );
        for address in self.external_addresses {
            record.add_external_address(address);
        }
        record
    }
}

impl Default for ServiceRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
