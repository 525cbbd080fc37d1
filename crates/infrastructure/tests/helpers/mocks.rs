#![allow(dead_code)]

use async_trait::async_trait;
use hairpin_dns_application::ports::{AddressResolver, ServiceDirectory};
use hairpin_dns_domain::{DomainError, ExposureKind, ServiceRecord};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
pub struct MockAddressResolver {
    responses: Arc<RwLock<HashMap<String, Vec<Ipv4Addr>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockAddressResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, hostname: &str, addresses: &[&str]) {
        self.responses.write().unwrap().insert(
            hostname.to_string(),
            addresses.iter().map(|a| a.parse().unwrap()).collect(),
        );
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for MockAddressResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .read()
            .unwrap()
            .get(hostname)
            .cloned()
            .ok_or_else(|| DomainError::ResolutionFailed {
                domain: hostname.to_string(),
                reason: "no such host".to_string(),
            })
    }
}

#[derive(Clone, Default)]
pub struct MockServiceDirectory {
    records: Arc<RwLock<Vec<ServiceRecord>>>,
    should_fail: Arc<RwLock<bool>>,
    calls: Arc<AtomicUsize>,
}

impl MockServiceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_service(&self, name: &str, kind: ExposureKind, internal: &str, external: &[&str]) {
        let mut record = ServiceRecord::new(name, "default", kind, internal.parse().unwrap());
        for address in external {
            record.add_external_address(address.parse().unwrap());
        }
        self.records.write().unwrap().push(record);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().unwrap() = should_fail;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServiceDirectory for MockServiceDirectory {
    async fn snapshot(&self, _namespace: &str) -> Result<Vec<ServiceRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().unwrap() {
            return Err(DomainError::DirectoryUnavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(self.records.read().unwrap().clone())
    }
}
