#![allow(dead_code)]

use async_trait::async_trait;
use hairpin_dns_application::ports::{AddressResolver, ServiceDirectory};
use hairpin_dns_domain::{DomainError, ExposureKind, ServiceRecord};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockAddressResolver {
    responses: Arc<RwLock<HashMap<String, Vec<Ipv4Addr>>>>,
    errors: Arc<RwLock<HashMap<String, DomainError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
    calls: Arc<AtomicUsize>,
    last_hostname: Arc<RwLock<Option<String>>>,
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

    pub fn set_error(&self, hostname: &str, error: DomainError) {
        self.errors
            .write()
            .unwrap()
            .insert(hostname.to_string(), error);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_hostname(&self) -> Option<String> {
        self.last_hostname.read().unwrap().clone()
    }
}

#[async_trait]
impl AddressResolver for MockAddressResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_hostname.write().unwrap() = Some(hostname.to_string());

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.errors.read().unwrap().get(hostname).cloned() {
            return Err(err);
        }

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
    delay: Arc<RwLock<Option<Duration>>>,
    calls: Arc<AtomicUsize>,
    namespaces: Arc<RwLock<Vec<String>>>,
}

impl MockServiceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ServiceRecord>) -> Self {
        let directory = Self::new();
        *directory.records.write().unwrap() = records;
        directory
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

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.namespaces.read().unwrap().clone()
    }
}

#[async_trait]
impl ServiceDirectory for MockServiceDirectory {
    async fn snapshot(&self, namespace: &str) -> Result<Vec<ServiceRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.namespaces.write().unwrap().push(namespace.to_string());

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.should_fail.read().unwrap() {
            return Err(DomainError::DirectoryUnavailable(
                "403 Forbidden".to_string(),
            ));
        }

        Ok(self.records.read().unwrap().clone())
    }
}
