use super::client_config::KubeClientConfig;
use super::model::ServiceList;
use async_trait::async_trait;
use hairpin_dns_application::ports::ServiceDirectory;
use hairpin_dns_domain::{DomainError, ServiceRecord};
use std::sync::Arc;
use tracing::debug;

/// Lists services straight from the API server on every call. No watch,
/// no cache, no pagination.
#[derive(Clone)]
pub struct KubernetesServiceDirectory {
    client: reqwest::Client,
    api_server: Arc<str>,
    token: Option<Arc<str>>,
}

impl KubernetesServiceDirectory {
    pub fn new(client: reqwest::Client, config: &KubeClientConfig) -> Self {
        Self {
            client,
            api_server: Arc::from(config.api_server.as_str()),
            token: config.token.as_deref().map(Arc::from),
        }
    }

    pub fn from_config(config: &KubeClientConfig) -> Result<Self, DomainError> {
        Ok(Self::new(config.build_client()?, config))
    }

    pub fn services_url(&self, namespace: &str) -> String {
        format!("{}/api/v1/namespaces/{}/services", self.api_server, namespace)
    }
}

#[async_trait]
impl ServiceDirectory for KubernetesServiceDirectory {
    async fn snapshot(&self, namespace: &str) -> Result<Vec<ServiceRecord>, DomainError> {
        let url = self.services_url(namespace);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::DirectoryUnavailable(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::DirectoryUnavailable(format!(
                "HTTP {} listing services in {}",
                status.as_u16(),
                namespace
            )));
        }

        let list: ServiceList = response.json().await.map_err(|e| {
            DomainError::DirectoryUnavailable(format!("Invalid service list: {}", e))
        })?;

        let total = list.items.len();
        let records: Vec<ServiceRecord> = list
            .items
            .iter()
            .filter_map(|service| {
                let record = service.to_record(namespace);
                if record.is_none() {
                    debug!(
                        service = %service.metadata.name,
                        cluster_ip = ?service.spec.cluster_ip,
                        "Skipping service without IPv4 cluster address"
                    );
                }
                record
            })
            .collect();

        debug!(namespace = %namespace, total, usable = records.len(), "Listed services");
        Ok(records)
    }
}
