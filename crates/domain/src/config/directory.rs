use serde::{Deserialize, Serialize};

pub const SERVICE_ACCOUNT_TOKEN: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
pub const SERVICE_ACCOUNT_CA: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Namespace whose services are matched against resolved addresses.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// API server base URL. Empty means in-cluster discovery through
    /// `KUBERNETES_SERVICE_HOST` / `KUBERNETES_SERVICE_PORT`.
    #[serde(default)]
    pub api_server: String,

    #[serde(default = "default_token_path")]
    pub token_path: String,

    #[serde(default = "default_ca_path")]
    pub ca_path: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            api_server: String::new(),
            token_path: default_token_path(),
            ca_path: default_ca_path(),
        }
    }
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_token_path() -> String {
    SERVICE_ACCOUNT_TOKEN.to_string()
}

fn default_ca_path() -> String {
    SERVICE_ACCOUNT_CA.to_string()
}
