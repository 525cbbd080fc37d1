//! Kubernetes core/v1 service listing as a [`ServiceDirectory`].
//!
//! [`ServiceDirectory`]: hairpin_dns_application::ports::ServiceDirectory

pub mod client_config;
pub mod kubernetes;
pub mod model;

pub use client_config::KubeClientConfig;
pub use kubernetes::KubernetesServiceDirectory;
