//! Hairpin DNS Domain Layer
pub mod address_mapping;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod service_record;

pub use address_mapping::{AddressMapping, MappedService};
pub use config::{
    AddressSelection, CliOverrides, Config, ConfigError, DirectoryConfig, DnsConfig,
    LoggingConfig, ServerConfig,
};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use service_record::{ExposureKind, ServiceRecord};
