pub mod directory;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use directory::DirectoryConfig;
pub use dns::{AddressSelection, DnsConfig};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
