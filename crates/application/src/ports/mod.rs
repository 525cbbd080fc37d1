mod address_resolver;
mod service_directory;

pub use address_resolver::AddressResolver;
pub use service_directory::ServiceDirectory;
