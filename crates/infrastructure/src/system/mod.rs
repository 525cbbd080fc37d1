pub mod system_resolver;

pub use system_resolver::SystemAddressResolver;
