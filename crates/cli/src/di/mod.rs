mod dns;

pub use dns::{DnsHandler, DnsServices};
