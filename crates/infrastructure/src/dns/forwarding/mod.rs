pub mod forwarder;
pub mod message_builder;
pub mod record_type_map;

pub use forwarder::DnsForwarder;
pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
