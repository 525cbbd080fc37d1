pub mod downstream;
pub mod forwarding;
pub mod response_builder;
pub mod server;

pub use downstream::{Downstream, FailureHandler, ForwardingHandler};
pub use forwarding::DnsForwarder;
pub use response_builder::ResponseBuilder;
pub use server::HairpinRequestHandler;
