pub mod dns_harness;
pub mod mocks;

#[allow(unused_imports)]
pub use dns_harness::{
    build_query, query_udp, send_query, spawn_server, ReceivedRequest, RecordingDownstream,
    StubUpstream,
};
#[allow(unused_imports)]
pub use mocks::{MockAddressResolver, MockServiceDirectory};
