use super::message_builder::MessageBuilder;
use hairpin_dns_domain::DomainError;
use hickory_proto::op::Message;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

const MAX_RESPONSE_SIZE: usize = 4096;

/// Relays encoded requests to upstream servers in configured order.
///
/// One relay is bounded by `timeout` in total. Each attempt gets an equal
/// share of what is left, so a silent server cannot starve the ones after it.
/// The first well-formed response with the request's id wins.
pub struct DnsForwarder {
    servers: Vec<SocketAddr>,
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(servers: &[SocketAddr], timeout: Duration) -> Self {
        Self {
            servers: servers.to_vec(),
            timeout,
        }
    }

    pub async fn forward(&self, request_bytes: &[u8], id: u16) -> Result<Message, DomainError> {
        let deadline = Instant::now()
            .checked_add(self.timeout)
            .unwrap_or_else(Instant::now);
        let mut last_error = DomainError::ForwardingFailed("no upstream servers".to_string());

        for (index, server) in self.servers.iter().enumerate() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                last_error = DomainError::QueryTimeout;
                break;
            }
            let attempt_deadline = Instant::now() + remaining / (self.servers.len() - index) as u32;

            let bytes = match exchange(*server, request_bytes, attempt_deadline).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(server = %server, error = %e, "Upstream query failed");
                    last_error = e;
                    continue;
                }
            };

            let message = match MessageBuilder::parse_response(&bytes) {
                Ok(message) => message,
                Err(e) => {
                    warn!(server = %server, error = %e, "Upstream response rejected");
                    last_error = e;
                    continue;
                }
            };

            if message.id() != id {
                warn!(
                    server = %server,
                    expected = id,
                    received = message.id(),
                    "Upstream response id mismatch"
                );
                last_error =
                    DomainError::ForwardingFailed(format!("Response id mismatch from {}", server));
                continue;
            }

            debug!(server = %server, answers = message.answer_count(), "Upstream answered");
            return Ok(message);
        }

        Err(last_error)
    }
}

/// One datagram round trip on a socket connected to `server`, so the kernel
/// drops datagrams from any other source.
async fn exchange(
    server: SocketAddr,
    request_bytes: &[u8],
    deadline: Instant,
) -> Result<Vec<u8>, DomainError> {
    let bind_addr: SocketAddr = if server.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let round_trip = async {
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(server).await?;
        socket.send(request_bytes).await?;

        let mut buf = vec![0u8; MAX_RESPONSE_SIZE];
        let len = socket.recv(&mut buf).await?;
        buf.truncate(len);
        Ok::<_, std::io::Error>(buf)
    };

    tokio::time::timeout_at(deadline, round_trip)
        .await
        .map_err(|_| DomainError::ForwardingFailed(format!("Timeout waiting for {}", server)))?
        .map_err(|e| DomainError::ForwardingFailed(format!("UDP exchange with {}: {}", server, e)))
}
