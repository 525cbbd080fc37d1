use crate::di::DnsHandler;
use hickory_server::ServerFuture;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs `num_workers` UDP+TCP listener pairs on the same address until
/// Ctrl-C, then shuts every listener down gracefully.
pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsHandler,
    num_workers: usize,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    info!(bind_address = %socket_addr, num_workers, "Starting DNS server with SO_REUSEPORT");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut join_set: JoinSet<()> = JoinSet::new();

    for i in 0..num_workers {
        let mut server = ServerFuture::new(handler.clone());
        server.register_socket(create_udp_socket(domain, socket_addr)?);
        server.register_listener(create_tcp_listener(domain, socket_addr)?, TCP_IDLE_TIMEOUT);

        let mut shutdown = shutdown_rx.clone();
        join_set.spawn(async move {
            let stop_requested = tokio::select! {
                result = server.block_until_done() => {
                    if let Err(e) = result {
                        error!(worker = i, error = %e, "DNS worker error");
                    }
                    false
                }
                _ = shutdown.changed() => true,
            };

            if stop_requested {
                if let Err(e) = server.shutdown_gracefully().await {
                    warn!(worker = i, error = %e, "DNS worker did not shut down cleanly");
                }
            }
        });
    }

    info!("DNS server ready, {} workers on {}", num_workers, socket_addr);

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        }
        _ = join_set.join_next() => {
            warn!("DNS worker exited unexpectedly");
            let _ = shutdown_tx.send(true);
        }
    }

    while join_set.join_next().await.is_some() {}
    Ok(())
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
