//! IPv4 multicast transport (RFC 6762 §3, §11).
//!
//! One socket bound to the mDNS port and joined to 224.0.0.251 carries both
//! directions: questions go to the group, and every datagram heard on the
//! group is surfaced as an inbound message.

use async_trait::async_trait;
use ferrous_mdns_application::ports::MdnsTransport;
use ferrous_mdns_domain::config::transport::{MDNS_IPV4_GROUP, MDNS_PORT};
use ferrous_mdns_domain::{DomainError, TransportConfig};
use hickory_proto::op::Message;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub const MDNS_IPV4_DESTINATION: SocketAddrV4 = SocketAddrV4::new(MDNS_IPV4_GROUP, MDNS_PORT);

/// Largest datagram accepted (RFC 6762 §17).
const MAX_MDNS_MESSAGE_SIZE: usize = 9000;

const RECEIVE_ERROR_BACKOFF: Duration = Duration::from_millis(100);
const MAX_CONSECUTIVE_RECEIVE_ERRORS: u32 = 20;

/// The socket is dropped on `close`, leaving the group and freeing the port.
pub struct UdpMulticastTransport {
    socket: Mutex<Option<Arc<UdpSocket>>>,
    destination: SocketAddr,
    closed: CancellationToken,
}

impl UdpMulticastTransport {
    /// Binds and joins the group. Must be called within a Tokio runtime.
    pub fn bind(config: &TransportConfig) -> Result<Self, DomainError> {
        let socket = create_multicast_socket(config)?;
        let socket = UdpSocket::from_std(socket)
            .map_err(|e| DomainError::IoError(format!("failed to register socket: {}", e)))?;

        info!(
            interface = %config.interface,
            port = config.port,
            group = %MDNS_IPV4_GROUP,
            "mDNS multicast socket ready"
        );

        Ok(Self {
            socket: Mutex::new(Some(Arc::new(socket))),
            destination: SocketAddr::V4(SocketAddrV4::new(MDNS_IPV4_GROUP, config.port)),
            closed: CancellationToken::new(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket()?
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    fn socket(&self) -> Result<Arc<UdpSocket>, DomainError> {
        self.socket
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(DomainError::TransportClosed)
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }
}

fn create_multicast_socket(config: &TransportConfig) -> Result<std::net::UdpSocket, DomainError> {
    let io = |what: &str, e: std::io::Error| DomainError::IoError(format!("{}: {}", what, e));

    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| io("failed to create socket", e))?;
    socket
        .set_reuse_address(true)
        .map_err(|e| io("failed to set SO_REUSEADDR", e))?;
    #[cfg(unix)]
    socket
        .set_reuse_port(true)
        .map_err(|e| io("failed to set SO_REUSEPORT", e))?;

    let bind_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, config.port);
    socket
        .bind(&bind_addr.into())
        .map_err(|e| io(&format!("failed to bind to {}", bind_addr), e))?;
    socket
        .join_multicast_v4(&MDNS_IPV4_GROUP, &config.interface)
        .map_err(|e| io("failed to join multicast group", e))?;
    if !config.interface.is_unspecified() {
        socket
            .set_multicast_if_v4(&config.interface)
            .map_err(|e| io("failed to select multicast interface", e))?;
    }
    socket
        .set_multicast_ttl_v4(config.multicast_ttl)
        .map_err(|e| io("failed to set multicast TTL", e))?;
    socket
        .set_multicast_loop_v4(config.multicast_loop)
        .map_err(|e| io("failed to set multicast loopback", e))?;
    socket
        .set_nonblocking(true)
        .map_err(|e| io("failed to set non-blocking", e))?;

    Ok(socket.into())
}

#[async_trait]
impl MdnsTransport for UdpMulticastTransport {
    async fn send(&self, message: &Message) -> Result<(), DomainError> {
        let socket = self.socket()?;
        let bytes = message
            .to_vec()
            .map_err(|e| DomainError::InvalidMessage(e.to_string()))?;
        let bytes_sent = socket
            .send_to(&bytes, self.destination)
            .await
            .map_err(|e| {
                DomainError::Transport(format!("send to {} failed: {}", self.destination, e))
            })?;

        debug!(destination = %self.destination, bytes_sent, "mDNS datagram sent");
        Ok(())
    }

    async fn receive(&self) -> Option<Message> {
        let socket = self.socket().ok()?;
        let mut buf = vec![0u8; MAX_MDNS_MESSAGE_SIZE];
        let mut consecutive_errors = 0;
        loop {
            let received = tokio::select! {
                _ = self.closed.cancelled() => return None,
                received = socket.recv_from(&mut buf) => received,
            };

            match received {
                Ok((len, from)) => {
                    consecutive_errors = 0;
                    match Message::from_vec(&buf[..len]) {
                        Ok(message) => return Some(message),
                        Err(e) => {
                            debug!(from = %from, error = %e, "Dropping undecodable datagram")
                        }
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;
                    let Some(backoff) = receive_backoff(consecutive_errors) else {
                        error!(error = %e, consecutive_errors, "mDNS receive keeps failing, giving up");
                        return None;
                    };
                    warn!(error = %e, consecutive_errors, "mDNS receive failed");
                    tokio::select! {
                        _ = self.closed.cancelled() => return None,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }
    }

    async fn close(&self) {
        self.closed.cancel();
        let socket = self
            .socket
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if socket.is_some() {
            info!("mDNS multicast socket released");
        }
    }

    fn transport_name(&self) -> &'static str {
        "UDP multicast"
    }
}

/// Pause after the `n`th receive error in a row; `None` once it is time to stop.
fn receive_backoff(consecutive_errors: u32) -> Option<Duration> {
    (consecutive_errors < MAX_CONSECUTIVE_RECEIVE_ERRORS).then_some(RECEIVE_ERROR_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_receive_errors_back_off_then_stop() {
        assert_eq!(receive_backoff(1), Some(RECEIVE_ERROR_BACKOFF));
        assert_eq!(
            receive_backoff(MAX_CONSECUTIVE_RECEIVE_ERRORS - 1),
            Some(RECEIVE_ERROR_BACKOFF)
        );
        assert_eq!(receive_backoff(MAX_CONSECUTIVE_RECEIVE_ERRORS), None);
    }

    #[tokio::test]
    async fn close_releases_the_socket() {
        let config = TransportConfig {
            port: 0,
            ..TransportConfig::default()
        };
        // Hosts without a multicast-capable interface cannot join the group.
        let Ok(transport) = UdpMulticastTransport::bind(&config) else {
            return;
        };
        assert!(transport.local_addr().is_ok());

        transport.close().await;

        assert_eq!(transport.local_addr(), Err(DomainError::TransportClosed));
        assert_eq!(
            transport.send(&Message::new()).await,
            Err(DomainError::TransportClosed)
        );
        assert!(transport.receive().await.is_none());
        assert!(transport.socket.lock().unwrap().is_none());
    }

    #[test]
    fn destination_is_the_ipv4_group() {
        assert_eq!(
            MDNS_IPV4_DESTINATION.to_string(),
            "224.0.0.251:5353"
        );
    }
}
