//! In-process transport pair.
//!
//! Everything crosses the pair in wire format, so the peer sees exactly the
//! bytes a real link would carry.

use async_trait::async_trait;
use ferrous_mdns_application::ports::MdnsTransport;
use ferrous_mdns_domain::DomainError;
use hickory_proto::op::Message;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

/// A message as it left the transport.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub bytes: Vec<u8>,
    pub message: Message,
}

pub struct MemoryTransport {
    outbound: mpsc::UnboundedSender<SentMessage>,
    inbound: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
    closed: CancellationToken,
}

/// The far end of a [`MemoryTransport`].
pub struct MemoryPeer {
    sent: mpsc::UnboundedReceiver<SentMessage>,
    inbound: mpsc::UnboundedSender<Vec<u8>>,
}

impl MemoryTransport {
    pub fn pair() -> (Self, MemoryPeer) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        let transport = Self {
            outbound: outbound_tx,
            inbound: Mutex::new(inbound_rx),
            closed: CancellationToken::new(),
        };
        let peer = MemoryPeer {
            sent: outbound_rx,
            inbound: inbound_tx,
        };
        (transport, peer)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}

#[async_trait]
impl MdnsTransport for MemoryTransport {
    async fn send(&self, message: &Message) -> Result<(), DomainError> {
        if self.closed.is_cancelled() {
            return Err(DomainError::TransportClosed);
        }

        let bytes = message
            .to_vec()
            .map_err(|e| DomainError::InvalidMessage(e.to_string()))?;
        let message = Message::from_vec(&bytes)
            .map_err(|e| DomainError::InvalidMessage(e.to_string()))?;

        self.outbound
            .send(SentMessage { bytes, message })
            .map_err(|_| DomainError::Transport("memory peer dropped".to_string()))
    }

    async fn receive(&self) -> Option<Message> {
        let mut inbound = tokio::select! {
            _ = self.closed.cancelled() => return None,
            inbound = self.inbound.lock() => inbound,
        };

        loop {
            let bytes = tokio::select! {
                _ = self.closed.cancelled() => return None,
                bytes = inbound.recv() => bytes?,
            };
            match Message::from_vec(&bytes) {
                Ok(message) => return Some(message),
                Err(e) => tracing::debug!(error = %e, "Dropping undecodable message"),
            }
        }
    }

    async fn close(&self) {
        self.closed.cancel();
    }

    fn transport_name(&self) -> &'static str {
        "memory"
    }
}

impl MemoryPeer {
    /// Next message sent by the transport; `None` once it has been dropped.
    pub async fn next_sent(&mut self) -> Option<SentMessage> {
        self.sent.recv().await
    }

    pub fn try_next_sent(&mut self) -> Option<SentMessage> {
        self.sent.try_recv().ok()
    }

    /// Everything sent so far without waiting.
    pub fn drain_sent(&mut self) -> Vec<SentMessage> {
        std::iter::from_fn(|| self.try_next_sent()).collect()
    }

    pub fn deliver(&self, message: &Message) -> Result<(), DomainError> {
        let bytes = message
            .to_vec()
            .map_err(|e| DomainError::InvalidMessage(e.to_string()))?;
        self.deliver_bytes(bytes)
    }

    /// Injects raw datagram contents, decodable or not.
    pub fn deliver_bytes(&self, bytes: Vec<u8>) -> Result<(), DomainError> {
        self.inbound
            .send(bytes)
            .map_err(|_| DomainError::TransportClosed)
    }
}
