use async_trait::async_trait;
use ferrous_mdns_domain::DomainError;
use hickory_proto::op::Message;

/// Port for the channel mDNS messages travel over.
#[async_trait]
pub trait MdnsTransport: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), DomainError>;

    /// Next inbound message, or `None` once the transport has been closed.
    ///
    /// Must be cancel-safe: callers race it against shutdown.
    async fn receive(&self) -> Option<Message>;

    async fn close(&self);

    fn transport_name(&self) -> &'static str;
}
