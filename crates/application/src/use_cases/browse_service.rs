use crate::ports::MdnsTransport;
use crate::services::{QuestionMessage, UnicastPreference};
use ferrous_mdns_domain::{DomainError, ServiceName};
use std::sync::Arc;
use tracing::debug;

/// Sends one PTR question enumerating instances of a service.
///
/// Fire-and-forget: replies reach the cache through the ingest loop.
pub struct BrowseServiceUseCase {
    transport: Arc<dyn MdnsTransport>,
    unicast: Arc<UnicastPreference>,
}

impl BrowseServiceUseCase {
    pub fn new(transport: Arc<dyn MdnsTransport>, unicast: Arc<UnicastPreference>) -> Self {
        Self { transport, unicast }
    }

    pub async fn execute(&self, service: &ServiceName) -> Result<(), DomainError> {
        let unicast_response = self.unicast.is_enabled();
        let message = QuestionMessage::browse(service, unicast_response)?;

        self.transport.send(&message).await?;
        debug!(
            service = %service,
            id = message.id(),
            unicast_response,
            transport = self.transport.transport_name(),
            "Browse query sent"
        );
        Ok(())
    }
}
