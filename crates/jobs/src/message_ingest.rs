use ferrous_mdns_application::ports::MdnsTransport;
use ferrous_mdns_application::use_cases::IngestMessageUseCase;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Drains the transport into the cache until shutdown or until the
/// transport stops producing messages.
pub struct MessageIngestJob {
    transport: Arc<dyn MdnsTransport>,
    ingest: Arc<IngestMessageUseCase>,
    shutdown: CancellationToken,
}

impl MessageIngestJob {
    pub fn new(transport: Arc<dyn MdnsTransport>, ingest: Arc<IngestMessageUseCase>) -> Self {
        Self {
            transport,
            ingest,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            transport = self.transport.transport_name(),
            "Starting mDNS message ingest job"
        );

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    info!("MessageIngestJob: shutting down");
                    break;
                }
                inbound = self.transport.receive() => match inbound {
                    Some(message) => {
                        self.ingest.execute(&message);
                    }
                    None => {
                        info!("MessageIngestJob: inbound stream closed");
                        break;
                    }
                }
            }
        }
    }
}
