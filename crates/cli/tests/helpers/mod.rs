#![allow(dead_code)]

use ferrous_mdns::{
    parse_zone, Client, ClientOptions, ManualClock, MemoryPeer, MemoryTransport, Record,
    SentMessage,
};
use hickory_proto::op::{Message, MessageType};
use std::sync::Arc;
use std::time::Duration;

pub const RETRY: Duration = Duration::from_secs(1);

pub const ZONE: &str = r#"
www.epiclabs.io         300 IN CNAME myserver.epiclabs.io.
myserver.epiclabs.io    300 IN A     10.10.10.10
"#;

pub struct ClientFixture {
    pub clock: Arc<ManualClock>,
    pub transport: Arc<MemoryTransport>,
    pub peer: MemoryPeer,
    pub client: Arc<Client>,
}

impl ClientFixture {
    pub fn new() -> Self {
        Self::with_options(ClientOptions::new())
    }

    pub fn with_options(options: ClientOptions) -> Self {
        let clock = Arc::new(ManualClock::new());
        let (transport, peer) = MemoryTransport::pair();
        let transport = Arc::new(transport);
        let client = Client::new(
            options
                .with_retry_period(RETRY)
                .with_transport(transport.clone())
                .with_clock(clock.clone()),
        )
        .unwrap();

        Self {
            clock,
            transport,
            peer,
            client: Arc::new(client),
        }
    }

    pub async fn next_sent(&mut self) -> SentMessage {
        tokio::time::timeout(Duration::from_secs(2), self.peer.next_sent())
            .await
            .expect("timed out waiting for an outgoing message")
            .expect("transport dropped")
    }

    pub async fn assert_quiet(&mut self) {
        tokio::time::sleep(Duration::from_millis(30)).await;
        let extra = self.peer.drain_sent();
        assert!(extra.is_empty(), "unexpected messages: {}", extra.len());
    }

    /// Delivers a response carrying `answers` as if a responder sent it.
    pub fn respond(&self, answers: Vec<Record>) {
        let mut response = Message::new();
        response
            .set_message_type(MessageType::Response)
            .set_authoritative(true)
            .add_answers(answers);
        self.peer.deliver(&response).unwrap();
    }
}

pub fn zone(text: &str) -> Vec<Record> {
    parse_zone(text).unwrap()
}

/// `owner TYPE` for each record, in order.
pub fn summary(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| format!("{} {}", r.name().to_ascii(), r.record_type()))
        .collect()
}
