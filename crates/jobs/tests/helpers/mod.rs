#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_mdns_application::clock::ManualClock;
use ferrous_mdns_application::ports::MdnsTransport;
use ferrous_mdns_application::services::{CacheUpdateSignal, UnicastPreference};
use ferrous_mdns_application::use_cases::{BrowseServiceUseCase, IngestMessageUseCase};
use ferrous_mdns_domain::DomainError;
use ferrous_mdns_infrastructure::mdns::{MdnsRecordCache, MemoryPeer, MemoryTransport, SentMessage};
use hickory_proto::op::Message;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct JobFixture {
    pub clock: Arc<ManualClock>,
    pub cache: Arc<MdnsRecordCache>,
    pub updates: Arc<CacheUpdateSignal>,
    pub unicast: Arc<UnicastPreference>,
    pub transport: Arc<MemoryTransport>,
    pub peer: MemoryPeer,
}

impl JobFixture {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(MdnsRecordCache::new(clock.clone()));
        let (transport, peer) = MemoryTransport::pair();
        Self {
            clock,
            cache,
            updates: Arc::new(CacheUpdateSignal::new()),
            unicast: Arc::new(UnicastPreference::default()),
            transport: Arc::new(transport),
            peer,
        }
    }

    pub fn browse_use_case(&self) -> Arc<BrowseServiceUseCase> {
        Arc::new(BrowseServiceUseCase::new(
            self.transport.clone(),
            self.unicast.clone(),
        ))
    }

    pub fn ingest_use_case(&self) -> Arc<IngestMessageUseCase> {
        Arc::new(IngestMessageUseCase::new(
            self.cache.clone(),
            self.updates.clone(),
        ))
    }

    pub async fn next_sent(&mut self) -> SentMessage {
        tokio::time::timeout(Duration::from_secs(2), self.peer.next_sent())
            .await
            .expect("timed out waiting for an outgoing message")
            .expect("transport dropped")
    }

    /// Asserts nothing else was sent after letting background tasks run.
    pub async fn assert_quiet(&mut self) {
        tokio::time::sleep(Duration::from_millis(30)).await;
        let extra = self.peer.drain_sent();
        assert!(extra.is_empty(), "unexpected messages: {}", extra.len());
    }
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Transport whose sends always fail.
#[derive(Default)]
pub struct UnreachableTransport {
    pub send_calls: AtomicU64,
}

impl UnreachableTransport {
    pub fn send_calls(&self) -> u64 {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MdnsTransport for UnreachableTransport {
    async fn send(&self, _message: &Message) -> Result<(), DomainError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Transport("network unreachable".to_string()))
    }

    async fn receive(&self) -> Option<Message> {
        std::future::pending().await
    }

    async fn close(&self) {}

    fn transport_name(&self) -> &'static str {
        "unreachable"
    }
}
