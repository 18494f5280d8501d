#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_mdns_application::ports::{CnameChain, MdnsTransport, PurgeOutcome, RecordCache};
use ferrous_mdns_domain::DomainError;
use hickory_proto::op::Message;
use hickory_proto::rr::rdata::{A, CNAME, PTR};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub struct MockTransport {
    sent: Mutex<Vec<Message>>,
    sends: watch::Sender<usize>,
    send_calls: AtomicU64,
    fail_sends: AtomicBool,
    closed: CancellationToken,
}

impl MockTransport {
    pub fn new() -> Self {
        let (sends, _) = watch::channel(0);
        Self {
            sent: Mutex::new(Vec::new()),
            sends,
            send_calls: AtomicU64::new(0),
            fail_sends: AtomicBool::new(false),
            closed: CancellationToken::new(),
        }
    }

    pub fn failing() -> Self {
        let transport = Self::new();
        transport.fail_sends.store(true, Ordering::SeqCst);
        transport
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_sends.store(failing, Ordering::SeqCst);
    }

    pub fn send_calls(&self) -> u64 {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits until at least `count` send attempts were made, failed ones included.
    pub async fn wait_for_sends(&self, count: usize) -> Vec<Message> {
        let mut attempts = self.sends.subscribe();
        tokio::time::timeout(Duration::from_secs(2), attempts.wait_for(|n| *n >= count))
            .await
            .expect("timed out waiting for sends")
            .expect("transport dropped");
        self.sent()
    }
}

#[async_trait]
impl MdnsTransport for MockTransport {
    async fn send(&self, message: &Message) -> Result<(), DomainError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_sends.load(Ordering::SeqCst) {
            Err(DomainError::Transport("network unreachable".to_string()))
        } else {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        };
        self.sends.send_modify(|n| *n += 1);
        result
    }

    async fn receive(&self) -> Option<Message> {
        self.closed.cancelled().await;
        None
    }

    async fn close(&self) {
        self.closed.cancel();
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}

/// Flat record list without TTL bookkeeping; follows at most one alias.
#[derive(Default)]
pub struct MockRecordCache {
    records: Mutex<Vec<Record>>,
    lookups: AtomicU64,
}

impl MockRecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }

    fn matching(records: &[Record], name: &Name, record_type: RecordType) -> Vec<Record> {
        records
            .iter()
            .filter(|r| r.name() == name && r.record_type() == record_type)
            .cloned()
            .collect()
    }
}

impl RecordCache for MockRecordCache {
    fn add_records(&self, records: Vec<Record>) {
        self.records.lock().unwrap().extend(records);
    }

    fn cached_answers(
        &self,
        name: &Name,
        record_type: RecordType,
        cnames: &mut CnameChain,
    ) -> Vec<Record> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().unwrap();

        let direct = Self::matching(&records, name, record_type);
        if !direct.is_empty() {
            return direct;
        }

        let alias = Self::matching(&records, name, RecordType::CNAME);
        match alias.first().and_then(|r| r.data()) {
            Some(RData::CNAME(target)) => {
                cnames.record(alias[0].clone());
                Self::matching(&records, &target.0, record_type)
            }
            _ => Vec::new(),
        }
    }

    fn purge(&self) -> PurgeOutcome {
        PurgeOutcome {
            entries_removed: 0,
            cache_size: self.len(),
        }
    }

    fn snapshot(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn a_record(owner: &str, ttl: u32, ip: [u8; 4]) -> Record {
    Record::from_rdata(name(owner), ttl, RData::A(A(Ipv4Addr::from(ip))))
}

pub fn cname_record(owner: &str, ttl: u32, target: &str) -> Record {
    Record::from_rdata(name(owner), ttl, RData::CNAME(CNAME(name(target))))
}

pub fn ptr_record(owner: &str, ttl: u32, target: &str) -> Record {
    Record::from_rdata(name(owner), ttl, RData::PTR(PTR(name(target))))
}
