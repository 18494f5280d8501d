#![allow(dead_code)]

use ferrous_mdns_application::clock::ManualClock;
use ferrous_mdns_application::ports::{CnameChain, RecordCache};
use ferrous_mdns_infrastructure::mdns::{parse_zone, MdnsRecordCache};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const ZONE: &str = r#"
_service1._tcp.local.       200 IN PTR   epic._service1._tcp.local.
_service1._tcp.local.       240 IN PTR   demo._service1._tcp.local.
epic._service1._tcp.local.  230 IN SRV   1 2 7979 praetor.epiclabs.io.
demo._service1._tcp.local.  100 IN SRV   5 6 8080 terminus.epiclabs.io.
demo._service1._tcp.local.  230 IN TXT   "demo text"
demo._service1._tcp.local.  260 IN TXT   "more demo text"
epic._service1._tcp.local.  240 IN TXT   "some text"
praetor.epiclabs.io.        250 IN CNAME primus.epiclabs.io.
primus.epiclabs.io          120 IN A     1.2.3.4
primus.epiclabs.io          110 IN AAAA  fe80::abc:cdef:0123:4567
terminus.epiclabs.io        2   IN A     5.6.7.8 ; short-lived
www.epiclabs.io             300 IN CNAME myserver.epiclabs.io.
myserver.epiclabs.io        300 IN A     10.10.10.10 ; duplicate below
myserver.epiclabs.io        400 IN A     10.10.10.10 ; higher TTL prevails
"#;

pub struct CacheFixture {
    pub clock: Arc<ManualClock>,
    pub cache: MdnsRecordCache,
}

impl CacheFixture {
    pub fn new(min_ttl: Duration) -> Self {
        let clock = Arc::new(ManualClock::new());
        let cache = MdnsRecordCache::new(clock.clone()).with_min_ttl(min_ttl);
        Self { clock, cache }
    }

    pub fn with_zone(min_ttl: Duration) -> Self {
        let fixture = Self::new(min_ttl);
        fixture.cache.add_records(parse_zone(ZONE).unwrap());
        fixture
    }

    pub fn at(&self, secs: u64) -> &Self {
        self.clock.set(Duration::from_secs(secs));
        self
    }

    pub fn lookup(&self, name: &str, record_type: RecordType) -> (Vec<Record>, CnameChain) {
        let mut cnames = CnameChain::new();
        let records = self
            .cache
            .cached_answers(&Name::from_str(name).unwrap(), record_type, &mut cnames);
        (records, cnames)
    }
}

/// `(owner, type, ttl, rdata)` rendered as text and sorted, for order-free comparison.
pub fn describe(records: &[Record]) -> Vec<String> {
    let mut lines: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "{} {} {} {}",
                r.name().to_ascii(),
                r.ttl(),
                r.record_type(),
                rdata_text(r)
            )
        })
        .collect();
    lines.sort();
    lines
}

fn rdata_text(record: &Record) -> String {
    match record.data() {
        Some(RData::TXT(txt)) => txt
            .iter()
            .map(|s| format!("\"{}\"", String::from_utf8_lossy(s)))
            .collect::<Vec<_>>()
            .join(" "),
        Some(data) => data.to_string(),
        None => String::new(),
    }
}
