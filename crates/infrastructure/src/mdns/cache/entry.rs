use ferrous_mdns_application::clock::deadline_after;
use hickory_proto::rr::{Name, RData, Record};
use std::time::{Duration, Instant};

/// A cached record and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct RecordEntry {
    record: Record,
    expires_at: Instant,
}

impl RecordEntry {
    /// The effective lifetime is the record TTL raised to `min_ttl`.
    pub fn new(record: Record, now: Instant, min_ttl: Duration) -> Self {
        let ttl = Duration::from_secs(u64::from(record.ttl())).max(min_ttl);
        Self {
            record,
            expires_at: deadline_after(now, ttl),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whole seconds left, truncated; zero once expired.
    pub fn remaining_ttl(&self, now: Instant) -> u32 {
        let remaining = self.expires_at.saturating_duration_since(now).as_secs();
        u32::try_from(remaining).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn is_live(&self, now: Instant) -> bool {
        self.remaining_ttl(now) > 0
    }

    pub fn same_data(&self, other: &Record) -> bool {
        self.record.data() == other.data()
    }

    pub fn cname_target(&self) -> Option<&Name> {
        match self.record.data() {
            Some(RData::CNAME(cname)) => Some(&cname.0),
            _ => None,
        }
    }

    /// Copy of the record with its TTL set to the time left.
    pub fn to_record(&self, now: Instant) -> Record {
        let mut record = self.record.clone();
        record.set_ttl(self.remaining_ttl(now));
        record
    }
}
