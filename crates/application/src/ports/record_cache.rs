use hickory_proto::rr::{Name, Record, RecordType};

/// CNAME records met while resolving, in first-seen order, one per owner name.
#[derive(Debug, Default, Clone)]
pub struct CnameChain {
    records: Vec<Record>,
}

impl CnameChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when an alias for the same owner was already recorded.
    pub fn record(&mut self, cname: Record) -> bool {
        if self.records.iter().any(|r| r.name() == cname.name()) {
            return false;
        }
        self.records.push(cname);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Outcome of a purge cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for the TTL-aware record store shared by every component of the client.
pub trait RecordCache: Send + Sync {
    /// Merge records. CNAMEs replace the alias for their owner name, everything
    /// else follows the duplicate policy of the implementation.
    fn add_records(&self, records: Vec<Record>);

    /// Live records for `(name, record_type)` with their TTL set to the time
    /// left. Follows aliases, pushing every CNAME crossed into `cnames`.
    fn cached_answers(
        &self,
        name: &Name,
        record_type: RecordType,
        cnames: &mut CnameChain,
    ) -> Vec<Record>;

    /// Drop every entry, aliases included, with no time left.
    fn purge(&self) -> PurgeOutcome;

    /// Every stored entry with its remaining TTL, expired ones included until purged.
    fn snapshot(&self) -> Vec<Record>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
