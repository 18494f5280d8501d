use crate::ports::RecordCache;
use crate::services::CacheUpdateSignal;
use hickory_proto::op::Message;
use hickory_proto::rr::{Record, RecordType};
use std::sync::Arc;
use tracing::debug;

/// Outcome of merging one inbound message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestOutcome {
    pub records_merged: usize,
    pub records_skipped: usize,
}

pub struct IngestMessageUseCase {
    cache: Arc<dyn RecordCache>,
    updates: Arc<CacheUpdateSignal>,
}

impl IngestMessageUseCase {
    pub fn new(cache: Arc<dyn RecordCache>, updates: Arc<CacheUpdateSignal>) -> Self {
        Self { cache, updates }
    }

    /// Merges answers and additionals into the cache, then wakes waiting queries.
    ///
    /// Messages are not matched against outstanding questions: anything heard
    /// on the link is cached.
    pub fn execute(&self, message: &Message) -> IngestOutcome {
        let (merged, skipped): (Vec<&Record>, Vec<&Record>) = message
            .answers()
            .iter()
            .chain(message.additionals())
            .partition(|record| is_cacheable(record));

        let outcome = IngestOutcome {
            records_merged: merged.len(),
            records_skipped: skipped.len(),
        };

        if !merged.is_empty() {
            self.cache.add_records(merged.into_iter().cloned().collect());
        }
        self.updates.notify();

        debug!(
            id = message.id(),
            merged = outcome.records_merged,
            skipped = outcome.records_skipped,
            cache_version = self.updates.version(),
            "Ingested mDNS message"
        );
        outcome
    }
}

fn is_cacheable(record: &Record) -> bool {
    record.data().is_some()
        && !matches!(
            record.record_type(),
            RecordType::OPT | RecordType::ANY | RecordType::AXFR | RecordType::IXFR
        )
}
