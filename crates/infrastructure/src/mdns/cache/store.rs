use super::entry::RecordEntry;
use super::key::{owner_key, CacheKey};
use ferrous_mdns_application::ports::{Clock, CnameChain, PurgeOutcome, RecordCache};
use hickory_proto::rr::{Name, Record, RecordType};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Aliases followed before a lookup gives up.
pub const MAX_CNAME_HOPS: usize = 8;

#[derive(Default)]
struct CacheState {
    records: HashMap<CacheKey, Vec<RecordEntry>>,
    cnames: HashMap<String, RecordEntry>,
}

impl CacheState {
    fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum::<usize>() + self.cnames.len()
    }

    fn live_records(&self, owner: &str, record_type: RecordType, now: Instant) -> Vec<Record> {
        let key = CacheKey {
            name: owner.to_string(),
            record_type,
        };
        self.records
            .get(&key)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.is_live(now))
                    .map(|entry| entry.to_record(now))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn live_alias(&self, owner: &str, now: Instant) -> Option<&RecordEntry> {
        self.cnames.get(owner).filter(|entry| entry.is_live(now))
    }
}

/// TTL-aware mDNS record cache.
///
/// Records live in a map keyed by `(owner, type)`; CNAMEs live apart, one per
/// owner, so a lookup can notice an alias and follow it. All operations take
/// the single lock for their whole duration and read the clock once.
pub struct MdnsRecordCache {
    clock: Arc<dyn Clock>,
    min_ttl: Duration,
    state: Mutex<CacheState>,
}

impl MdnsRecordCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            min_ttl: Duration::ZERO,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn with_min_ttl(mut self, min_ttl: Duration) -> Self {
        self.min_ttl = min_ttl;
        self
    }

    pub fn min_ttl(&self) -> Duration {
        self.min_ttl
    }

    // Every critical section leaves the maps consistent, so a poisoned lock
    // is still safe to use.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordCache for MdnsRecordCache {
    fn add_records(&self, records: Vec<Record>) {
        let mut state = self.lock();
        let now = self.clock.now();

        for record in records {
            let entry = RecordEntry::new(record, now, self.min_ttl);

            if entry.record().record_type() == RecordType::CNAME {
                state.cnames.insert(owner_key(entry.record().name()), entry);
                continue;
            }

            let key = CacheKey::new(entry.record().name(), entry.record().record_type());
            let entries = state.records.entry(key).or_default();
            match entries
                .iter_mut()
                .find(|existing| existing.same_data(entry.record()))
            {
                Some(existing) => {
                    if !existing.is_live(now) || entry.expires_at() > existing.expires_at() {
                        *existing = entry;
                    }
                }
                None => entries.push(entry),
            }
        }
    }

    fn cached_answers(
        &self,
        name: &Name,
        record_type: RecordType,
        cnames: &mut CnameChain,
    ) -> Vec<Record> {
        let state = self.lock();
        let now = self.clock.now();

        let mut owner = owner_key(name);
        let mut hops = 0;
        loop {
            let answers = state.live_records(&owner, record_type, now);
            if !answers.is_empty() {
                return answers;
            }

            let Some(alias) = state.live_alias(&owner, now) else {
                return Vec::new();
            };
            let Some(target) = alias.cname_target() else {
                return Vec::new();
            };
            if hops == MAX_CNAME_HOPS {
                debug!(name = %name, record_type = ?record_type, "CNAME chain too long");
                return Vec::new();
            }

            hops += 1;
            cnames.record(alias.to_record(now));
            owner = owner_key(target);
        }
    }

    fn purge(&self) -> PurgeOutcome {
        let mut state = self.lock();
        let now = self.clock.now();
        let before = state.len();

        state.records.retain(|_, entries| {
            entries.retain(|entry| entry.is_live(now));
            !entries.is_empty()
        });
        state.cnames.retain(|_, entry| entry.is_live(now));

        let cache_size = state.len();
        PurgeOutcome {
            entries_removed: before - cache_size,
            cache_size,
        }
    }

    fn snapshot(&self) -> Vec<Record> {
        let state = self.lock();
        let now = self.clock.now();

        state
            .records
            .values()
            .flatten()
            .chain(state.cnames.values())
            .map(|entry| entry.to_record(now))
            .collect()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
