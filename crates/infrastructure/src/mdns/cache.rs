mod entry;
mod key;
mod store;

pub use entry::RecordEntry;
pub use key::{owner_key, CacheKey};
pub use store::{MdnsRecordCache, MAX_CNAME_HOPS};
