pub mod cache;
pub mod transport;
pub mod zone;

pub use cache::{CacheKey, MdnsRecordCache, RecordEntry, MAX_CNAME_HOPS};
pub use transport::{MemoryPeer, MemoryTransport, SentMessage, UdpMulticastTransport};
pub use zone::{parse_record, parse_zone};
