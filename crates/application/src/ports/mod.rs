mod clock;
mod mdns_transport;
mod record_cache;

pub use clock::Clock;
pub use mdns_transport::MdnsTransport;
pub use record_cache::{CnameChain, PurgeOutcome, RecordCache};
