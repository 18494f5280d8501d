mod memory;
mod udp;

pub use memory::{MemoryPeer, MemoryTransport, SentMessage};
pub use udp::{UdpMulticastTransport, MDNS_IPV4_DESTINATION};
