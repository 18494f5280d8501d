use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

pub const MDNS_PORT: u16 = 5353;
pub const MDNS_IPV4_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransportConfig {
    /// IPv4 address of the interface used to join the multicast group
    #[serde(default = "default_interface")]
    pub interface: Ipv4Addr,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub multicast_loop: bool,

    #[serde(default = "default_multicast_ttl")]
    pub multicast_ttl: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            port: default_port(),
            multicast_loop: true,
            multicast_ttl: default_multicast_ttl(),
        }
    }
}

fn default_interface() -> Ipv4Addr {
    Ipv4Addr::UNSPECIFIED
}

fn default_port() -> u16 {
    MDNS_PORT
}

fn default_true() -> bool {
    true
}

fn default_multicast_ttl() -> u32 {
    255
}
