//! Ferrous mDNS: a multicast DNS resolution client.
//!
//! ```no_run
//! # async fn demo() -> Result<(), ferrous_mdns::DomainError> {
//! use ferrous_mdns::{Client, ClientOptions, RecordType, UdpMulticastTransport};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let transport = UdpMulticastTransport::bind(&Default::default())?;
//! let client = Client::new(ClientOptions::new().with_transport(Arc::new(transport)))?;
//! let cancel = CancellationToken::new();
//! let records = client.query_name(&cancel, "printer.local.", RecordType::A).await?;
//! # drop(records);
//! client.close().await;
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod options;

pub use client::Client;
pub use options::ClientOptions;

pub use ferrous_mdns_application::clock::{ManualClock, SystemClock};
pub use ferrous_mdns_application::ports::{Clock, CnameChain, MdnsTransport, PurgeOutcome};
pub use ferrous_mdns_application::use_cases::CachedAnswer;
pub use ferrous_mdns_domain::{DomainError, MdnsConfig, ServiceName, TransportConfig};
pub use ferrous_mdns_infrastructure::mdns::{
    parse_zone, MemoryPeer, MemoryTransport, SentMessage, UdpMulticastTransport,
};
pub use hickory_proto::op::Query;
pub use hickory_proto::rr::{Name, Record, RecordType};
