//! Ferrous mDNS Domain Layer
pub mod config;
pub mod errors;
pub mod service_name;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, MdnsConfig, TransportConfig};
pub use errors::DomainError;
pub use service_name::ServiceName;
