pub mod errors;
pub mod logging;
pub mod mdns;
pub mod root;
pub mod transport;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use mdns::MdnsConfig;
pub use root::{CliOverrides, Config};
pub use transport::TransportConfig;
