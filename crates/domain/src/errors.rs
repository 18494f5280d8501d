use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid service name: {0}")]
    InvalidServiceName(String),

    #[error("Invalid DNS message: {0}")]
    InvalidMessage(String),

    #[error("Invalid zone entry on line {line}: {reason}")]
    InvalidZoneEntry { line: usize, reason: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport is closed")]
    TransportClosed,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Client closed")]
    ClientClosed,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
