use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// A browsable DNS-SD service, e.g. `airplay` or `_ipp._tcp.local.`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(service: impl Into<String>) -> Result<Self, DomainError> {
        let service = service.into();
        let trimmed = service.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidServiceName(
                "service name cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidServiceName(format!(
                "service name '{}' contains whitespace",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is already a full service type such as `_http._tcp.local`.
    pub fn is_service_type(&self) -> bool {
        let lower = self.0.to_ascii_lowercase();
        lower.starts_with('_') && (lower.ends_with(".local") || lower.ends_with(".local."))
    }

    /// The PTR owner name queried when browsing this service.
    pub fn browse_name(&self) -> String {
        if !self.is_service_type() {
            return format!("_{}._tcp.local.", self.0);
        }
        if self.0.ends_with('.') {
            self.0.clone()
        } else {
            format!("{}.", self.0)
        }
    }
}

impl FromStr for ServiceName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
