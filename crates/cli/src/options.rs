use ferrous_mdns_application::ports::{Clock, MdnsTransport};
use ferrous_mdns_domain::config::mdns::{
    DEFAULT_BROWSE_PERIOD, DEFAULT_CACHE_PURGE_PERIOD, DEFAULT_RETRY_PERIOD,
};
use ferrous_mdns_domain::MdnsConfig;
use std::sync::Arc;
use std::time::Duration;

/// Everything needed to build a [`Client`](crate::Client).
///
/// Zero durations fall back to their defaults and anything above a year is
/// clamped to a year. A transport is mandatory;
/// the clock defaults to the system clock.
#[derive(Clone)]
pub struct ClientOptions {
    pub force_unicast_responses: bool,
    pub browse_services: Vec<String>,
    pub browse_period: Duration,
    pub retry_period: Duration,
    pub cache_purge_period: Duration,
    pub min_ttl: Duration,
    pub transport: Option<Arc<dyn MdnsTransport>>,
    pub clock: Option<Arc<dyn Clock>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            force_unicast_responses: false,
            browse_services: Vec::new(),
            browse_period: DEFAULT_BROWSE_PERIOD,
            retry_period: DEFAULT_RETRY_PERIOD,
            cache_purge_period: DEFAULT_CACHE_PURGE_PERIOD,
            min_ttl: Duration::ZERO,
            transport: None,
            clock: None,
        }
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MdnsConfig) -> Self {
        Self {
            force_unicast_responses: config.force_unicast_responses,
            browse_services: config.browse_services.clone(),
            browse_period: config.browse_period(),
            retry_period: config.retry_period(),
            cache_purge_period: config.cache_purge_period(),
            min_ttl: config.min_ttl(),
            ..Self::default()
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn MdnsTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_force_unicast_responses(mut self, enabled: bool) -> Self {
        self.force_unicast_responses = enabled;
        self
    }

    pub fn with_browse_service(mut self, service: impl Into<String>) -> Self {
        self.browse_services.push(service.into());
        self
    }

    pub fn with_browse_period(mut self, period: Duration) -> Self {
        self.browse_period = period;
        self
    }

    pub fn with_retry_period(mut self, period: Duration) -> Self {
        self.retry_period = period;
        self
    }

    pub fn with_cache_purge_period(mut self, period: Duration) -> Self {
        self.cache_purge_period = period;
        self
    }

    pub fn with_min_ttl(mut self, min_ttl: Duration) -> Self {
        self.min_ttl = min_ttl;
        self
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("force_unicast_responses", &self.force_unicast_responses)
            .field("browse_services", &self.browse_services)
            .field("browse_period", &self.browse_period)
            .field("retry_period", &self.retry_period)
            .field("cache_purge_period", &self.cache_purge_period)
            .field("min_ttl", &self.min_ttl)
            .field(
                "transport",
                &self.transport.as_ref().map(|t| t.transport_name()),
            )
            .field("clock", &self.clock.is_some())
            .finish()
    }
}
