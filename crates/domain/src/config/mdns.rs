use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BROWSE_PERIOD: Duration = Duration::from_secs(60);
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(1);
pub const DEFAULT_CACHE_PURGE_PERIOD: Duration = Duration::from_secs(60);

/// Upper bound for every configured period and for `min_ttl`: one year.
pub const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Resolution behaviour of the mDNS client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MdnsConfig {
    /// Set the QU bit on every outgoing question
    #[serde(default)]
    pub force_unicast_responses: bool,

    /// Service types browsed periodically, e.g. `airplay` or `_ipp._tcp.local.`
    #[serde(default)]
    pub browse_services: Vec<String>,

    #[serde(default = "default_browse_period_secs")]
    pub browse_period_secs: u64,

    #[serde(default = "default_retry_period_ms")]
    pub retry_period_ms: u64,

    #[serde(default = "default_cache_purge_period_secs")]
    pub cache_purge_period_secs: u64,

    /// Floor applied to the TTL of every cached record
    #[serde(default)]
    pub min_ttl_secs: u64,
}

impl Default for MdnsConfig {
    fn default() -> Self {
        Self {
            force_unicast_responses: false,
            browse_services: Vec::new(),
            browse_period_secs: default_browse_period_secs(),
            retry_period_ms: default_retry_period_ms(),
            cache_purge_period_secs: default_cache_purge_period_secs(),
            min_ttl_secs: 0,
        }
    }
}

impl MdnsConfig {
    pub fn browse_period(&self) -> Duration {
        or_default(Duration::from_secs(self.browse_period_secs), DEFAULT_BROWSE_PERIOD)
    }

    pub fn retry_period(&self) -> Duration {
        or_default(Duration::from_millis(self.retry_period_ms), DEFAULT_RETRY_PERIOD)
    }

    pub fn cache_purge_period(&self) -> Duration {
        or_default(
            Duration::from_secs(self.cache_purge_period_secs),
            DEFAULT_CACHE_PURGE_PERIOD,
        )
    }

    pub fn min_ttl(&self) -> Duration {
        Duration::from_secs(self.min_ttl_secs)
    }

    /// Names the first setting above [`MAX_DURATION`], if any.
    pub fn out_of_range(&self) -> Option<&'static str> {
        [
            ("browse_period_secs", self.browse_period()),
            ("retry_period_ms", self.retry_period()),
            ("cache_purge_period_secs", self.cache_purge_period()),
            ("min_ttl_secs", self.min_ttl()),
        ]
        .into_iter()
        .find(|(_, value)| *value > MAX_DURATION)
        .map(|(name, _)| name)
    }
}

/// Zero means "use the default"; used for every configurable period.
pub fn or_default(value: Duration, default: Duration) -> Duration {
    if value.is_zero() {
        default
    } else {
        value
    }
}

fn default_browse_period_secs() -> u64 {
    DEFAULT_BROWSE_PERIOD.as_secs()
}

fn default_retry_period_ms() -> u64 {
    DEFAULT_RETRY_PERIOD.as_millis() as u64
}

fn default_cache_purge_period_secs() -> u64 {
    DEFAULT_CACHE_PURGE_PERIOD.as_secs()
}
