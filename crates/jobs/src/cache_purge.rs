use crate::ticker::ClockTicker;
use ferrous_mdns_application::ports::{Clock, RecordCache};
use ferrous_mdns_domain::config::mdns::{or_default, DEFAULT_CACHE_PURGE_PERIOD};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct CachePurgeJob {
    cache: Arc<dyn RecordCache>,
    clock: Arc<dyn Clock>,
    period: Duration,
    shutdown: CancellationToken,
}

impl CachePurgeJob {
    pub fn new(cache: Arc<dyn RecordCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache,
            clock,
            period: DEFAULT_CACHE_PURGE_PERIOD,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = or_default(period, DEFAULT_CACHE_PURGE_PERIOD);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            period_secs = self.period.as_secs(),
            "Starting cache purge job"
        );

        let mut ticker = ClockTicker::delayed(Arc::clone(&self.clock), self.period);
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CachePurgeJob: shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.cache.purge();
                    if outcome.entries_removed > 0 {
                        debug!(
                            entries_removed = outcome.entries_removed,
                            cache_size = outcome.cache_size,
                            "Cache purge cycle completed"
                        );
                    }
                }
            }
        }
    }
}
