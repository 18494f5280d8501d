use crate::ticker::ClockTicker;
use ferrous_mdns_application::ports::Clock;
use ferrous_mdns_application::use_cases::BrowseServiceUseCase;
use ferrous_mdns_domain::config::mdns::{or_default, DEFAULT_BROWSE_PERIOD};
use ferrous_mdns_domain::ServiceName;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Browses one service: a PTR question on start, then one per period.
pub struct ServiceBrowseJob {
    service: ServiceName,
    browse: Arc<BrowseServiceUseCase>,
    clock: Arc<dyn Clock>,
    period: Duration,
    shutdown: CancellationToken,
}

impl ServiceBrowseJob {
    pub fn new(
        service: ServiceName,
        browse: Arc<BrowseServiceUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            service,
            browse,
            clock,
            period: DEFAULT_BROWSE_PERIOD,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = or_default(period, DEFAULT_BROWSE_PERIOD);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn service(&self) -> &ServiceName {
        &self.service
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            service = %self.service,
            browse_name = %self.service.browse_name(),
            period_secs = self.period.as_secs(),
            "Starting service browse job"
        );

        let mut ticker = ClockTicker::immediate(Arc::clone(&self.clock), self.period);
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!(service = %self.service, "ServiceBrowseJob: shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.browse.execute(&self.service).await {
                        warn!(service = %self.service, error = %e, "Browse query failed");
                    }
                }
            }
        }
    }
}
