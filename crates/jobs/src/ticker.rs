use ferrous_mdns_application::clock::deadline_after;
use ferrous_mdns_application::ports::Clock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fixed-period ticker driven by the injected clock.
///
/// Ticks missed while the clock jumped forward are skipped, leaving the
/// schedule aligned to the first deadline.
pub(crate) struct ClockTicker {
    clock: Arc<dyn Clock>,
    period: Duration,
    next: Instant,
}

impl ClockTicker {
    /// First tick completes immediately.
    pub(crate) fn immediate(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let next = clock.now();
        Self {
            clock,
            period,
            next,
        }
    }

    /// First tick completes one period from now.
    pub(crate) fn delayed(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let next = deadline_after(clock.now(), period);
        Self {
            clock,
            period,
            next,
        }
    }

    /// Cancel-safe: dropping the future leaves the schedule untouched.
    pub(crate) async fn tick(&mut self) -> Instant {
        self.clock.sleep_until(self.next).await;

        let fired = self.next;
        self.skip_past(self.clock.now());
        fired
    }

    /// Moves `next` to the first period boundary after `now`.
    fn skip_past(&mut self, now: Instant) {
        if self.next > now {
            return;
        }
        let period = self.period.as_nanos().max(1);
        let behind = now.duration_since(self.next).as_nanos();
        let offset = (behind / period + 1).saturating_mul(period);
        let offset = u64::try_from(offset)
            .map(Duration::from_nanos)
            .unwrap_or(Duration::MAX);
        self.next = deadline_after(self.next, offset);
    }
}
