use crate::ports::Clock;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// A clock that only moves when told to.
///
/// `now()` is a fixed origin plus an offset controlled through [`advance`] and
/// [`set`]; every pending `sleep_until` whose deadline has been reached wakes
/// on the change.
///
/// [`advance`]: ManualClock::advance
/// [`set`]: ManualClock::set
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: watch::Sender<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Duration::ZERO)
    }

    pub fn starting_at(elapsed: Duration) -> Self {
        let (elapsed, _) = watch::channel(elapsed);
        Self {
            origin: Instant::now(),
            elapsed,
        }
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.borrow()
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.send_modify(|elapsed| *elapsed += by);
    }

    /// Moves to an absolute offset from the origin. Going backwards is allowed.
    pub fn set(&self, elapsed: Duration) {
        self.elapsed.send_replace(elapsed);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.borrow()
    }

    async fn sleep_until(&self, deadline: Instant) {
        let mut elapsed = self.elapsed.subscribe();
        loop {
            let now = self.origin + *elapsed.borrow_and_update();
            if now >= deadline {
                return;
            }
            if elapsed.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
