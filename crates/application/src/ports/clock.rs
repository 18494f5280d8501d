use async_trait::async_trait;
use std::time::Instant;

/// Monotonic time source used for TTL arithmetic and every timer.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Completes once `now() >= deadline`.
    async fn sleep_until(&self, deadline: Instant);
}
