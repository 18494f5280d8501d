mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

use std::time::{Duration, Instant};

/// Stand-in for "never" when a deadline does not fit in an `Instant`.
pub const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + delay`, saturating to [`FAR_FUTURE`] instead of overflowing.
pub fn deadline_after(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}
