use std::time::Duration;
use tokio::time::Instant;

/// Upper bound applied when `timeout` does not fit the clock.
const FALLBACK_TIMEOUT: Duration = Duration::from_secs(3600);

pub(crate) fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .or_else(|| now.checked_add(FALLBACK_TIMEOUT))
        .unwrap_or(now)
}
