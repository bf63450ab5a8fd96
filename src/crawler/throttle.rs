//! Global outbound rate gate
//!
//! A single [`Throttle`] is shared by every fetch. Each dispatch waits until
//! at least one interval (`1 / requests-per-second`) has passed since the
//! previous dispatch, across all concurrent callers. Waiters queue on a fair
//! mutex, so dispatches are released in arrival order.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum-inter-dispatch-interval gate
#[derive(Debug)]
pub struct Throttle {
    /// Minimum time between two dispatches
    interval: Duration,

    /// Time of the most recent dispatch
    last_dispatch: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Creates a gate allowing `requests_per_second` dispatches per second
    ///
    /// Returns `None` for 0, which means unthrottled.
    pub fn per_second(requests_per_second: u32) -> Option<Self> {
        if requests_per_second == 0 {
            return None;
        }

        Some(Self::with_interval(
            Duration::from_secs(1) / requests_per_second,
        ))
    }

    /// Creates a gate with an explicit minimum interval
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Returns the minimum time between dispatches
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until a dispatch is allowed and records it
    ///
    /// The first call returns immediately.
    pub async fn wait(&self) {
        let mut last = self.last_dispatch.lock().await;

        if let Some(previous) = *last {
            let next = previous + self.interval;
            if next > Instant::now() {
                tracing::trace!("Rate gate waiting {:?}", next - Instant::now());
                tokio::time::sleep_until(next).await;
            }
        }

        *last = Some(Instant::now());
    }
}
