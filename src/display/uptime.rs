use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Duration, Instant, MissedTickBehavior},
};
use tracing::{debug, trace};

const TICK: Duration = Duration::from_secs(1);

/// Format elapsed seconds as `"{minutes}m {seconds}s"`.
#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Read-only view of a ticker's counter.
///
/// Outlives the ticker, which makes it possible to observe that nothing
/// increments the value once the ticker is gone.
#[derive(Debug, Clone)]
pub struct UptimeCounter(Arc<AtomicU64>);

impl UptimeCounter {
    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-second repeating timer counting the seconds a session has been alive.
///
/// The background task is aborted when the ticker is dropped, whichever way
/// the owning session ends.
#[derive(Debug)]
pub struct UptimeTicker {
    seconds: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl UptimeTicker {
    /// Start counting from zero. Must be called within a tokio runtime.
    #[must_use]
    pub fn start() -> Self {
        let seconds = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&seconds);

        let mut ticks = interval_at(Instant::now() + TICK, TICK);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let handle = tokio::spawn(async move {
            loop {
                ticks.tick().await;
                let now = counter.fetch_add(1, Ordering::Relaxed) + 1;
                trace!(uptime_seconds = now, "uptime tick");
            }
        });

        debug!("uptime ticker started");

        Self { seconds, handle }
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.seconds.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn counter(&self) -> UptimeCounter {
        UptimeCounter(Arc::clone(&self.seconds))
    }
}

impl Drop for UptimeTicker {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(uptime_seconds = self.seconds(), "uptime ticker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn format_uptime_examples() {
        assert_eq!(format_uptime(0), "0m 0s");
        assert_eq!(format_uptime(1), "0m 1s");
        assert_eq!(format_uptime(59), "0m 59s");
        assert_eq!(format_uptime(60), "1m 0s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(3600), "60m 0s");
    }

    #[test]
    fn format_uptime_large_values() {
        assert_eq!(format_uptime(u64::MAX), format!("{}m 15s", u64::MAX / 60));
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_starts_at_zero() {
        let ticker = UptimeTicker::start();
        assert_eq!(ticker.seconds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_counts_seconds() {
        let ticker = UptimeTicker::start();

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(ticker.seconds(), 3);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(ticker.seconds(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_ticker_stops_counting() {
        let ticker = UptimeTicker::start();
        let counter = ticker.counter();

        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(counter.seconds(), 2);

        drop(ticker);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.seconds(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn new_ticker_resets_count() {
        let first = UptimeTicker::start();
        sleep(Duration::from_millis(4_500)).await;
        assert_eq!(first.seconds(), 4);
        drop(first);

        let second = UptimeTicker::start();
        assert_eq!(second.seconds(), 0);
        sleep(Duration::from_millis(1_500)).await;
        assert_eq!(second.seconds(), 1);
    }
}
