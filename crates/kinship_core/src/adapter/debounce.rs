//! Trailing-edge debounce for list fetch intents.
//!
//! # Invariants
//! - Of several `settle()` calls overlapping within `interval`, only the last
//!   one resolves to `true`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: AtomicU64::new(0),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits `interval` and reports whether no newer call arrived meanwhile.
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn only_latest_call_settles() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(400)));

        let first = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle().await }
        });

        assert!(!first.await.expect("first task"));
        assert!(second.await.expect("second task"));
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_both_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(400));
        assert!(debouncer.settle().await);
        assert!(debouncer.settle().await);
    }
}
