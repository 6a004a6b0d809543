//! Development-time latency monitoring.
//!
//! Publishes are expected to commit within [`DEFAULT_LATENCY_BUDGET`]. The
//! monitor times each orchestrator operation and logs a warning when one
//! runs over. It never fails, delays or cancels the operation. A disabled
//! monitor awaits the operation directly without reading the clock.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Wall-clock budget for one publish operation.
pub const DEFAULT_LATENCY_BUDGET: Duration = Duration::from_millis(500);

/// Counters collected by an enabled monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    /// Operations timed.
    pub measured: u64,
    /// Operations that exceeded the budget.
    pub over_budget: u64,
}

/// Times operations against a fixed budget.
#[derive(Debug)]
pub struct LatencyMonitor {
    budget: Duration,
    enabled: bool,
    measured: AtomicU64,
    over_budget: AtomicU64,
}

impl LatencyMonitor {
    /// An enabled monitor with `budget`.
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            enabled: true,
            measured: AtomicU64::new(0),
            over_budget: AtomicU64::new(0),
        }
    }

    /// A monitor that does nothing.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(DEFAULT_LATENCY_BUDGET)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Awaits `operation`, timing it when enabled.
    ///
    /// Returns the elapsed time alongside the output, or `None` when the
    /// monitor is disabled and the clock was never read.
    pub async fn measure<F>(
        &self,
        name: &'static str,
        operation: F,
    ) -> (F::Output, Option<Duration>)
    where
        F: Future,
    {
        if !self.enabled {
            return (operation.await, None);
        }
        let start = Instant::now();
        let output = operation.await;
        let elapsed = start.elapsed();
        self.record(name, elapsed);
        (output, Some(elapsed))
    }

    /// Records one timing. Returns whether it was over budget.
    pub fn record(&self, name: &str, elapsed: Duration) -> bool {
        if !self.enabled {
            return false;
        }
        self.measured.fetch_add(1, Ordering::Relaxed);
        let over = elapsed > self.budget;
        if over {
            self.over_budget.fetch_add(1, Ordering::Relaxed);
            warn!(
                operation = name,
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = self.budget.as_millis() as u64,
                "Widget sync over latency budget"
            );
        } else {
            debug!(
                operation = name,
                elapsed_ms = elapsed.as_millis() as u64,
                "Widget sync timing"
            );
        }
        over
    }

    pub fn stats(&self) -> LatencyStats {
        LatencyStats {
            measured: self.measured.load(Ordering::Relaxed),
            over_budget: self.over_budget.load(Ordering::Relaxed),
        }
    }
}

impl Default for LatencyMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_over_budget() {
        let monitor = LatencyMonitor::new(Duration::from_millis(10));
        assert!(!monitor.record("fast", Duration::from_millis(5)));
        assert!(monitor.record("slow", Duration::from_millis(11)));
        assert_eq!(
            monitor.stats(),
            LatencyStats {
                measured: 2,
                over_budget: 1
            }
        );
    }

    #[test]
    fn exactly_at_budget_is_within() {
        let monitor = LatencyMonitor::new(Duration::from_millis(10));
        assert!(!monitor.record("edge", Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn measure_reads_clock_only_when_enabled() {
        let (output, elapsed) = LatencyMonitor::default().measure("op", async { 7 }).await;
        assert_eq!(output, 7);
        assert!(elapsed.is_some());

        let monitor = LatencyMonitor::disabled();
        let (output, elapsed) = monitor.measure("op", async { 7 }).await;
        assert_eq!(output, 7);
        assert!(elapsed.is_none());
        assert_eq!(monitor.stats(), LatencyStats::default());
    }

    #[test]
    fn disabled_records_nothing() {
        let monitor = LatencyMonitor::disabled();
        assert!(!monitor.record("slow", Duration::from_secs(5)));
        assert_eq!(monitor.stats(), LatencyStats::default());
    }
}
