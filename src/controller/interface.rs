use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use crate::collectors::{CommandRunner, Tool};
use crate::model::RateSample;
use crate::parser::parse_interface_counters;
use crate::rate::RateTracker;

/// Aggregate interface throughput. Owns the only rate tracker state.
pub struct InterfaceMonitor<R> {
    runner: Arc<R>,
    tracker: Mutex<RateTracker>,
}

impl<R: CommandRunner> InterfaceMonitor<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner, tracker: Mutex::new(RateTracker::new()) }
    }

    /// Sample counters and return bytes/second since the previous call.
    ///
    /// Overlapping calls on the same monitor run one after another. A tool
    /// failure is treated as a cycle with no interfaces observed.
    pub async fn sample_rates(&self) -> RateSample {
        let mut tracker = self.tracker.lock().await;

        let stats = match self.runner.run(Tool::InterfaceCounters).await {
            Ok(text) => parse_interface_counters(&text),
            Err(e) => {
                warn!(error = %e, "interface counters unavailable this cycle");
                Vec::new()
            }
        };

        tracker.sample_rates(stats)
    }
}
