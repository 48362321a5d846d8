//! Interface throughput derived from cumulative byte counters.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::model::{InterfaceStats, RateSample};

/// Interfaces whose names start with this are never counted.
pub const LOOPBACK_PREFIX: &str = "lo";

pub fn is_loopback(name: &str) -> bool {
    name.starts_with(LOOPBACK_PREFIX)
}

/// Holds the previous counter sample and turns each new one into a rate.
#[derive(Debug, Default)]
pub struct RateTracker {
    /// Previous per-interface counters, keyed by interface name.
    prev_stats: HashMap<String, InterfaceStats>,
    prev_time: Option<Instant>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_baseline(&self) -> bool {
        self.prev_time.is_some()
    }

    pub fn sample_rates(&mut self, current: Vec<InterfaceStats>) -> RateSample {
        self.sample_rates_at(current, Instant::now())
    }

    /// Aggregate bytes/second across non-loopback interfaces since the last
    /// sample, taken at `now`.
    ///
    /// The first call only records a baseline and returns zero. A counter
    /// that went backwards is treated as reset, so its whole current value
    /// counts as new traffic. Interfaces missing from either sample are
    /// ignored for this cycle.
    pub fn sample_rates_at(&mut self, current: Vec<InterfaceStats>, now: Instant) -> RateSample {
        let current: HashMap<String, InterfaceStats> =
            current.into_iter().map(|s| (s.name.clone(), s)).collect();

        // Commit the new sample up front so it replaces the old one on every path.
        let previous = std::mem::replace(&mut self.prev_stats, current);
        let Some(prev_time) = self.prev_time.replace(now) else {
            return RateSample::ZERO;
        };

        let elapsed = now
            .checked_duration_since(prev_time)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        if elapsed <= 0.0 {
            return RateSample::ZERO;
        }

        let mut rate = RateSample::ZERO;
        for (name, cur) in &self.prev_stats {
            if is_loopback(name) {
                continue;
            }
            let Some(prev) = previous.get(name) else { continue };
            rate.bytes_in = rate
                .bytes_in
                .saturating_add(per_second(counter_delta(cur.bytes_in, prev.bytes_in), elapsed));
            rate.bytes_out = rate
                .bytes_out
                .saturating_add(per_second(counter_delta(cur.bytes_out, prev.bytes_out), elapsed));
        }

        debug!(elapsed, bytes_in = rate.bytes_in, bytes_out = rate.bytes_out, "sampled interface rates");
        rate
    }
}

fn counter_delta(current: u64, previous: u64) -> u64 {
    if current >= previous {
        current - previous
    } else {
        current
    }
}

fn per_second(delta: u64, elapsed_secs: f64) -> u64 {
    (delta as f64 / elapsed_secs) as u64
}
