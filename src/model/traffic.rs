use std::time::UNIX_EPOCH;

use chrono::{DateTime, Local};
use serde::Serialize;

// --- Per-process bandwidth ---

/// Bytes moved by one process during a single sampling interval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessTraffic {
    pub process_name: String,
    pub pid: u32,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl ProcessTraffic {
    pub fn total_bytes(&self) -> u64 {
        self.bytes_in.saturating_add(self.bytes_out)
    }
}

/// One point-in-time aggregated read of per-process bandwidth.
///
/// `processes` is ordered by total bytes, busiest first. `connection_count`
/// counts the traffic-producing processes in this sample, not live sockets.
#[derive(Clone, Debug, Serialize)]
pub struct TrafficSnapshot {
    pub processes: Vec<ProcessTraffic>,
    pub total_bytes_in: u64,
    pub total_bytes_out: u64,
    pub connection_count: usize,
    pub timestamp: DateTime<Local>,
}

impl TrafficSnapshot {
    /// Snapshot with no processes and all-zero totals.
    pub fn empty() -> Self {
        Self {
            processes: Vec::new(),
            total_bytes_in: 0,
            total_bytes_out: 0,
            connection_count: 0,
            timestamp: DateTime::<Local>::from(UNIX_EPOCH),
        }
    }

    /// Build a snapshot from already-aggregated entries. Sorts them and
    /// derives the totals so the sum invariants always hold.
    pub fn from_processes(mut processes: Vec<ProcessTraffic>, timestamp: DateTime<Local>) -> Self {
        processes.sort_by(|a, b| b.total_bytes().cmp(&a.total_bytes()));
        let total_bytes_in = processes.iter().fold(0u64, |acc, p| acc.saturating_add(p.bytes_in));
        let total_bytes_out = processes.iter().fold(0u64, |acc, p| acc.saturating_add(p.bytes_out));
        let connection_count = processes.len();
        Self { processes, total_bytes_in, total_bytes_out, connection_count, timestamp }
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// The `n` busiest processes.
    pub fn top(&self, n: usize) -> &[ProcessTraffic] {
        &self.processes[..n.min(self.processes.len())]
    }
}

impl Default for TrafficSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
