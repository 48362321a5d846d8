//! Sampling orchestration: the two monitors and a full cycle over both.

mod interface;
mod traffic;

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::collectors::{CommandRunner, SystemRunner};
use crate::error::Result;
use crate::model::{ConnectionInfo, RateSample, TrafficSnapshot};

pub use interface::InterfaceMonitor;
pub use traffic::TrafficMonitor;

/// Everything gathered in one tick. Each field fails or succeeds on its own.
#[derive(Debug)]
pub struct CycleReport {
    pub time: DateTime<Local>,
    pub snapshot: Result<TrafficSnapshot>,
    pub connections: Result<Vec<ConnectionInfo>>,
    pub rates: RateSample,
}

pub struct Sampler<R = SystemRunner> {
    pub traffic: TrafficMonitor<R>,
    pub interfaces: InterfaceMonitor<R>,
}

impl Sampler<SystemRunner> {
    pub fn system() -> Self {
        Self::new(Arc::new(SystemRunner::new()))
    }
}

impl<R: CommandRunner> Sampler<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self {
            traffic: TrafficMonitor::new(Arc::clone(&runner)),
            interfaces: InterfaceMonitor::new(runner),
        }
    }

    /// Run the three tool invocations concurrently and collect the results.
    pub async fn cycle(&self) -> CycleReport {
        let (snapshot, connections, rates) = tokio::join!(
            self.traffic.snapshot(),
            self.traffic.connections(),
            self.interfaces.sample_rates(),
        );

        if let Err(e) = &snapshot {
            warn!(error = %e, "traffic snapshot failed");
        }
        if let Err(e) = &connections {
            warn!(error = %e, "connection listing failed");
        }
        debug!(rx = rates.bytes_in, tx = rates.bytes_out, "cycle complete");

        CycleReport { time: Local::now(), snapshot, connections, rates }
    }
}
