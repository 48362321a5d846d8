use std::sync::Arc;

use tracing::debug;

use crate::collectors::{CommandRunner, Tool};
use crate::error::Result;
use crate::model::{ConnectionInfo, TrafficSnapshot};
use crate::parser::{parse_connections, parse_process_traffic};

/// Per-process bandwidth and socket listing. Stateless between calls.
pub struct TrafficMonitor<R> {
    runner: Arc<R>,
}

impl<R: CommandRunner> TrafficMonitor<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// One per-process bandwidth sample.
    pub async fn snapshot(&self) -> Result<TrafficSnapshot> {
        let text = self.runner.run(Tool::ProcessBandwidth).await?;
        let snapshot = parse_process_traffic(&text);
        debug!(
            processes = snapshot.processes.len(),
            bytes_in = snapshot.total_bytes_in,
            bytes_out = snapshot.total_bytes_out,
            "traffic snapshot"
        );
        Ok(snapshot)
    }

    /// Current sockets, deduplicated by identity.
    pub async fn connections(&self) -> Result<Vec<ConnectionInfo>> {
        let text = self.runner.run(Tool::Connections).await?;
        Ok(parse_connections(&text))
    }
}
