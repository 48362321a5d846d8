use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use super::{CommandRunner, Tool};
use crate::error::{MonitorError, Result};

/// Spawns the real utilities found on `PATH`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, tool: Tool) -> Result<String> {
        debug!(%tool, args = ?tool.args(), "running reporting tool");

        // kill_on_drop: an abandoned cycle must not leave the child behind.
        let output = Command::new(tool.program())
            .args(tool.args())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                warn!(%tool, error = %e, "failed to launch reporting tool");
                MonitorError::execution_failed(tool, e.to_string())
            })?;

        if !output.status.success() {
            // lsof exits 1 when nothing matched; the text is still usable.
            debug!(%tool, status = %output.status, "reporting tool exited non-zero");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
