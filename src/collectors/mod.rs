use std::fmt;
use std::future::Future;

use crate::error::Result;

mod system;

pub use system::SystemRunner;

/// The external reporting utilities the monitors read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    /// `nettop` one-shot per-process byte counts.
    ProcessBandwidth,
    /// `lsof` internet socket listing.
    Connections,
    /// `netstat` per-interface cumulative counters.
    InterfaceCounters,
}

impl Tool {
    pub fn program(&self) -> &'static str {
        match self {
            Tool::ProcessBandwidth => "nettop",
            Tool::Connections => "lsof",
            Tool::InterfaceCounters => "netstat",
        }
    }

    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Tool::ProcessBandwidth => &["-P", "-L", "1", "-n", "-x", "-J", "bytes_in,bytes_out"],
            Tool::Connections => &["-i", "-n", "-P"],
            Tool::InterfaceCounters => &["-ib"],
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// Runs a reporting tool and hands back everything it wrote to stdout.
///
/// Implementations only fail when the tool cannot be launched or its output
/// cannot be collected; a non-zero exit status still yields the text.
pub trait CommandRunner: Send + Sync {
    fn run(&self, tool: Tool) -> impl Future<Output = Result<String>> + Send;
}
