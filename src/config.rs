use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Command-line configuration.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "netpulse",
    version,
    about = "Per-process bandwidth, open sockets and interface throughput at a glance"
)]
pub struct Config {
    /// Seconds between samples
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Take a single sample and exit
    #[arg(long)]
    pub once: bool,

    /// Print one JSON object per sample instead of the terminal report
    #[arg(long)]
    pub json: bool,

    /// Rows shown per section of the terminal report
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log file path, or "-" for stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    /// Where logs go: `None` means stderr.
    pub fn log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) if path.as_os_str() == "-" => None,
            Some(path) => Some(path.clone()),
            None => Some(std::env::temp_dir().join("netpulse.log")),
        }
    }
}
