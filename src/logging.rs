use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;

/// Install the global subscriber. Stdout belongs to the report, so logs go
/// to a file unless `--log-file -` asked for stderr.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and stops the writer thread.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (writer, guard) = match config.log_path() {
        Some(path) => {
            let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
