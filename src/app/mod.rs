mod event_loop;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::info;

use crate::config::Config;
use crate::controller::Sampler;
use crate::error::Result;
use crate::view::{OutputMode, Presenter};

/// Main application state: the sampler and how results are shown.
pub struct App {
    pub sampler: Sampler,
    pub presenter: Presenter,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mode = if config.json {
            OutputMode::Json
        } else if config.once {
            OutputMode::Plain
        } else {
            OutputMode::Live
        };
        Self {
            sampler: Sampler::system(),
            presenter: Presenter::new(mode, config.top),
            config,
        }
    }
}

/// Run the sampling loop until `should_quit` is raised (or after one cycle
/// with `--once`).
pub fn run(config: Config, should_quit: Arc<AtomicBool>) -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .build()?;

    info!(interval = config.interval, json = config.json, once = config.once, "netpulse starting");
    let app = App::new(config);
    rt.block_on(event_loop::run_loop(&app, &should_quit))?;
    info!("netpulse stopped");
    Ok(())
}
