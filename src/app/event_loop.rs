use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::Result;

use super::App;

const QUIT_POLL: Duration = Duration::from_millis(100);

/// Resolves once the quit flag is raised.
async fn quit_requested(should_quit: &AtomicBool) {
    while !should_quit.load(Ordering::Relaxed) {
        tokio::time::sleep(QUIT_POLL).await;
    }
}

/// Tick, sample, present. A cycle still running when quit is requested is
/// dropped; nothing from it is written back.
pub async fn run_loop(app: &App, should_quit: &AtomicBool) -> Result<()> {
    let mut ticker = tokio::time::interval(app.config.tick_rate());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick_counter: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = quit_requested(should_quit) => break,
        }

        tick_counter += 1;
        let report = tokio::select! {
            report = app.sampler.cycle() => report,
            _ = quit_requested(should_quit) => {
                info!(tick = tick_counter, "quit requested; abandoning in-flight cycle");
                break;
            }
        };
        debug!(tick = tick_counter, "presenting cycle");
        app.presenter.present(&report)?;

        if app.config.once {
            break;
        }
    }
    Ok(())
}
