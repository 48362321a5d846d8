use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};

use netpulse::config::Config;
use netpulse::{app, logging};

fn main() -> ExitCode {
    let config = Config::parse();

    let _log_guard = match logging::init(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("netpulse: cannot set up logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let should_quit = Arc::new(AtomicBool::new(false));
    for sig in [SIGINT, SIGTERM] {
        if let Err(e) = signal_hook::flag::register(sig, Arc::clone(&should_quit)) {
            tracing::warn!(signal = sig, error = %e, "failed to register signal handler");
        }
    }

    match app::run(config, should_quit) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "netpulse exited with error");
            eprintln!("netpulse: {}", e);
            ExitCode::FAILURE
        }
    }
}
