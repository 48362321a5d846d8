//! Netpulse — host network activity sampler.
//!
//! Reads the output of the system's reporting tools (`nettop`, `lsof`,
//! `netstat`) and turns it into per-process bandwidth snapshots, a
//! deduplicated socket listing, and aggregate interface throughput.

pub mod app;
pub mod collectors;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod rate;
pub mod view;

pub use collectors::{CommandRunner, SystemRunner, Tool};
pub use controller::{CycleReport, InterfaceMonitor, Sampler, TrafficMonitor};
pub use error::{MonitorError, Result};
