// Data types shared by the parsers, monitors and view.

pub use connection::{
    connection_summary, ConnectionInfo, ConnectionKey, ConnectionSummary, Transport,
};
pub use interface::{InterfaceStats, RateSample};
pub use traffic::{ProcessTraffic, TrafficSnapshot};

mod connection;
mod interface;
mod traffic;
