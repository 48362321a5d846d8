//! Text parsers for the reporting tools' output.
//!
//! Each parser is a total function: malformed or truncated lines are dropped
//! and the rest of the input is still used.

mod connections;
mod interfaces;
mod process_traffic;

pub use connections::parse_connections;
pub use interfaces::parse_interface_counters;
pub use process_traffic::parse_process_traffic;
