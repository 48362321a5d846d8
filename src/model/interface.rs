use serde::Serialize;

/// Cumulative counters since boot for one network interface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceStats {
    pub name: String,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub packets_in: u64,
    pub packets_out: u64,
}

impl InterfaceStats {
    /// Fold another row for the same interface into this one.
    pub fn accumulate(&mut self, other: &InterfaceStats) {
        self.bytes_in = self.bytes_in.saturating_add(other.bytes_in);
        self.bytes_out = self.bytes_out.saturating_add(other.bytes_out);
        self.packets_in = self.packets_in.saturating_add(other.packets_in);
        self.packets_out = self.packets_out.saturating_add(other.packets_out);
    }
}

/// Aggregate throughput in bytes/second across non-loopback interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RateSample {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl RateSample {
    pub const ZERO: RateSample = RateSample { bytes_in: 0, bytes_out: 0 };
}
