use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Tcp,
    Udp,
}

impl Transport {
    /// Case-insensitive match on the listing's protocol column.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("tcp") {
            Some(Transport::Tcp)
        } else if label.eq_ignore_ascii_case("udp") {
            Some(Transport::Udp)
        } else {
            None
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Transport::Tcp => "TCP",
            Transport::Udp => "UDP",
        })
    }
}

/// One socket from the active-connections listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectionInfo {
    pub process_name: String,
    pub pid: u32,
    pub local_address: String,
    pub local_port: u16,
    pub remote_address: Option<String>,
    pub remote_port: Option<u16>,
    pub transport: Transport,
    pub state: Option<String>,
}

/// Socket identity: rows sharing this key describe the same connection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    pub pid: u32,
    pub local_port: u16,
    pub transport: Transport,
    pub remote_address: String,
    pub remote_port: u16,
}

impl ConnectionInfo {
    pub fn key(&self) -> ConnectionKey {
        ConnectionKey {
            pid: self.pid,
            local_port: self.local_port,
            transport: self.transport,
            remote_address: self.remote_address.clone().unwrap_or_default(),
            remote_port: self.remote_port.unwrap_or(0),
        }
    }

    /// Bound to a loopback address.
    pub fn is_local(&self) -> bool {
        self.local_address.starts_with("127.") || self.local_address == "::1"
    }

    pub fn is_established(&self) -> bool {
        self.remote_address.is_some()
            && self
                .state
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("ESTABLISHED"))
    }

    pub fn is_listening(&self) -> bool {
        self.state.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("LISTEN"))
    }

    pub fn local_endpoint(&self) -> String {
        format_endpoint(&self.local_address, Some(self.local_port))
    }

    /// `None` for listeners and unconnected datagram sockets.
    pub fn remote_endpoint(&self) -> Option<String> {
        self.remote_address
            .as_deref()
            .map(|addr| format_endpoint(addr, self.remote_port))
    }
}

fn format_endpoint(address: &str, port: Option<u16>) -> String {
    let host = if address.contains(':') {
        format!("[{}]", address)
    } else {
        address.to_string()
    };
    match port {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    }
}

/// Per-state tallies over a connection listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionSummary {
    pub total: usize,
    pub established: usize,
    pub listening: usize,
    pub local: usize,
    pub tcp: usize,
    pub udp: usize,
}

pub fn connection_summary(connections: &[ConnectionInfo]) -> ConnectionSummary {
    let mut summary = ConnectionSummary { total: connections.len(), ..Default::default() };
    for conn in connections {
        if conn.is_established() {
            summary.established += 1;
        }
        if conn.is_listening() {
            summary.listening += 1;
        }
        if conn.is_local() {
            summary.local += 1;
        }
        match conn.transport {
            Transport::Tcp => summary.tcp += 1,
            Transport::Udp => summary.udp += 1,
        }
    }
    summary
}
