use std::collections::HashSet;

use tracing::debug;

use crate::model::{ConnectionInfo, Transport};

// Column positions in `lsof -i -n -P` output.
const COL_COMMAND: usize = 0;
const COL_PID: usize = 1;
const COL_NODE: usize = 7;
const COL_NAME: usize = 8;

/// Parse an `lsof`-style socket listing.
///
/// The first line is a header. Rows are kept in input order; a row whose
/// socket identity was already seen earlier in the same text is dropped.
pub fn parse_connections(text: &str) -> Vec<ConnectionInfo> {
    let mut seen = HashSet::new();
    let mut connections = Vec::new();

    for line in text.lines().skip(1) {
        let Some(conn) = parse_line(line) else { continue };
        if seen.insert(conn.key()) {
            connections.push(conn);
        }
    }

    debug!(connections = connections.len(), "parsed connection table");
    connections
}

fn parse_line(line: &str) -> Option<ConnectionInfo> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= COL_NAME {
        return None;
    }

    let pid = tokens[COL_PID].parse::<u32>().ok()?;
    let transport = Transport::from_label(tokens[COL_NODE])?;
    let address_field = tokens[COL_NAME..].join(" ");
    let endpoints = parse_address_field(&address_field)?;

    Some(ConnectionInfo {
        process_name: tokens[COL_COMMAND].to_string(),
        pid,
        local_address: endpoints.local_address,
        local_port: endpoints.local_port,
        remote_address: endpoints.remote_address,
        remote_port: endpoints.remote_port,
        transport,
        state: endpoints.state,
    })
}

#[derive(Debug, PartialEq)]
struct Endpoints {
    local_address: String,
    local_port: u16,
    remote_address: Option<String>,
    remote_port: Option<u16>,
    state: Option<String>,
}

/// `local->remote (STATE)` or `local (STATE)`; the state suffix is optional.
/// Returns `None` when the local side carries no port.
fn parse_address_field(field: &str) -> Option<Endpoints> {
    let (addresses, state) = match field.rsplit_once(' ') {
        Some((rest, last)) => match parenthesized(last) {
            Some(state) => (rest.trim(), Some(state.to_string())),
            None => (field, None),
        },
        None => match parenthesized(field) {
            Some(state) => ("", Some(state.to_string())),
            None => (field, None),
        },
    };

    let (local, remote) = match addresses.split_once("->") {
        Some((local, remote)) => (local, Some(remote)),
        None => (addresses, None),
    };

    let (remote_address, remote_port) = match remote.and_then(split_host_port) {
        Some((addr, port)) => (Some(addr), Some(port)),
        None => (None, None),
    };

    let (local_address, local_port) = split_host_port(local)?;

    Some(Endpoints { local_address, local_port, remote_address, remote_port, state })
}

fn parenthesized(token: &str) -> Option<&str> {
    token.strip_prefix('(')?.strip_suffix(')')
}

/// Split `host:port` on the last colon; IPv6 hosts lose their brackets.
fn split_host_port(endpoint: &str) -> Option<(String, u16)> {
    let (host, port) = endpoint.trim().rsplit_once(':')?;
    let port = port.parse::<u16>().ok()?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    Some((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "COMMAND     PID   USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME";

    #[test]
    fn identical_rows_collapse() {
        let input = format!(
            "{HEADER}\n\
             java 1234 me 10u IPv4 0x1 0t0 TCP 192.168.1.5:8080->10.0.0.1:443 (ESTABLISHED)\n\
             java 1234 me 11u IPv4 0x2 0t0 TCP 192.168.1.5:8080->10.0.0.1:443 (ESTABLISHED)"
        );
        let conns = parse_connections(&input);
        assert_eq!(conns.len(), 1);
        let c = &conns[0];
        assert_eq!(c.process_name, "java");
        assert_eq!(c.pid, 1234);
        assert_eq!(c.local_address, "192.168.1.5");
        assert_eq!(c.local_port, 8080);
        assert_eq!(c.remote_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(c.remote_port, Some(443));
        assert_eq!(c.transport, Transport::Tcp);
        assert_eq!(c.state.as_deref(), Some("ESTABLISHED"));
        assert!(c.is_established());
    }

    #[test]
    fn distinct_keys_are_kept_in_order() {
        let input = format!(
            "{HEADER}\n\
             a 1 me 10u IPv4 0x1 0t0 TCP *:8080 (LISTEN)\n\
             a 1 me 11u IPv4 0x2 0t0 UDP *:8080\n\
             a 1 me 12u IPv4 0x3 0t0 TCP 127.0.0.1:8080->127.0.0.1:9000 (ESTABLISHED)\n\
             b 2 me 13u IPv4 0x4 0t0 TCP *:8080 (LISTEN)"
        );
        let conns = parse_connections(&input);
        let shape: Vec<(u32, Transport, Option<u16>)> =
            conns.iter().map(|c| (c.pid, c.transport, c.remote_port)).collect();
        assert_eq!(
            shape,
            vec![
                (1, Transport::Tcp, None),
                (1, Transport::Udp, None),
                (1, Transport::Tcp, Some(9000)),
                (2, Transport::Tcp, None),
            ]
        );
        assert_eq!(conns[0].state.as_deref(), Some("LISTEN"));
        assert_eq!(conns[1].state, None);
        assert!(conns[2].is_local());
    }

    #[test]
    fn first_seen_wins_on_duplicate() {
        let input = format!(
            "{HEADER}\n\
             a 1 me 10u IPv4 0x1 0t0 TCP 10.0.0.2:5000->1.1.1.1:443 (SYN_SENT)\n\
             a 1 me 10u IPv4 0x1 0t0 TCP 10.0.0.2:5000->1.1.1.1:443 (ESTABLISHED)"
        );
        let conns = parse_connections(&input);
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].state.as_deref(), Some("SYN_SENT"));
    }

    #[test]
    fn header_only_or_empty() {
        assert!(parse_connections("").is_empty());
        assert!(parse_connections(HEADER).is_empty());
    }

    #[test]
    fn header_is_skipped_even_if_it_parses() {
        let row = "a 1 me 10u IPv4 0x1 0t0 TCP *:80 (LISTEN)";
        assert!(parse_connections(row).is_empty());
    }

    #[test]
    fn invalid_rows_are_skipped() {
        let input = format!(
            "{HEADER}\n\
             short 1 me 10u IPv4 0x1 0t0 TCP\n\
             badpid x me 10u IPv4 0x1 0t0 TCP *:80\n\
             raw 3 me 10u IPv4 0x1 0t0 ICMP *:0\n\
             noport 4 me 10u IPv4 0x1 0t0 TCP somehost (LISTEN)\n\
             star 5 me 10u IPv4 0x1 0t0 UDP *:*\n\
             ok 6 me 10u IPv4 0x1 0t0 udp *:5353"
        );
        let conns = parse_connections(&input);
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].pid, 6);
        assert_eq!(conns[0].transport, Transport::Udp);
        assert_eq!(conns[0].local_address, "*");
        assert_eq!(conns[0].local_port, 5353);
    }

    #[test]
    fn ipv6_brackets_are_stripped() {
        let input = format!(
            "{HEADER}\n\
             cupsd 99 root 5u IPv6 0x1 0t0 TCP [::1]:631 (LISTEN)\n\
             curl 100 me 6u IPv6 0x2 0t0 TCP [fe80::1]:50000->[2606:4700::1]:443 (ESTABLISHED)"
        );
        let conns = parse_connections(&input);
        assert_eq!(conns[0].local_address, "::1");
        assert!(conns[0].is_local());
        assert_eq!(conns[1].local_address, "fe80::1");
        assert_eq!(conns[1].remote_address.as_deref(), Some("2606:4700::1"));
        assert_eq!(conns[1].remote_port, Some(443));
    }

    #[test]
    fn unparseable_remote_port_leaves_remote_absent() {
        let fields = parse_address_field("10.0.0.2:5000->10.0.0.1:http (ESTABLISHED)").unwrap();
        assert_eq!(fields.remote_address, None);
        assert_eq!(fields.remote_port, None);
        assert_eq!(fields.local_port, 5000);
        assert_eq!(fields.state.as_deref(), Some("ESTABLISHED"));
    }

    #[test]
    fn address_field_without_state() {
        let fields = parse_address_field("10.0.0.2:5000->10.0.0.1:53").unwrap();
        assert_eq!(fields.state, None);
        assert_eq!(fields.remote_port, Some(53));
        assert!(parse_address_field("(LISTEN)").is_none());
    }
}
