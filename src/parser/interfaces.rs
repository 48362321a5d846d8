use std::collections::HashMap;

use tracing::debug;

use crate::model::InterfaceStats;

// `netstat -ib` columns:
// Name Mtu Network Address Ipkts Ierrs Ibytes Opkts Oerrs Obytes Coll
const MIN_COLUMNS: usize = 11;
const COL_NAME: usize = 0;
const COL_PACKETS_IN: usize = 4;
const COL_BYTES_IN: usize = 6;
const COL_PACKETS_OUT: usize = 7;
const COL_BYTES_OUT: usize = 9;

/// Parse a `netstat -ib` style listing, one record per interface name.
///
/// An interface appears once per link/address-family row; those rows are
/// summed. Records come back in order of first appearance.
pub fn parse_interface_counters(text: &str) -> Vec<InterfaceStats> {
    let mut stats: Vec<InterfaceStats> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for line in text.lines().skip(1) {
        let Some(row) = parse_line(line) else { continue };
        match index_by_name.get(&row.name) {
            Some(&idx) => stats[idx].accumulate(&row),
            None => {
                index_by_name.insert(row.name.clone(), stats.len());
                stats.push(row);
            }
        }
    }

    debug!(interfaces = stats.len(), "parsed interface counters");
    stats
}

fn parse_line(line: &str) -> Option<InterfaceStats> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_COLUMNS {
        return None;
    }
    Some(InterfaceStats {
        name: parts[COL_NAME].to_string(),
        packets_in: parts[COL_PACKETS_IN].parse().ok()?,
        bytes_in: parts[COL_BYTES_IN].parse().ok()?,
        packets_out: parts[COL_PACKETS_OUT].parse().ok()?,
        bytes_out: parts[COL_BYTES_OUT].parse().ok()?,
    })
}
