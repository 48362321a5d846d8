use std::collections::HashMap;

use chrono::Local;
use tracing::debug;

use crate::model::{ProcessTraffic, TrafficSnapshot};

/// Parse `nettop`-style `name.pid, bytes_in, bytes_out` lines into a snapshot.
///
/// Unparseable lines, lines without a numeric pid suffix, and idle entries
/// (both counters zero) are skipped. Rows repeating a pid are summed into the
/// first entry seen for that pid.
pub fn parse_process_traffic(text: &str) -> TrafficSnapshot {
    let processes = aggregate(text);
    debug!(processes = processes.len(), "parsed process traffic");
    TrafficSnapshot::from_processes(processes, Local::now())
}

fn aggregate(text: &str) -> Vec<ProcessTraffic> {
    let mut entries: Vec<ProcessTraffic> = Vec::new();
    let mut index_by_pid: HashMap<u32, usize> = HashMap::new();

    for line in text.lines() {
        let Some(row) = parse_line(line) else { continue };
        match index_by_pid.get(&row.pid) {
            Some(&idx) => {
                let entry = &mut entries[idx];
                entry.bytes_in = entry.bytes_in.saturating_add(row.bytes_in);
                entry.bytes_out = entry.bytes_out.saturating_add(row.bytes_out);
            }
            None => {
                index_by_pid.insert(row.pid, entries.len());
                entries.push(row);
            }
        }
    }
    entries
}

fn parse_line(line: &str) -> Option<ProcessTraffic> {
    if line.trim().is_empty() {
        return None;
    }
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }

    let bytes_in = fields[1].parse::<u64>().ok()?;
    let bytes_out = fields[2].parse::<u64>().ok()?;

    // Process names may themselves contain dots; the pid is after the last one.
    let (name, pid_tail) = fields[0].rsplit_once('.')?;
    let pid = pid_tail.parse::<u32>().ok()?;

    if bytes_in == 0 && bytes_out == 0 {
        return None;
    }

    Some(ProcessTraffic { process_name: name.to_string(), pid, bytes_in, bytes_out })
}
