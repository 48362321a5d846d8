use std::io::{self, Write};
use crossterm::style::Color;

use crate::controller::CycleReport;
use crate::model::{connection_summary, ConnectionInfo, TrafficSnapshot};
use super::shared::{
    format_bytes, format_bytes_rate, format_number, truncate_str, write_colored,
    write_section_header, writeln,
};

/// Plain terminal report for one cycle.
pub fn render(out: &mut impl Write, report: &CycleReport, top: usize) -> io::Result<()> {
    write_section_header(out, &format!("  netpulse  |  {}", report.time.format("%Y-%m-%d %H:%M:%S")))?;
    writeln(out, &format!(
        "  Throughput:  ↓ {}  ↑ {}",
        format_bytes_rate(report.rates.bytes_in),
        format_bytes_rate(report.rates.bytes_out)
    ))?;
    writeln(out, "")?;

    write_section_header(out, "--- Processes ---")?;
    match &report.snapshot {
        Ok(snapshot) => render_processes(out, snapshot, top)?,
        Err(e) => write_colored(out, &format!("  {}", e), Color::Red)?,
    }
    writeln(out, "")?;

    write_section_header(out, "--- Connections ---")?;
    match &report.connections {
        Ok(connections) => render_connections(out, connections, top)?,
        Err(e) => write_colored(out, &format!("  {}", e), Color::Red)?,
    }
    Ok(())
}

fn render_processes(out: &mut impl Write, snapshot: &TrafficSnapshot, top: usize) -> io::Result<()> {
    writeln(out, &format!(
        "  {} processes  |  In: {}  Out: {}",
        snapshot.connection_count,
        format_bytes(snapshot.total_bytes_in),
        format_bytes(snapshot.total_bytes_out)
    ))?;
    if snapshot.is_empty() {
        return writeln(out, "  No active traffic");
    }
    writeln(out, &format!("  {:<25} {:>8} {:>12} {:>12}", "PROCESS", "PID", "IN", "OUT"))?;
    for p in snapshot.top(top) {
        writeln(out, &format!(
            "  {:<25} {:>8} {:>12} {:>12}",
            truncate_str(&p.process_name, 25),
            p.pid,
            format_bytes(p.bytes_in),
            format_bytes(p.bytes_out)
        ))?;
    }
    Ok(())
}

fn render_connections(out: &mut impl Write, connections: &[ConnectionInfo], top: usize) -> io::Result<()> {
    let s = connection_summary(connections);
    writeln(out, &format!(
        "  Total: {}  ESTABLISHED: {}  LISTEN: {}  Local: {}  TCP: {}  UDP: {}",
        format_number(s.total as u64), s.established, s.listening, s.local, s.tcp, s.udp
    ))?;

    for c in connections.iter().take(top) {
        let line = format!(
            "  {:<16} {:>7} {:<4} {:<28} {:<28} {}",
            truncate_str(&c.process_name, 16),
            c.pid,
            c.transport,
            truncate_str(&c.local_endpoint(), 28),
            truncate_str(&c.remote_endpoint().unwrap_or_else(|| "-".to_string()), 28),
            c.state.as_deref().unwrap_or("")
        );
        if c.is_established() {
            write_colored(out, &line, Color::Green)?;
        } else if c.is_local() {
            write_colored(out, &line, Color::DarkGrey)?;
        } else {
            writeln(out, &line)?;
        }
    }
    Ok(())
}
