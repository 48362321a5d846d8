//! End-to-end checks through the public library surface with canned tool
//! output in place of the real utilities.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use netpulse::model::{InterfaceStats, RateSample, Transport};
use netpulse::parser::{parse_connections, parse_interface_counters, parse_process_traffic};
use netpulse::rate::RateTracker;
use netpulse::{CommandRunner, MonitorError, Result, Sampler, Tool};

#[derive(Default)]
struct ScriptedRunner {
    outputs: Mutex<HashMap<Tool, String>>,
}

impl ScriptedRunner {
    fn with(outputs: &[(Tool, &str)]) -> Arc<Self> {
        let runner = Self::default();
        for (tool, text) in outputs {
            runner.outputs.lock().unwrap().insert(*tool, text.to_string());
        }
        Arc::new(runner)
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, tool: Tool) -> Result<String> {
        let text = self.outputs.lock().unwrap().get(&tool).cloned();
        text.ok_or_else(|| MonitorError::execution_failed(tool, "No such file or directory"))
    }
}

const LSOF: &str = "\
COMMAND     PID   USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
Safari     1234   me     10u  IPv4 0xabc              0t0  TCP 192.168.1.5:8080->10.0.0.1:443 (ESTABLISHED)
Safari     1234   me     11u  IPv4 0xabd              0t0  TCP 192.168.1.5:8080->10.0.0.1:443 (ESTABLISHED)
mDNSRespo   321   root   8u   IPv4 0xabe              0t0  UDP *:5353
postgres    777   me     5u   IPv6 0xabf              0t0  TCP [::1]:5432 (LISTEN)";

const NETSTAT: &str = "\
Name       Mtu   Network       Address            Ipkts Ierrs     Ibytes    Opkts Oerrs     Obytes  Coll
lo0        16384 <Link#1>                        100     0      10000      100     0      10000     0
lo0        16384 127           127.0.0.1          100     0      10000      100     0      10000     0
en0        1500  <Link#6>    aa:bb:cc:dd:ee:ff    500     0     100000      400     0      50000     0
en0        1500  192.168.1     192.168.1.5          5     0        200        4     0        100     0";

#[test]
fn scenario_a_two_processes() {
    let snap = parse_process_traffic("Safari.1234, 1048576, 524288\nSlack.5678, 102400, 51200");
    assert_eq!(snap.processes.len(), 2);
    assert_eq!(snap.processes[0].process_name, "Safari");
    assert!(snap.processes[0].total_bytes() > snap.processes[1].total_bytes());
    assert_eq!(snap.total_bytes_in, 1_150_976);
    assert_eq!(snap.total_bytes_out, 575_488);
}

#[test]
fn scenario_b_same_pid_summed() {
    let snap = parse_process_traffic("Safari.1234, 1000, 500\nSafari.1234, 2000, 1000");
    assert_eq!(snap.processes.len(), 1);
    assert_eq!(snap.processes[0].bytes_in, 3000);
    assert_eq!(snap.processes[0].bytes_out, 1500);
}

#[test]
fn scenario_c_duplicate_socket_rows() {
    let conns = parse_connections(LSOF);
    let safari: Vec<_> = conns.iter().filter(|c| c.pid == 1234).collect();
    assert_eq!(safari.len(), 1);
    assert_eq!(safari[0].local_port, 8080);
    assert_eq!(safari[0].remote_address.as_deref(), Some("10.0.0.1"));
    assert_eq!(conns.len(), 3);
    assert_eq!(conns[1].transport, Transport::Udp);
    assert!(conns[2].is_local());
    assert!(!conns[2].is_established());
}

#[test]
fn interface_rows_merge_and_loopback_is_ignored_for_rates() {
    let stats = parse_interface_counters(NETSTAT);
    assert_eq!(stats.len(), 2);
    let en0 = stats.iter().find(|s| s.name == "en0").unwrap();
    assert_eq!(en0.bytes_in, 100_200);
    assert_eq!(en0.packets_out, 404);

    let mut tracker = RateTracker::new();
    let t0 = Instant::now();
    assert_eq!(tracker.sample_rates_at(stats.clone(), t0), RateSample::ZERO);

    let bumped: Vec<InterfaceStats> = stats
        .into_iter()
        .map(|mut s| {
            s.bytes_in += 4000;
            s.bytes_out += 2000;
            s
        })
        .collect();
    let rate = tracker.sample_rates_at(bumped, t0 + Duration::from_secs(2));
    assert_eq!(rate, RateSample { bytes_in: 2000, bytes_out: 1000 });
}

#[tokio::test]
async fn full_cycle_with_all_tools() {
    let runner = ScriptedRunner::with(&[
        (Tool::ProcessBandwidth, "Safari.1234, 1048576, 524288\nSlack.5678, 102400, 51200"),
        (Tool::Connections, LSOF),
        (Tool::InterfaceCounters, NETSTAT),
    ]);
    let sampler = Sampler::new(runner);

    let first = sampler.cycle().await;
    let snap = first.snapshot.unwrap();
    assert_eq!(snap.connection_count, 2);
    assert_eq!(first.connections.unwrap().len(), 3);
    assert_eq!(first.rates, RateSample::ZERO);

    // Unchanged counters: a baseline exists now but nothing moved.
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = sampler.cycle().await;
    assert_eq!(second.rates, RateSample::ZERO);
}

#[tokio::test]
async fn one_failing_tool_does_not_affect_the_others() {
    let runner = ScriptedRunner::with(&[(Tool::Connections, LSOF)]);
    let sampler = Sampler::new(runner);

    let report = sampler.cycle().await;
    match report.snapshot {
        Err(MonitorError::ExecutionFailed { tool, detail }) => {
            assert_eq!(tool, Tool::ProcessBandwidth);
            assert!(detail.contains("No such file"));
        }
        other => panic!("expected execution failure, got {:?}", other),
    }
    assert_eq!(report.connections.unwrap().len(), 3);
    assert_eq!(report.rates, RateSample::ZERO);
}
