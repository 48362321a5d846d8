use chrono::{DateTime, Local};
use serde::Serialize;

use crate::controller::CycleReport;
use crate::model::{connection_summary, ConnectionInfo, ConnectionSummary, RateSample, TrafficSnapshot};

/// Wire shape of one cycle for `--json`. Failed operations carry their
/// error text instead of data.
#[derive(Serialize)]
pub struct CycleJson<'a> {
    pub time: DateTime<Local>,
    pub rates: RateSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<&'a TrafficSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<&'a [ConnectionInfo]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_summary: Option<ConnectionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections_error: Option<String>,
}

impl<'a> From<&'a CycleReport> for CycleJson<'a> {
    fn from(report: &'a CycleReport) -> Self {
        let (snapshot, snapshot_error) = match &report.snapshot {
            Ok(s) => (Some(s), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let (connections, connection_summary, connections_error) = match &report.connections {
            Ok(c) => (Some(c.as_slice()), Some(self::connection_summary(c)), None),
            Err(e) => (None, None, Some(e.to_string())),
        };
        Self {
            time: report.time,
            rates: report.rates,
            snapshot,
            snapshot_error,
            connections,
            connection_summary,
            connections_error,
        }
    }
}
