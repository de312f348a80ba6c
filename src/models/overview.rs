// Overview report: one record per test run, all values pre-formatted for display.

use std::fmt;

use serde::{Deserialize, Serialize};
use wincode::{SchemaRead, SchemaWrite};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SchemaRead, SchemaWrite)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    pub max_users: String,
    pub avg_throughput: String,
    pub errors: String,
    /// Seconds, 4 fraction digits.
    pub avg_response_time: String,
    /// Seconds, 4 fraction digits.
    pub response_time90: String,
    pub avg_bandwidth: String,
}

/// Report-type identifier used as the second half of the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKey {
    Overview,
}

impl ReportKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKey::Overview => "Overview",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Overview" => Some(ReportKey::Overview),
            _ => None,
        }
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted report row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub report_id: String,
    pub report_key: ReportKey,
    pub updated_at: i64,
    pub report: OverviewReport,
}
