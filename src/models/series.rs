// Graph-shaped consumer output and the flattened time-series points built from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which y axis a point was read from. Active users live on the primary axis,
/// hits and response times on the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "yAxis")]
    Y,
    #[serde(rename = "yAxis2")]
    Y2,
}

/// One sample of a named metric in a labeled group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub group_name: String,
    pub timestamp_ms: i64,
    pub value: f64,
    pub axis: Axis,
}

impl TimeSeriesPoint {
    pub fn new(group_name: impl Into<String>, timestamp_ms: i64, value: f64, axis: Axis) -> Self {
        Self {
            group_name: group_name.into(),
            timestamp_ms,
            value,
            axis,
        }
    }
}

/// One series of a graph node: a label plus `[x, y]` pairs.
/// Coordinates stay raw JSON until shaping so malformed values surface as format errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSeries {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<[serde_json::Value; 2]>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphResult {
    #[serde(default)]
    pub series: Vec<GraphSeries>,
}

/// Graph consumer output keyed by node id.
pub type GraphData = BTreeMap<String, GraphResult>;
