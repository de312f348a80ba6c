// Per-label statistics rows and pass/fail outcome maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the statistics summary. Numeric columns are kept as decimal text;
/// parsing happens during aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    #[serde(default)]
    pub label: String,
    #[serde(deserialize_with = "decimal_text")]
    pub tp90: String,
    #[serde(deserialize_with = "decimal_text")]
    pub received: String,
}

/// Error percentage of one label, as reported under `KoPercent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleErrorEntry {
    pub ko_percent: String,
}

impl SampleErrorEntry {
    pub fn new(ko_percent: impl Into<String>) -> Self {
        Self {
            ko_percent: ko_percent.into(),
        }
    }
}

/// Nested key/value results of one label (e.g. `KoPercent`, `OkPercent`).
pub type LabelResult = BTreeMap<String, serde_json::Value>;

/// Label results in label order. Iteration order is part of the contract: the
/// overview keeps the error percentage of the last label.
pub type LabelResults = BTreeMap<String, LabelResult>;

/// Accepts `"12.5"` or `12.5`; numbers keep their JSON text.
fn decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Ok(other.to_string()),
    }
}
