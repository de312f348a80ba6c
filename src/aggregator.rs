// Overview aggregation: grouped extrema and averages over extracted result rows.
// Pure: every report field derives from the input of a single call.

use std::collections::{BTreeMap, HashMap};

use crate::format::NumberFormat;
use crate::models::{OverviewReport, SampleErrorEntry, SummaryRow, TimeSeriesPoint};

const MS_PER_SECOND: f64 = 1000.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("{field} value `{value}` is not a decimal number")]
    Format { field: &'static str, value: String },

    #[error("label `{label}` has no `{field}` result")]
    MissingField { label: String, field: &'static str },
}

/// Everything one overview is computed from.
#[derive(Debug, Clone, Default)]
pub struct AggregationInput {
    pub active_users: Vec<TimeSeriesPoint>,
    pub hits: Vec<TimeSeriesPoint>,
    pub response_times: Vec<TimeSeriesPoint>,
    pub summary_rows: Vec<SummaryRow>,
    pub errors: BTreeMap<String, SampleErrorEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    format: NumberFormat,
}

impl MetricsAggregator {
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    /// Builds the overview. Any malformed value fails the whole call.
    pub fn aggregate(&self, input: &AggregationInput) -> Result<OverviewReport, AggregateError> {
        let max_users = compute_max_users(&input.active_users);
        let hits = average(&values(&input.hits));
        let response_time = average(&values(&input.response_times));

        let tp90 = input
            .summary_rows
            .iter()
            .map(|row| parse_decimal("tp90", &row.tp90))
            .collect::<Result<Vec<_>, _>>()?;
        let received = input
            .summary_rows
            .iter()
            .map(|row| parse_decimal("received", &row.received))
            .collect::<Result<Vec<_>, _>>()?;

        let error = extract_last_error(&input.errors)?;

        Ok(OverviewReport {
            max_users: max_users.to_string(),
            avg_throughput: self.format.format(hits),
            errors: self.format.format(error),
            avg_response_time: NumberFormat::RESPONSE_TIME.format(response_time / MS_PER_SECOND),
            response_time90: NumberFormat::RESPONSE_TIME.format(average(&tp90) / MS_PER_SECOND),
            avg_bandwidth: self.format.format(average(&received)),
        })
    }
}

/// Sum over groups of the per-group peak, each rounded up. Negative peaks count as 0.
/// Saturates at `u64::MAX`.
pub fn compute_max_users(points: &[TimeSeriesPoint]) -> u64 {
    let mut peaks: HashMap<&str, f64> = HashMap::new();
    for p in points {
        peaks
            .entry(p.group_name.as_str())
            .and_modify(|m| *m = m.max(p.value))
            .or_insert(p.value);
    }
    peaks
        .values()
        .map(|m| m.ceil().max(0.0) as u64)
        .fold(0u64, |acc, n| acc.saturating_add(n))
}

/// Arithmetic mean; 0 for an empty slice.
pub fn average(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}

/// Error percentage of the last entry in label order; 0 when there are none.
/// Only the last entry is parsed, earlier ones are never looked at.
pub fn extract_last_error(
    entries: &BTreeMap<String, SampleErrorEntry>,
) -> Result<f64, AggregateError> {
    match entries.values().next_back() {
        Some(entry) => parse_decimal("KoPercent", &entry.ko_percent),
        None => Ok(0.0),
    }
}

/// Parses a finite decimal, tolerating surrounding whitespace.
pub fn parse_decimal(field: &'static str, s: &str) -> Result<f64, AggregateError> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AggregateError::Format {
            field,
            value: s.to_string(),
        }),
    }
}

fn values(points: &[TimeSeriesPoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_rejects_non_finite() {
        assert!(parse_decimal("tp90", "NaN").is_err());
        assert!(parse_decimal("tp90", "inf").is_err());
        assert!(parse_decimal("tp90", "").is_err());
        assert_eq!(parse_decimal("tp90", " 12.5 "), Ok(12.5));
    }
}
