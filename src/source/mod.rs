// Extracted load-test results: the collaborator that owns log parsing and bucketing,
// plus the shaping steps that turn its output into aggregation input.

mod json;

pub use json::{JsonResultSource, ResultDocument};

use std::collections::BTreeMap;

use crate::aggregator::{AggregateError, parse_decimal};
use crate::models::{
    Axis, GraphData, LabelResults, SampleErrorEntry, SummaryRow, TimeSeriesPoint,
};

pub const KO_PERCENT: &str = "KoPercent";

/// Graph consumers the overview reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphConsumer {
    ActiveThreads,
    HitsPerSecond,
    ResponseTimeOverTime,
}

impl GraphConsumer {
    /// Key of the consumer's output in a result document.
    pub fn key(&self) -> &'static str {
        match self {
            GraphConsumer::ActiveThreads => "activeThreadsOverTime",
            GraphConsumer::HitsPerSecond => "hitsPerSecond",
            GraphConsumer::ResponseTimeOverTime => "responseTimesOverTime",
        }
    }

    /// Series name and axis each graph is read with. Part of the schema contract.
    pub fn field(&self) -> (&'static str, Axis) {
        match self {
            GraphConsumer::ActiveThreads => ("users", Axis::Y),
            GraphConsumer::HitsPerSecond => ("hits", Axis::Y2),
            GraphConsumer::ResponseTimeOverTime => ("response", Axis::Y2),
        }
    }
}

/// Results already computed by the analysis library. Implementations return
/// empty collections for anything the run did not produce.
pub trait ResultSource {
    fn graph_data(&self, consumer: GraphConsumer) -> GraphData;

    fn summary_rows(&self) -> Vec<SummaryRow>;

    fn label_results(&self) -> LabelResults;
}

/// Flattens a graph into points. A node with a single series names its points
/// after `series_name`; with several series each keeps its own label.
pub fn graph_points(
    graph: &GraphData,
    series_name: &str,
    axis: Axis,
) -> Result<Vec<TimeSeriesPoint>, AggregateError> {
    let mut out = Vec::new();
    for node in graph.values() {
        let single = node.series.len() == 1;
        for series in &node.series {
            let group = if single {
                series_name
            } else {
                series.label.as_str()
            };
            for [x, y] in &series.data {
                let timestamp_ms = json_decimal("x", x)? as i64;
                let value = json_decimal(axis_field(axis), y)?;
                out.push(TimeSeriesPoint::new(group, timestamp_ms, value, axis));
            }
        }
    }
    Ok(out)
}

/// Points of one consumer, read with its contract field.
pub fn consumer_points<S: ResultSource + ?Sized>(
    source: &S,
    consumer: GraphConsumer,
) -> Result<Vec<TimeSeriesPoint>, AggregateError> {
    let (series_name, axis) = consumer.field();
    graph_points(&source.graph_data(consumer), series_name, axis)
}

/// Picks `KoPercent` out of every label result, as text.
pub fn error_entries(
    results: &LabelResults,
) -> Result<BTreeMap<String, SampleErrorEntry>, AggregateError> {
    let mut out = BTreeMap::new();
    for (label, result) in results {
        let value = result
            .get(KO_PERCENT)
            .ok_or_else(|| AggregateError::MissingField {
                label: label.clone(),
                field: KO_PERCENT,
            })?;
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.insert(label.clone(), SampleErrorEntry::new(text));
    }
    Ok(out)
}

fn axis_field(axis: Axis) -> &'static str {
    match axis {
        Axis::Y => "yAxis",
        Axis::Y2 => "yAxis2",
    }
}

fn json_decimal(field: &'static str, v: &serde_json::Value) -> Result<f64, AggregateError> {
    match v {
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() => Ok(f),
            _ => Err(AggregateError::Format {
                field,
                value: n.to_string(),
            }),
        },
        serde_json::Value::String(s) => parse_decimal(field, s),
        other => Err(AggregateError::Format {
            field,
            value: other.to_string(),
        }),
    }
}
