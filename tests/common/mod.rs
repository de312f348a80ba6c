// Shared test helpers
#![allow(dead_code)]

use std::sync::Mutex;

use loadreport::models::*;
use loadreport::report_repo::{ReportRepo, ReportStore};
use loadreport::source::{GraphConsumer, ResultSource};
use tempfile::TempDir;

pub fn point(group: &str, value: f64) -> TimeSeriesPoint {
    TimeSeriesPoint::new(group, 0, value, Axis::Y)
}

pub fn summary_row(label: &str, tp90: &str, received: &str) -> SummaryRow {
    SummaryRow {
        label: label.into(),
        tp90: tp90.into(),
        received: received.into(),
    }
}

pub fn sample_report() -> OverviewReport {
    OverviewReport {
        max_users: "15".into(),
        avg_throughput: "2.00".into(),
        errors: "1.50".into(),
        avg_response_time: "0.2000".into(),
        response_time90: "0.1500".into(),
        avg_bandwidth: "15.00".into(),
    }
}

/// A document exercising every section: two thread groups, one hits series,
/// one response-time series, two statistics rows, one requests summary.
pub const SAMPLE_DOCUMENT: &str = r#"
{
  "graphs": {
    "activeThreadsOverTime": {
      "ActiveThreadsGraphConsumer": {
        "series": [
          { "label": "Group A", "data": [[1000, 3.1], [2000, 9.2], [3000, 4.0]] },
          { "label": "Group B", "data": [[1000, 2.0], [2000, 5.0]] }
        ]
      }
    },
    "hitsPerSecond": {
      "HitsPerSecondGraphConsumer": {
        "series": [ { "label": "Hits", "data": [[1000, 1.0], [2000, "3.0"]] } ]
      }
    },
    "responseTimesOverTime": {
      "ResponseTimeOverTimeGraphConsumer": {
        "series": [ { "label": "GET /", "data": [[1000, 100], [2000, 300]] } ]
      }
    }
  },
  "statistics": [
    { "label": "GET /", "tp90": "100.0", "received": "10.0" },
    { "label": "POST /", "tp90": 200, "received": 20 }
  ],
  "requestsSummary": {
    "Total": { "KoPercent": 1.5, "OkPercent": 98.5 }
  }
}
"#;

pub async fn temp_repo() -> (TempDir, ReportRepo) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports.db");
    let repo = ReportRepo::connect(path.to_str().unwrap(), 2, 30)
        .await
        .unwrap();
    repo.init().await.unwrap();
    (dir, repo)
}

/// In-memory source for pipeline tests.
#[derive(Default)]
pub struct MemorySource {
    pub active_threads: GraphData,
    pub hits: GraphData,
    pub response_times: GraphData,
    pub summary: Vec<SummaryRow>,
    pub labels: LabelResults,
}

impl ResultSource for MemorySource {
    fn graph_data(&self, consumer: GraphConsumer) -> GraphData {
        match consumer {
            GraphConsumer::ActiveThreads => self.active_threads.clone(),
            GraphConsumer::HitsPerSecond => self.hits.clone(),
            GraphConsumer::ResponseTimeOverTime => self.response_times.clone(),
        }
    }

    fn summary_rows(&self) -> Vec<SummaryRow> {
        self.summary.clone()
    }

    fn label_results(&self) -> LabelResults {
        self.labels.clone()
    }
}

/// Single-node graph with one series per (label, values) pair.
pub fn graph(series: &[(&str, &[f64])]) -> GraphData {
    let series = series
        .iter()
        .map(|(label, values)| GraphSeries {
            label: label.to_string(),
            data: values
                .iter()
                .enumerate()
                .map(|(i, v)| [serde_json::json!(i as i64 * 1000), serde_json::json!(v)])
                .collect(),
        })
        .collect();
    let mut out = GraphData::new();
    out.insert("node".to_string(), GraphResult { series });
    out
}

/// Records saves; optionally fails them.
#[derive(Default)]
pub struct MemoryStore {
    pub saved: Mutex<Vec<(String, ReportKey, OverviewReport)>>,
    pub fail: bool,
}

impl ReportStore for MemoryStore {
    async fn save_result(
        &self,
        report_id: &str,
        key: ReportKey,
        report: &OverviewReport,
    ) -> anyhow::Result<()> {
        anyhow::ensure!(!self.fail, "store unavailable");
        self.saved
            .lock()
            .unwrap()
            .push((report_id.to_string(), key, report.clone()));
        Ok(())
    }
}
