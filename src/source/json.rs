// ResultSource over a JSON document exported by the analysis library.

use std::collections::HashMap;

use serde::Deserialize;

use super::{GraphConsumer, ResultSource};
use crate::models::{GraphData, LabelResults, SummaryRow};

/// `{ "graphs": {consumer: {node: graph}}, "statistics": [row], "requestsSummary": {label: {field: value}} }`.
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument {
    #[serde(default)]
    pub graphs: HashMap<String, GraphData>,
    #[serde(default)]
    pub statistics: Vec<SummaryRow>,
    #[serde(default)]
    pub requests_summary: LabelResults,
}

#[derive(Debug, Clone, Default)]
pub struct JsonResultSource {
    doc: ResultDocument,
}

impl JsonResultSource {
    pub fn new(doc: ResultDocument) -> Self {
        Self { doc }
    }

    pub fn parse(s: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(s)?))
    }
}

impl From<ResultDocument> for JsonResultSource {
    fn from(doc: ResultDocument) -> Self {
        Self::new(doc)
    }
}

impl ResultSource for JsonResultSource {
    fn graph_data(&self, consumer: GraphConsumer) -> GraphData {
        self.doc
            .graphs
            .get(consumer.key())
            .cloned()
            .unwrap_or_default()
    }

    fn summary_rows(&self) -> Vec<SummaryRow> {
        self.doc.statistics.clone()
    }

    fn label_results(&self) -> LabelResults {
        self.doc.requests_summary.clone()
    }
}
