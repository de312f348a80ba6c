// Domain models

mod overview;
mod series;
mod summary;

pub use overview::{OverviewReport, ReportKey, StoredReport};
pub use series::{Axis, GraphData, GraphResult, GraphSeries, TimeSeriesPoint};
pub use summary::{LabelResult, LabelResults, SampleErrorEntry, SummaryRow};
