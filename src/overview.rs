// Overview report job: pull extracted results, aggregate, hand the report to storage.

use tracing::{info, instrument};

use crate::aggregator::{AggregateError, AggregationInput, MetricsAggregator};
use crate::models::{OverviewReport, ReportKey};
use crate::report_repo::ReportStore;
use crate::source::{GraphConsumer, ResultSource, consumer_points, error_entries};

#[derive(Debug, thiserror::Error)]
pub enum OverviewError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("saving overview failed: {0}")]
    Store(#[source] anyhow::Error),
}

/// Shapes everything the overview needs out of a result source.
pub fn collect_input<S: ResultSource + ?Sized>(
    source: &S,
) -> Result<AggregationInput, AggregateError> {
    Ok(AggregationInput {
        active_users: consumer_points(source, GraphConsumer::ActiveThreads)?,
        hits: consumer_points(source, GraphConsumer::HitsPerSecond)?,
        response_times: consumer_points(source, GraphConsumer::ResponseTimeOverTime)?,
        summary_rows: source.summary_rows(),
        errors: error_entries(&source.label_results())?,
    })
}

/// Runs the overview for one report. Nothing is stored when aggregation fails.
#[instrument(skip(source, aggregator, store), fields(report_key = %ReportKey::Overview))]
pub async fn generate<S, R>(
    source: &S,
    aggregator: &MetricsAggregator,
    store: &R,
    report_id: &str,
) -> Result<OverviewReport, OverviewError>
where
    S: ResultSource + ?Sized,
    R: ReportStore + ?Sized,
{
    let input = collect_input(source)?;
    let report = aggregator.aggregate(&input)?;
    store
        .save_result(report_id, ReportKey::Overview, &report)
        .await
        .map_err(OverviewError::Store)?;
    info!(
        max_users = %report.max_users,
        avg_throughput = %report.avg_throughput,
        errors = %report.errors,
        "overview saved"
    );
    Ok(report)
}
