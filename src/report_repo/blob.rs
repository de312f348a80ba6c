// report_value BLOB: [version: u8][wincode payload].
// Version 1 = OverviewReport. Unknown versions are rejected instead of guessed at.

use crate::models::OverviewReport;

pub(super) const BLOB_VERSION_OVERVIEW: u8 = 1;

pub(super) fn encode_overview(report: &OverviewReport) -> anyhow::Result<Vec<u8>> {
    let payload =
        wincode::serialize(report).map_err(|e| anyhow::anyhow!("wincode overview: {}", e))?;
    let mut out = Vec::with_capacity(1 + payload.len());
    out.push(BLOB_VERSION_OVERVIEW);
    out.extend_from_slice(&payload);
    Ok(out)
}

pub(super) fn decode_overview(bytes: &[u8]) -> anyhow::Result<OverviewReport> {
    let Some((&version, payload)) = bytes.split_first() else {
        anyhow::bail!("empty report blob");
    };
    anyhow::ensure!(
        version == BLOB_VERSION_OVERVIEW,
        "unsupported report blob version {}",
        version
    );
    wincode::deserialize(payload).map_err(|e| anyhow::anyhow!("wincode deserialize overview: {}", e))
}
