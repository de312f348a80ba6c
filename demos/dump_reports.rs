// Dump recently updated reports as JSON (deserializes wincode BLOBs).
//
// Usage: cargo run --example dump_reports -- [DB_PATH] [LIMIT]
//   DB_PATH  default: ./data/reports.db
//   LIMIT    default: 5

use loadreport::report_repo::ReportRepo;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("./data/reports.db");
    let limit: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5);

    // Retention is irrelevant for reads.
    let repo = ReportRepo::connect(path, 1, 1).await?;
    let reports = repo.get_recent_results(limit).await?;

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
