use std::fs::File;
use std::io::{self, BufReader, Write};

use tracing::info;

use daybook::config::Config;
use daybook::fetch::{fetch_all, VecPageSource};
use daybook::{consolidate, ingest};

/// Read booking records (JSON array) from the path argument or stdin, stage
/// them through a paged source, and print the consolidated ranges as JSON.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the result, logs go to stderr
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = Config::from_env();
    let input = std::env::args().nth(1);

    let records = match &input {
        Some(path) => ingest::read_records(BufReader::new(File::open(path)?))?,
        None => ingest::read_records(io::stdin().lock())?,
    };
    info!("read {} records from {}", records.len(), input.as_deref().unwrap_or("stdin"));
    info!("  page_size: {}", config.page_size);
    info!(
        "  page_timeout: {}",
        config
            .fetch
            .page_timeout
            .map_or("none".to_string(), |t| format!("{}ms", t.as_millis()))
    );

    let mut source = VecPageSource::with_page_size(records, config.page_size)?;
    let records = fetch_all(&mut source, &config.fetch).await?;

    let ranges = consolidate::group(&records);
    info!("{} records consolidated into {} ranges", records.len(), ranges.len());

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &ranges)?;
    writeln!(out)?;
    Ok(())
}
