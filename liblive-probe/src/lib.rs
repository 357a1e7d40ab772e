mod aggregate;
mod http;
mod ping;
mod prober;
pub mod target;
mod types;
mod web;

pub use aggregate::{write_live_set, Aggregator, OutputError, ReportKind, ReportStyle, RunSummary};
pub use http::{create_http_pool, HttpClientError};
pub use ping::{count_flag, ping_args, PingProber};
pub use prober::{Probe, ProbePool};
pub use target::{load_targets, read_target_file, LoadError, RangeMode};
pub use types::{HttpConfig, PingConfig, PoolConfig, ProbeResult};
pub use web::{candidate_urls, check_urls, WebProber};

use futures::StreamExt;
use std::io::Write;
use std::path::Path;

/// Probes every target and returns the results in completion order.
pub async fn probe_many<P, I>(probe: P, workers: usize, targets: I) -> Vec<ProbeResult>
where
    P: Probe,
    I: IntoIterator<Item = String>,
{
    ProbePool::new(probe, workers).probe_stream(targets).collect().await
}

/// Runs the whole pipeline: probe, report each result as it completes, then
/// save the live set to `output`.
///
/// If the console fails mid-run the targets found live so far are still
/// saved before the console error is returned.
pub async fn sweep<P, W>(
    pool: &ProbePool<P>,
    targets: Vec<String>,
    mut aggregator: Aggregator<W>,
    output: &Path,
) -> Result<RunSummary, OutputError>
where
    P: Probe,
    W: Write,
{
    if let Err(e) = aggregator.consume(pool.probe_stream(targets)).await {
        if let Err(save_err) = aggregator.save(output) {
            tracing::warn!("{}", save_err);
        }
        return Err(e);
    }
    aggregator.finish(output)
}
