use crate::types::ProbeResult;
use futures::stream::{self, Stream, StreamExt};
use std::future::Future;

/// A single liveness check. Implementations never fail: any error while
/// probing is reported as a dead result.
pub trait Probe {
    fn probe(&self, target: &str) -> impl Future<Output = ProbeResult> + Send;
}

/// Runs a [`Probe`] over many targets with at most `workers` checks in flight.
pub struct ProbePool<P> {
    probe: P,
    workers: usize,
}

impl<P: Probe> ProbePool<P> {
    pub fn new(probe: P, workers: usize) -> Self {
        Self {
            probe,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn probe_one(&self, target: &str) -> ProbeResult {
        let result = self.probe.probe(target).await;
        if result.alive {
            tracing::debug!(host = %result.target, elapsed = ?result.duration, "alive");
        } else {
            tracing::debug!(
                host = %result.target,
                reason = result.reason.as_deref().unwrap_or("unknown"),
                "not alive"
            );
        }
        result
    }

    /// Results come back in completion order, one per submitted target.
    pub fn probe_stream<I>(&self, targets: I) -> impl Stream<Item = ProbeResult> + '_
    where
        I: IntoIterator<Item = String>,
    {
        let targets: Vec<String> = targets.into_iter().collect();
        tracing::info!(targets = targets.len(), workers = self.workers, "starting probe pool");

        stream::iter(targets)
            .map(move |target| async move { self.probe_one(&target).await })
            .buffer_unordered(self.workers)
    }
}
