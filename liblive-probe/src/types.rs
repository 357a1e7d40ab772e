use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub target: String,
    pub alive: bool,
    /// URL of the attempt that answered, for HTTP probes.
    pub detail: Option<String>,
    /// Why the target counts as dead. Only ever logged.
    pub reason: Option<String>,
    pub duration: Duration,
}

impl ProbeResult {
    pub fn live(target: &str, detail: Option<String>, duration: Duration) -> Self {
        Self {
            target: target.to_string(),
            alive: true,
            detail,
            reason: None,
            duration,
        }
    }

    pub fn dead(target: &str, reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            target: target.to_string(),
            alive: false,
            detail: None,
            reason: Some(reason.into()),
            duration,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PingConfig {
    pub timeout: Duration,
    pub program: String,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            program: "ping".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            max_redirects: 10,
        }
    }
}

/// Worker ceiling for a probe pool. `workers_per_cpu` adds a CPU-derived
/// ceiling on top of `max_workers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_workers: usize,
    pub workers_per_cpu: Option<usize>,
}

impl PoolConfig {
    pub fn for_ping() -> Self {
        Self {
            max_workers: 100,
            workers_per_cpu: Some(5),
        }
    }

    pub fn for_http() -> Self {
        Self {
            max_workers: 20,
            workers_per_cpu: None,
        }
    }

    pub fn worker_count(&self, targets: usize) -> usize {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.worker_count_with_cpus(targets, cpus)
    }

    /// Never more workers than targets, never fewer than one.
    pub fn worker_count_with_cpus(&self, targets: usize, cpus: usize) -> usize {
        let mut workers = self.max_workers.min(targets);
        if let Some(per_cpu) = self.workers_per_cpu {
            workers = workers.min(cpus.saturating_mul(per_cpu));
        }
        workers.max(1)
    }
}
