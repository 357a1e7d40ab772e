use liblive_probe::{
    load_targets, probe_many, sweep, Aggregator, OutputError, Probe, ProbePool, ProbeResult,
    RangeMode, ReportStyle,
};
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Gauge {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

/// Targets listed in `alive` answer; every check takes a few milliseconds.
struct GaugedProbe {
    gauge: Arc<Gauge>,
    alive: HashSet<String>,
}

impl Probe for GaugedProbe {
    async fn probe(&self, target: &str) -> ProbeResult {
        let start = Instant::now();
        let now = self.gauge.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.gauge.peak.fetch_max(now, Ordering::SeqCst);
        self.gauge.calls.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;

        self.gauge.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.alive.contains(target) {
            ProbeResult::live(target, None, start.elapsed())
        } else {
            ProbeResult::dead(target, "no reply", start.elapsed())
        }
    }
}

/// A console whose reader has gone away, as with `live-ips ... | head -1`.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn output_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("liblive-probe-it-{}-{name}", std::process::id()))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_never_exceeds_worker_bound() {
    let gauge = Arc::new(Gauge::default());
    let probe = GaugedProbe {
        gauge: Arc::clone(&gauge),
        alive: HashSet::new(),
    };
    let targets = load_targets("10.1.1.0-99", RangeMode::FirstBlock).unwrap();

    let results = probe_many(probe, 7, targets.clone()).await;

    assert_eq!(results.len(), 100);
    assert_eq!(gauge.calls.load(Ordering::SeqCst), 100);
    assert!(gauge.peak.load(Ordering::SeqCst) <= 7);
    assert!(gauge.peak.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn test_sweep_saves_exactly_the_live_subset() {
    let targets = load_targets("192.168.7.1-20", RangeMode::FirstBlock).unwrap();
    let alive: HashSet<String> = ["192.168.7.3", "192.168.7.11", "192.168.7.20"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let pool = ProbePool::new(
        GaugedProbe {
            gauge: Arc::default(),
            alive: alive.clone(),
        },
        5,
    );
    let output = output_path("live_ips.txt");
    let mut console = Vec::new();
    let aggregator = Aggregator::new(ReportStyle::ip().with_color(false), &mut console);

    let summary = sweep(&pool, targets.clone(), aggregator, &output).await.unwrap();

    let saved: HashSet<String> = std::fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    std::fs::remove_file(&output).unwrap();

    assert_eq!(saved, alive);
    assert_eq!(summary.live.len() + summary.dead, targets.len());
    assert!(summary.live.iter().all(|t| targets.contains(t)));

    let printed = String::from_utf8(console).unwrap();
    assert_eq!(printed.matches(" is live").count(), 3);
    assert_eq!(printed.matches(" is not responding").count(), 17);
}

#[tokio::test]
async fn test_sweep_without_live_targets_creates_no_file() {
    let output = output_path("live_subdomains.txt");
    let _ = std::fs::remove_file(&output);

    let pool = ProbePool::new(
        GaugedProbe {
            gauge: Arc::default(),
            alive: HashSet::new(),
        },
        20,
    );
    let mut console = Vec::new();
    let aggregator = Aggregator::new(ReportStyle::subdomain().with_color(false), &mut console);
    let targets = vec!["a.example.com".to_string(), "b.example.com".to_string()];

    let summary = sweep(&pool, targets, aggregator, &output).await.unwrap();

    assert!(summary.live.is_empty());
    assert_eq!(summary.dead, 2);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_duplicates_are_probed_once_each() {
    let gauge = Arc::new(Gauge::default());
    let probe = GaugedProbe {
        gauge: Arc::clone(&gauge),
        alive: ["10.0.0.1".to_string()].into_iter().collect(),
    };
    let targets = vec!["10.0.0.1".to_string(), "10.0.0.1".to_string()];

    let results = probe_many(probe, 2, targets).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.alive));
    assert_eq!(gauge.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_sweep_saves_live_targets_when_console_closes() {
    let output = output_path("closed_console.txt");
    let _ = std::fs::remove_file(&output);

    let pool = ProbePool::new(
        GaugedProbe {
            gauge: Arc::default(),
            alive: ["10.0.0.1".to_string()].into_iter().collect(),
        },
        1,
    );
    let aggregator = Aggregator::new(ReportStyle::ip().with_color(false), ClosedPipe);

    let err = sweep(&pool, vec!["10.0.0.1".to_string()], aggregator, &output)
        .await
        .unwrap_err();

    let saved = std::fs::read_to_string(&output).unwrap();
    std::fs::remove_file(&output).unwrap();
    assert!(matches!(err, OutputError::Console(_)));
    assert_eq!(saved, "10.0.0.1\n");
}
