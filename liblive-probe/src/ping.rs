use crate::prober::Probe;
use crate::types::{PingConfig, ProbeResult};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// Packet count flag of the system `ping`.
pub fn count_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "-n"
    } else {
        "-c"
    }
}

/// Arguments for one echo request to `target`. Outside Windows the target
/// follows `--` so a name starting with `-` is never read as an option.
pub fn ping_args(target: &str) -> Vec<&str> {
    let mut args = vec![count_flag(), "1"];
    if !cfg!(target_os = "windows") {
        args.push("--");
    }
    args.push(target);
    args
}

/// Sends a single echo request through the system `ping` binary. The target
/// is alive iff the process exits successfully within the timeout.
#[derive(Debug, Clone, Default)]
pub struct PingProber {
    config: PingConfig,
}

impl PingProber {
    pub fn new(config: PingConfig) -> Self {
        Self { config }
    }
}

impl Probe for PingProber {
    async fn probe(&self, target: &str) -> ProbeResult {
        let start = Instant::now();

        let mut command = Command::new(&self.config.program);
        command
            .args(ping_args(target))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(self.config.timeout, command.status()).await {
            Ok(Ok(status)) if status.success() => ProbeResult::live(target, None, start.elapsed()),
            Ok(Ok(status)) => {
                ProbeResult::dead(target, format!("ping exited with {status}"), start.elapsed())
            }
            Ok(Err(e)) => ProbeResult::dead(
                target,
                format!("failed to run {}: {}", self.config.program, e),
                start.elapsed(),
            ),
            Err(_) => ProbeResult::dead(target, "Timeout", start.elapsed()),
        }
    }
}
